//! Persistence for the planner document and application configuration.
//!
//! The schedule is one versioned JSON document (the only wire format in
//! the system); configuration is a small TOML file. Typed times cross the
//! storage boundary exclusively through the [`codec`] encode/decode pair.

pub mod codec;
mod config;
pub mod migrations;

mod json_store;

pub use config::Config;
pub use json_store::JsonFileStore;

use std::cell::RefCell;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::task::PlannerState;

/// Returns `~/.config/timeblock[-dev]/` based on TIMEBLOCK_ENV.
///
/// Set TIMEBLOCK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMEBLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timeblock-dev")
    } else {
        base_dir.join("timeblock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Storage collaborator for the planner store.
///
/// The store calls `load` once at startup and `save` after every committed
/// mutation. Implementations serialize times losslessly and keep older
/// document shapes readable (see [`migrations`]).
pub trait ScheduleStore {
    fn load(&self) -> Result<PlannerState, StorageError>;
    fn save(&self, state: &PlannerState) -> Result<(), StorageError>;
}

/// In-memory store for tests and headless embedding.
#[derive(Default)]
pub struct MemoryStore {
    state: RefCell<Option<PlannerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryStore {
    fn load(&self) -> Result<PlannerState, StorageError> {
        Ok(self.state.borrow().clone().unwrap_or_default())
    }

    fn save(&self, state: &PlannerState) -> Result<(), StorageError> {
        *self.state.borrow_mut() = Some(state.clone());
        Ok(())
    }
}
