//! # Timeblock Core Library
//!
//! This library provides the core business logic for the Timeblock day
//! planner. It implements a CLI-first philosophy where every operation is
//! available via a standalone CLI binary, with any GUI layer being a thin
//! shell over the same core library.
//!
//! ## Architecture
//!
//! - **Timeline**: start-time reflow around locked anchors, free-slot
//!   search, and overlap detection
//! - **Drag**: drop-gesture classification and the swap/push/move-to-end
//!   reorder operations
//! - **Store**: the per-day orchestrator that runs each intent through
//!   the validate/mutate/reflow/detect/persist pipeline atomically
//! - **Storage**: versioned JSON schedule document and TOML configuration
//!
//! ## Key Components
//!
//! - [`PlannerStore`]: orchestrator over the per-day task collections
//! - [`reflow`]: the scheduling engine itself
//! - [`ScheduleStore`]: storage collaborator trait
//! - [`Config`]: application configuration management

pub mod drag;
pub mod error;
pub mod storage;
pub mod store;
pub mod task;
pub mod time;
pub mod timeline;

pub use drag::{classify, DragAction, DragConfig};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use storage::{Config, JsonFileStore, MemoryStore, ScheduleStore};
pub use store::PlannerStore;
pub use task::{PlannerState, Task, TaskDraft};
pub use time::{format_clock, format_clock_opt, format_duration, DayKey};
pub use timeline::{detect_overlaps, find_slot, reflow, Slot};
