//! CLI command handlers, one module per command group.

pub mod config;
pub mod day;
pub mod task;

use timeblock_core::{DayKey, PlannerStore};

/// Resolve the day an intent applies to: an explicit `--day` argument,
/// else the selected day, else today.
pub fn resolve_day(
    store: &PlannerStore,
    arg: Option<&str>,
) -> Result<DayKey, Box<dyn std::error::Error>> {
    match arg {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(store.selected_day().unwrap_or_else(DayKey::today)),
    }
}
