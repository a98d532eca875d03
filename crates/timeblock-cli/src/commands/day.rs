//! Day selection and navigation commands.

use clap::Subcommand;
use timeblock_core::{DayKey, PlannerStore};

#[derive(Subcommand)]
pub enum DayAction {
    /// Show the selected day and its task count
    Show,
    /// Select a specific day (YYYY-MM-DD)
    Select { day: String },
    /// Move the selection one day forward
    Next,
    /// Move the selection one day back
    Prev,
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = PlannerStore::open_default()?;
    let current = store.selected_day().unwrap_or_else(DayKey::today);

    match action {
        DayAction::Show => {
            println!("{current}: {} task(s)", store.tasks(current).len());
        }
        DayAction::Select { day } => {
            let day: DayKey = day.parse()?;
            store.select_day(day);
            println!("Selected {day}");
        }
        DayAction::Next => {
            let next = current.add_days(1);
            store.select_day(next);
            println!("Selected {next}");
        }
        DayAction::Prev => {
            let prev = current.add_days(-1);
            store.select_day(prev);
            println!("Selected {prev}");
        }
    }

    Ok(())
}
