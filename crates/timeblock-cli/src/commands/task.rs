//! Task management commands for the CLI.

use clap::Subcommand;
use timeblock_core::{format_clock, format_duration, DragAction, PlannerStore, Task, TaskDraft};

use super::resolve_day;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task in the earliest free slot
    Add {
        /// Task title
        title: String,
        /// Duration in minutes (rounded up to the quarter hour)
        #[arg(long, default_value = "30")]
        duration: i64,
        /// Bias the slot search after this task id
        #[arg(long)]
        after: Option<String>,
        /// Create the task locked at the found slot
        #[arg(long)]
        locked: bool,
        /// Append at the end of the sequence instead of slot-searching
        #[arg(long)]
        end: bool,
        /// Day key (YYYY-MM-DD); defaults to the selected day
        #[arg(long)]
        day: Option<String>,
    },
    /// List the day's tasks
    List {
        #[arg(long)]
        day: Option<String>,
        /// Print raw JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Delete a task
    Delete {
        id: String,
        #[arg(long)]
        day: Option<String>,
    },
    /// Rename a task
    Rename {
        id: String,
        title: String,
        #[arg(long)]
        day: Option<String>,
    },
    /// Toggle a task's lock
    Lock {
        id: String,
        #[arg(long)]
        day: Option<String>,
    },
    /// Exchange two tasks' positions
    Swap {
        id_a: String,
        id_b: String,
        #[arg(long)]
        day: Option<String>,
    },
    /// Push the dragged task into the target's slot
    Push {
        dragged: String,
        target: String,
        #[arg(long)]
        day: Option<String>,
    },
    /// Move a task past everything else, including locked chains
    MoveToEnd {
        id: String,
        #[arg(long)]
        day: Option<String>,
    },
    /// Interpret a drop at a relative position inside the target block
    Drop {
        dragged: String,
        target: String,
        /// Relative vertical position in the target, 0.0 (top) to 1.0
        #[arg(long, default_value = "0.5")]
        at: f64,
        #[arg(long)]
        day: Option<String>,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = PlannerStore::open_default()?;

    match action {
        TaskAction::Add { title, duration, after, locked, end, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            let mut draft = TaskDraft::new(title, duration);
            if locked {
                draft = draft.locked();
            }
            let id = if end {
                store.add(day, draft)?
            } else {
                store.insert(day, after.as_deref(), draft)?
            };
            println!("Task created: {id}");
        }
        TaskAction::List { day, json } => {
            let day = resolve_day(&store, day.as_deref())?;
            let tasks = store.tasks(day);
            if json {
                println!("{}", serde_json::to_string_pretty(tasks)?);
            } else if tasks.is_empty() {
                println!("{day}: no tasks");
            } else {
                println!("{day}");
                let mut by_order: Vec<&Task> = tasks.iter().collect();
                by_order.sort_by_key(|t| t.order);
                for task in by_order {
                    println!(
                        "  {:>8}  {:<7} {}{}{}  ({})",
                        format_clock(task.start_time),
                        format_duration(task.duration_minutes),
                        if task.is_locked { "[locked] " } else { "" },
                        if task.is_overlapping { "[overlap] " } else { "" },
                        task.title,
                        task.id,
                    );
                }
            }
        }
        TaskAction::Delete { id, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            store.delete(day, &id);
            println!("Deleted {id}");
        }
        TaskAction::Rename { id, title, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            if store.rename(day, &id, &title)? {
                println!("Renamed {id}");
            } else {
                println!("No task {id} on {day}");
            }
        }
        TaskAction::Lock { id, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            store.toggle_lock(day, &id);
            match store.tasks(day).iter().find(|t| t.id == id) {
                Some(task) if task.is_locked => {
                    println!("Locked {id} at {}", format_clock(task.start_time))
                }
                Some(_) => println!("Unlocked {id}"),
                None => println!("No task {id} on {day}"),
            }
        }
        TaskAction::Swap { id_a, id_b, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            if store.swap(day, &id_a, &id_b) {
                println!("Swapped {id_a} and {id_b}");
            } else {
                println!("Swap rejected; schedule unchanged");
            }
        }
        TaskAction::Push { dragged, target, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            if store.push(day, &dragged, &target) {
                println!("Pushed {dragged} into {target}'s slot");
            } else {
                println!("Push rejected (snap back); schedule unchanged");
            }
        }
        TaskAction::MoveToEnd { id, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            if store.move_to_end(day, &id) {
                println!("Moved {id} to the end");
            } else {
                println!("Move rejected; schedule unchanged");
            }
        }
        TaskAction::Drop { dragged, target, at, day } => {
            let day = resolve_day(&store, day.as_deref())?;
            match store.drop_gesture(day, &dragged, Some(&target), at) {
                DragAction::Swap => println!("Drop swapped {dragged} with {target}"),
                DragAction::Push => println!("Drop pushed {dragged} into {target}'s slot"),
                DragAction::None => println!("Drop did nothing; schedule unchanged"),
            }
        }
    }

    Ok(())
}
