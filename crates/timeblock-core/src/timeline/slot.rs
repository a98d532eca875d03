//! Free-slot search for task insertion.

use chrono::Duration;

use crate::task::Task;
use crate::time::{day_anchor, day_end, DayKey};

/// Where a new task should land: the resolved start time plus the id of
/// the task it should be sequenced after (`None` means the very
/// beginning).
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub start: chrono::NaiveDateTime,
    pub insert_after: Option<String>,
}

/// Find the earliest start for a task of `duration_minutes` that does not
/// conflict with any locked task.
///
/// The scan starts at the 08:00 anchor, or at the end of the hint task
/// when one is supplied and resolvable. A candidate that intersects a
/// locked interval jumps to that interval's end and retries. If nothing
/// fits before the 23:59 sentinel the slot falls back to after the
/// chronologically last task. Pure; the caller reflows and re-detects
/// overlaps after splicing the task in.
pub fn find_slot(
    tasks: &[Task],
    duration_minutes: i64,
    day: DayKey,
    hint: Option<&str>,
) -> Slot {
    let anchor = day_anchor(day);
    if tasks.is_empty() {
        return Slot { start: anchor, insert_after: None };
    }

    let duration = Duration::minutes(duration_minutes);
    let hint_task = hint.and_then(|id| tasks.iter().find(|t| t.id == id));
    let mut candidate = hint_task.map(Task::end_time).unwrap_or(anchor);

    let sentinel = day_end(day);
    let mut fits = true;
    loop {
        if candidate >= sentinel {
            fits = false;
            break;
        }
        let conflict = tasks
            .iter()
            .find(|t| t.is_locked && t.overlaps_interval(candidate, candidate + duration));
        match conflict {
            Some(locked) => candidate = locked.end_time(),
            None => break,
        }
    }

    let start = if fits {
        candidate
    } else {
        tasks
            .iter()
            .map(Task::end_time)
            .max()
            .unwrap_or(anchor)
    };

    // Sequence after the last task (by start time) already finished at the
    // accepted start; keep the caller's hint when nothing better exists.
    let mut insert_after = hint_task.map(|t| t.id.clone());
    let mut by_time: Vec<&Task> = tasks.iter().collect();
    by_time.sort_by_key(|t| t.start_time);
    for task in by_time {
        if task.end_time() <= start {
            insert_after = Some(task.id.clone());
        }
    }

    Slot { start, insert_after }
}
