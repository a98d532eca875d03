//! Start-time recomputation around locked anchors.

use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;

use crate::task::Task;
use crate::time::{day_anchor, DayKey};

/// Recompute every unlocked task's start time from the day's 08:00 anchor.
///
/// Tasks are walked in `order`. A locked task keeps its start time and
/// pushes the cursor past its end; an unlocked task is placed at the
/// cursor, stepping past any locked interval it would intersect. The
/// returned list preserves the input's relative order; inputs are not
/// mutated. Locked tasks that overlap each other are tolerated and left
/// where they are.
pub fn reflow(tasks: &[Task], day: DayKey) -> Vec<Task> {
    if tasks.is_empty() {
        return Vec::new();
    }

    let mut by_order: Vec<&Task> = tasks.iter().collect();
    by_order.sort_by_key(|t| t.order);

    let locked_intervals: Vec<(NaiveDateTime, NaiveDateTime)> = tasks
        .iter()
        .filter(|t| t.is_locked)
        .map(|t| (t.start_time, t.end_time()))
        .collect();

    let mut cursor = day_anchor(day);
    let mut new_starts: HashMap<&str, NaiveDateTime> = HashMap::new();

    for task in &by_order {
        if task.is_locked {
            cursor = cursor.max(task.end_time());
            continue;
        }

        let duration = Duration::minutes(task.duration_minutes);
        let mut start = cursor;
        // Each jump moves strictly forward onto a locked end, so this
        // terminates once every locked interval is behind the candidate.
        loop {
            let conflict = locked_intervals
                .iter()
                .find(|(locked_start, locked_end)| start < *locked_end && start + duration > *locked_start);
            match conflict {
                Some((_, locked_end)) => start = *locked_end,
                None => break,
            }
        }

        new_starts.insert(task.id.as_str(), start);
        cursor = start + duration;
    }

    tasks
        .iter()
        .map(|task| match new_starts.get(task.id.as_str()) {
            Some(start) => {
                let mut updated = task.clone();
                updated.start_time = *start;
                updated
            }
            None => task.clone(),
        })
        .collect()
}
