//! Pairwise overlap detection.

use crate::task::Task;

/// Flag every task whose `[start, start + duration)` interval strictly
/// intersects at least one other task's interval, regardless of lock
/// state. Pure; re-run after every mutation that can move a start time.
pub fn detect_overlaps(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            let mut updated = task.clone();
            updated.is_overlapping = tasks
                .iter()
                .any(|other| other.id != task.id && task.overlaps(other));
            updated
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::color_for_index;
    use chrono::{NaiveDate, NaiveDateTime, Utc};

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn task(id: &str, start: NaiveDateTime, minutes: i64, locked: bool) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            duration_minutes: minutes,
            start_time: start,
            is_locked: locked,
            is_overlapping: false,
            order: 0,
            created_at: Utc::now(),
            color: color_for_index(0),
        }
    }

    #[test]
    fn sequential_tasks_are_not_flagged() {
        let tasks = vec![task("a", at(8, 0), 60, false), task("b", at(9, 0), 60, false)];
        let flagged = detect_overlaps(&tasks);
        assert!(flagged.iter().all(|t| !t.is_overlapping));
    }

    #[test]
    fn intersecting_pair_is_flagged_symmetrically() {
        let tasks = vec![task("a", at(8, 0), 90, false), task("b", at(9, 0), 60, false)];
        let flagged = detect_overlaps(&tasks);
        assert!(flagged.iter().all(|t| t.is_overlapping));
    }

    #[test]
    fn lock_state_does_not_matter() {
        let tasks = vec![task("a", at(8, 0), 90, true), task("b", at(9, 0), 60, true)];
        let flagged = detect_overlaps(&tasks);
        assert!(flagged.iter().all(|t| t.is_overlapping));
    }

    #[test]
    fn stale_flags_are_cleared() {
        let mut a = task("a", at(8, 0), 60, false);
        a.is_overlapping = true;
        let flagged = detect_overlaps(&[a]);
        assert!(!flagged[0].is_overlapping);
    }
}
