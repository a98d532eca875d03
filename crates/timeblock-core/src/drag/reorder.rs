//! Order-mutating operations behind swap, push, and move-to-end drops.
//!
//! Every operation is pure: it either returns a fully reflowed copy of
//! the collection or `None` to signal a rejected gesture, in which case
//! the caller keeps its current state untouched. The caller runs overlap
//! detection on the result before committing.

use chrono::{Duration, NaiveDateTime};

use crate::task::Task;
use crate::time::DayKey;
use crate::timeline::reflow;

/// Exchange two tasks' positions. Only the two `order` values change.
///
/// Rejected when either id is missing, either task is locked, or both ids
/// name the same task.
pub fn swap(tasks: &[Task], id_a: &str, id_b: &str, day: DayKey) -> Option<Vec<Task>> {
    let a = tasks.iter().find(|t| t.id == id_a)?;
    let b = tasks.iter().find(|t| t.id == id_b)?;
    if a.is_locked || b.is_locked || a.id == b.id {
        return None;
    }

    let (order_a, order_b) = (a.order, b.order);
    let swapped: Vec<Task> = tasks
        .iter()
        .map(|task| {
            let mut updated = task.clone();
            if task.id == id_a {
                updated.order = order_b;
            } else if task.id == id_b {
                updated.order = order_a;
            }
            updated
        })
        .collect();

    Some(reflow(&swapped, day))
}

/// Dragged task takes the target's position; tasks strictly between the
/// two positions shift one slot toward the vacated end.
///
/// Rejected when an id is missing, when either task is locked, or when
/// the dragged task would overlap an unrelated locked task at the
/// target's current start time (the caller renders that as a snap-back).
/// That conflict check deliberately uses the target's current start, not
/// the position the dragged task would occupy after the reorder reflows.
pub fn push(tasks: &[Task], dragged_id: &str, target_id: &str, day: DayKey) -> Option<Vec<Task>> {
    let dragged = tasks.iter().find(|t| t.id == dragged_id)?;
    let target = tasks.iter().find(|t| t.id == target_id)?;
    if target.is_locked || dragged.is_locked {
        return None;
    }
    if check_locked_conflict(tasks, dragged, target.start_time, target_id) {
        return None;
    }

    let dragged_order = dragged.order;
    let target_order = target.order;
    let reordered: Vec<Task> = tasks
        .iter()
        .map(|task| {
            let mut updated = task.clone();
            if task.id == dragged_id {
                updated.order = target_order;
            } else if dragged_order < target_order
                && task.order > dragged_order
                && task.order <= target_order
            {
                // Forward drag: intermediates close the gap upward.
                updated.order = task.order - 1;
            } else if dragged_order > target_order
                && task.order >= target_order
                && task.order < dragged_order
            {
                // Backward drag: intermediates shift down.
                updated.order = task.order + 1;
            }
            updated
        })
        .collect();

    Some(reflow(&reordered, day))
}

/// Would placing `dragged` at `new_start` overlap any locked task other
/// than the drop target (and the dragged task itself)?
pub fn check_locked_conflict(
    tasks: &[Task],
    dragged: &Task,
    new_start: NaiveDateTime,
    target_id: &str,
) -> bool {
    let new_end = new_start + Duration::minutes(dragged.duration_minutes);
    tasks.iter().any(|task| {
        task.is_locked
            && task.id != dragged.id
            && task.id != target_id
            && task.overlaps_interval(new_start, new_end)
    })
}

/// Move a task to the end of the sequence, shifting everything that was
/// behind it up by one. Lets a task cross a chain of locked tasks when no
/// drop target exists beyond them.
///
/// Rejected when the id is missing, the task is locked, or it already
/// holds the maximum order.
pub fn move_to_end(tasks: &[Task], dragged_id: &str, day: DayKey) -> Option<Vec<Task>> {
    let dragged = tasks.iter().find(|t| t.id == dragged_id)?;
    if dragged.is_locked {
        return None;
    }

    let max_order = tasks.iter().map(|t| t.order).max()?;
    if dragged.order == max_order {
        return None;
    }

    let dragged_order = dragged.order;
    let reordered: Vec<Task> = tasks
        .iter()
        .map(|task| {
            let mut updated = task.clone();
            if task.id == dragged_id {
                updated.order = max_order;
            } else if task.order > dragged_order {
                updated.order = task.order - 1;
            }
            updated
        })
        .collect();

    Some(reflow(&reordered, day))
}

/// Renumber `order` to a dense 0..N-1 sequence, preserving the relative
/// ranking. The only compaction site outside insertion; used after
/// deletes.
pub fn reindex(tasks: &[Task]) -> Vec<Task> {
    let mut ranks: Vec<usize> = (0..tasks.len()).collect();
    ranks.sort_by_key(|&i| tasks[i].order);

    let mut updated: Vec<Task> = tasks.to_vec();
    for (rank, &i) in ranks.iter().enumerate() {
        updated[i].order = rank;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::color_for_index;
    use chrono::{NaiveDate, Utc};

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day() -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap())
    }

    fn task(id: &str, order: usize, minutes: i64) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            duration_minutes: minutes,
            start_time: at(8, 0),
            is_locked: false,
            is_overlapping: false,
            order,
            created_at: Utc::now(),
            color: color_for_index(order),
        }
    }

    fn locked_task(id: &str, order: usize, minutes: i64, start: NaiveDateTime) -> Task {
        let mut t = task(id, order, minutes);
        t.is_locked = true;
        t.start_time = start;
        t
    }

    fn order_of(tasks: &[Task], id: &str) -> usize {
        tasks.iter().find(|t| t.id == id).unwrap().order
    }

    fn orders_are_dense(tasks: &[Task]) -> bool {
        let mut orders: Vec<usize> = tasks.iter().map(|t| t.order).collect();
        orders.sort_unstable();
        orders == (0..tasks.len()).collect::<Vec<_>>()
    }

    #[test]
    fn swap_exchanges_exactly_two_orders() {
        let tasks = vec![task("a", 0, 60), task("b", 1, 30), task("c", 2, 90)];
        let swapped = swap(&tasks, "a", "c", day()).unwrap();
        assert_eq!(order_of(&swapped, "a"), 2);
        assert_eq!(order_of(&swapped, "c"), 0);
        assert_eq!(order_of(&swapped, "b"), 1);
        assert!(orders_are_dense(&swapped));
    }

    #[test]
    fn swap_rejects_locked_missing_and_self() {
        let tasks = vec![task("a", 0, 60), locked_task("b", 1, 60, at(9, 0))];
        assert!(swap(&tasks, "a", "b", day()).is_none());
        assert!(swap(&tasks, "a", "ghost", day()).is_none());
        assert!(swap(&tasks, "a", "a", day()).is_none());
    }

    #[test]
    fn push_forward_shifts_intermediates_up() {
        let tasks = vec![task("a", 0, 60), task("b", 1, 30), task("c", 2, 90)];
        let pushed = push(&tasks, "a", "c", day()).unwrap();
        assert_eq!(order_of(&pushed, "a"), 2);
        assert_eq!(order_of(&pushed, "b"), 0);
        assert_eq!(order_of(&pushed, "c"), 1);
        assert!(orders_are_dense(&pushed));
    }

    #[test]
    fn push_backward_shifts_intermediates_down() {
        let tasks = vec![task("a", 0, 60), task("b", 1, 30), task("c", 2, 90)];
        let pushed = push(&tasks, "c", "a", day()).unwrap();
        assert_eq!(order_of(&pushed, "c"), 0);
        assert_eq!(order_of(&pushed, "a"), 1);
        assert_eq!(order_of(&pushed, "b"), 2);
        assert!(orders_are_dense(&pushed));
    }

    #[test]
    fn push_snaps_back_on_unrelated_locked_conflict() {
        // Dragging "x" onto "y" at 08:00 would cover the 08:30 lock "z".
        let tasks = vec![
            task("y", 0, 30),
            locked_task("z", 1, 60, at(8, 30)),
            {
                let mut x = task("x", 2, 120);
                x.start_time = at(9, 30);
                x
            },
        ];
        assert!(push(&tasks, "x", "y", day()).is_none());
    }

    #[test]
    fn push_rejects_locked_participants() {
        let tasks = vec![locked_task("a", 0, 60, at(8, 0)), task("b", 1, 60)];
        assert!(push(&tasks, "a", "b", day()).is_none());
        assert!(push(&tasks, "b", "a", day()).is_none());
    }

    #[test]
    fn move_to_end_crosses_a_locked_chain() {
        let tasks = vec![
            task("a", 0, 60),
            task("b", 1, 30),
            locked_task("c", 2, 60, at(10, 0)),
        ];
        let moved = move_to_end(&tasks, "a", day()).unwrap();
        assert_eq!(order_of(&moved, "a"), 2);
        assert_eq!(order_of(&moved, "b"), 0);
        assert_eq!(order_of(&moved, "c"), 1);
        assert!(orders_are_dense(&moved));
        // The locked task did not move in time.
        assert_eq!(moved.iter().find(|t| t.id == "c").unwrap().start_time, at(10, 0));
    }

    #[test]
    fn move_to_end_rejects_locked_and_already_last() {
        let tasks = vec![task("a", 0, 60), locked_task("b", 1, 60, at(9, 0))];
        assert!(move_to_end(&tasks, "b", day()).is_none());
        let tasks = vec![task("a", 0, 60), task("b", 1, 60)];
        assert!(move_to_end(&tasks, "b", day()).is_none());
        assert!(move_to_end(&tasks, "ghost", day()).is_none());
    }

    #[test]
    fn reindex_compacts_sparse_orders() {
        let mut tasks = vec![task("a", 0, 60), task("b", 1, 30), task("c", 2, 90)];
        tasks.remove(1);
        let reindexed = reindex(&tasks);
        assert_eq!(order_of(&reindexed, "a"), 0);
        assert_eq!(order_of(&reindexed, "c"), 1);
        assert!(orders_are_dense(&reindexed));
    }

    #[test]
    fn reindex_preserves_relative_ranking() {
        // Orders left sparse and out of array sequence.
        let mut a = task("a", 5, 60);
        let b = task("b", 2, 30);
        a.start_time = at(10, 0);
        let reindexed = reindex(&[a, b]);
        assert_eq!(order_of(&reindexed, "b"), 0);
        assert_eq!(order_of(&reindexed, "a"), 1);
    }
}
