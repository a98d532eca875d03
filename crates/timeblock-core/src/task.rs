//! Task types for the day planner.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::DayKey;

/// Background colors cycled through as tasks are created. Display
/// passthrough only; scheduling never reads them.
pub const TASK_COLORS: [&str; 5] = ["#E8F5E9", "#C8E6C9", "#A5D6A7", "#81C784", "#66BB6A"];

/// Pick the palette color for the `index`-th task created on a day.
pub fn color_for_index(index: usize) -> String {
    TASK_COLORS[index % TASK_COLORS.len()].to_string()
}

/// A schedulable unit placed on one calendar day's timeline.
///
/// `start_time` and `is_overlapping` are derived: the reflow engine and
/// overlap detector recompute them after every committed mutation. While
/// `is_locked` is set, `start_time` is authoritative and reflow schedules
/// the other tasks around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub duration_minutes: i64,
    pub start_time: NaiveDateTime,
    pub is_locked: bool,
    pub is_overlapping: bool,
    /// Position in the day's sequence. Dense 0..N-1 after any committed
    /// operation.
    pub order: usize,
    pub created_at: DateTime<Utc>,
    pub color: String,
}

impl Task {
    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::minutes(self.duration_minutes)
    }

    /// Strict interval intersection with another task.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_time < other.end_time() && self.end_time() > other.start_time
    }

    /// Strict intersection with an arbitrary `[start, end)` interval.
    pub fn overlaps_interval(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time() > start
    }
}

/// User-supplied fields for a task about to be created. The duration is
/// rounded up to the quarter-hour grid and the remaining fields are filled
/// in by the store when the insert commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub is_locked: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            title: title.into(),
            duration_minutes,
            is_locked: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }
}

/// In-memory planner state: the selected day plus every day's task list.
#[derive(Debug, Clone, Default)]
pub struct PlannerState {
    pub selected_day: Option<DayKey>,
    pub tasks_by_day: std::collections::HashMap<DayKey, Vec<Task>>,
}

impl PlannerState {
    pub fn tasks_for(&self, day: DayKey) -> &[Task] {
        self.tasks_by_day.get(&day).map(Vec::as_slice).unwrap_or_default()
    }
}
