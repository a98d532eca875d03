//! Planner store: owns the per-day task collections and runs every
//! mutating intent through the scheduling pipeline.
//!
//! Each intent follows the same shape: validate, rebuild the day's
//! collection as a new value, reflow, detect overlaps, then commit by
//! swapping the collection reference and persisting. A rejected intent
//! returns before any of that, so the whole operation is atomic — either
//! the full pipeline commits or nothing changes. Persistence failures are
//! logged and tolerated; the in-memory schedule stays committed.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::drag::{classify, reorder, DragAction};
use crate::error::{CoreError, ValidationError};
use crate::storage::{Config, JsonFileStore, MemoryStore, ScheduleStore};
use crate::task::{color_for_index, PlannerState, Task, TaskDraft};
use crate::time::{day_anchor, round_up_to_quarter_hour, DayKey};
use crate::timeline::{detect_overlaps, find_slot, reflow};

pub struct PlannerStore {
    state: PlannerState,
    config: Config,
    storage: Box<dyn ScheduleStore>,
}

impl PlannerStore {
    /// Build a store over the given collaborator. Malformed persisted
    /// state falls back to an empty schedule rather than propagating.
    pub fn new(storage: Box<dyn ScheduleStore>, config: Config) -> Self {
        let state = match storage.load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "failed to load schedule, starting from an empty day");
                PlannerState::default()
            }
        };
        Self { state, config, storage }
    }

    /// Store backed by the default JSON file and TOML config.
    pub fn open_default() -> Result<Self, CoreError> {
        let storage = JsonFileStore::open_default()?;
        let config = Config::load()?;
        Ok(Self::new(Box::new(storage), config))
    }

    /// Volatile store for tests and headless embedding.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Config::default())
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tasks(&self, day: DayKey) -> &[Task] {
        self.state.tasks_for(day)
    }

    pub fn selected_day(&self) -> Option<DayKey> {
        self.state.selected_day
    }

    pub fn select_day(&mut self, day: DayKey) {
        self.state.selected_day = Some(day);
        self.persist();
    }

    /// Insert a task into the earliest slot that respects locked tasks.
    ///
    /// The duration is rounded up to the quarter-hour grid; `after_hint`
    /// biases the slot search toward that task's end. Returns the new
    /// task's id.
    pub fn insert(
        &mut self,
        day: DayKey,
        after_hint: Option<&str>,
        draft: TaskDraft,
    ) -> Result<String, CoreError> {
        let task = self.new_task(day, &draft)?;
        let id = task.id.clone();

        let current = self.state.tasks_for(day);
        let slot = find_slot(current, task.duration_minutes, day, after_hint);

        let mut task = task;
        task.start_time = slot.start;

        // Splice into the order-sorted sequence, then renumber by
        // position so orders stay dense.
        let mut sequence: Vec<Task> = current.to_vec();
        sequence.sort_by_key(|t| t.order);
        let position = match &slot.insert_after {
            None => 0,
            Some(after_id) => sequence
                .iter()
                .position(|t| &t.id == after_id)
                .map(|i| i + 1)
                .unwrap_or(sequence.len()),
        };
        sequence.insert(position, task);
        for (index, task) in sequence.iter_mut().enumerate() {
            task.order = index;
        }

        self.commit(day, sequence);
        Ok(id)
    }

    /// Append a task at the end of the day's sequence.
    pub fn add(&mut self, day: DayKey, draft: TaskDraft) -> Result<String, CoreError> {
        let mut task = self.new_task(day, &draft)?;
        let id = task.id.clone();
        task.order = self.state.tasks_for(day).len();

        let mut tasks = self.state.tasks_for(day).to_vec();
        tasks.push(task);
        self.commit(day, tasks);
        Ok(id)
    }

    /// Retitle a task in place. Returns false for an unknown id.
    pub fn rename(&mut self, day: DayKey, id: &str, title: &str) -> Result<bool, CoreError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let mut tasks = self.state.tasks_for(day).to_vec();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.title = title.to_string();
        self.commit(day, tasks);
        Ok(true)
    }

    /// Remove a task; the rest of the day renumbers densely and reflows.
    /// Unknown ids are ignored.
    pub fn delete(&mut self, day: DayKey, id: &str) {
        let current = self.state.tasks_for(day);
        if !current.iter().any(|t| t.id == id) {
            return;
        }
        let remaining: Vec<Task> = current.iter().filter(|t| t.id != id).cloned().collect();
        let reindexed = reorder::reindex(&remaining);
        self.commit(day, reindexed);
    }

    /// Flip a task's lock. Locking pins the task at its current start;
    /// unlocking lets the next reflow pull it back into sequence.
    pub fn toggle_lock(&mut self, day: DayKey, id: &str) {
        let mut tasks = self.state.tasks_for(day).to_vec();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.is_locked = !task.is_locked;
        self.commit(day, tasks);
    }

    /// Exchange two tasks' positions. False means the gesture was
    /// rejected and nothing changed.
    pub fn swap(&mut self, day: DayKey, id_a: &str, id_b: &str) -> bool {
        match reorder::swap(self.state.tasks_for(day), id_a, id_b, day) {
            Some(tasks) => {
                self.commit_reflowed(day, tasks);
                true
            }
            None => false,
        }
    }

    /// Let the dragged task take the target's slot. False means snap
    /// back: the drop was rejected and nothing changed.
    pub fn push(&mut self, day: DayKey, dragged_id: &str, target_id: &str) -> bool {
        match reorder::push(self.state.tasks_for(day), dragged_id, target_id, day) {
            Some(tasks) => {
                self.commit_reflowed(day, tasks);
                true
            }
            None => false,
        }
    }

    /// Move a task to the end of the sequence, past any locked chain.
    pub fn move_to_end(&mut self, day: DayKey, dragged_id: &str) -> bool {
        match reorder::move_to_end(self.state.tasks_for(day), dragged_id, day) {
            Some(tasks) => {
                self.commit_reflowed(day, tasks);
                true
            }
            None => false,
        }
    }

    /// Interpret a finished drag gesture and dispatch it. Returns the
    /// action that actually committed; a rejected dispatch degrades to
    /// `None`, which the caller renders as a snap-back.
    pub fn drop_gesture(
        &mut self,
        day: DayKey,
        dragged_id: &str,
        target_id: Option<&str>,
        drop_relative_y: f64,
    ) -> DragAction {
        let tasks = self.state.tasks_for(day);
        let Some(dragged) = tasks.iter().find(|t| t.id == dragged_id) else {
            return DragAction::None;
        };
        let target = target_id.and_then(|id| tasks.iter().find(|t| t.id == id));

        let action = classify(dragged, target, drop_relative_y, self.config.drag.swap_threshold);
        let committed = match (action, target_id) {
            (DragAction::Swap, Some(target_id)) => self.swap(day, dragged_id, target_id),
            (DragAction::Push, Some(target_id)) => self.push(day, dragged_id, target_id),
            _ => false,
        };
        if committed {
            action
        } else {
            DragAction::None
        }
    }

    /// Clamped to [0, 1]. In-memory only; callers that want it durable
    /// save the config file.
    pub fn set_swap_threshold(&mut self, value: f64) {
        self.config.drag.set_swap_threshold(value);
    }

    fn new_task(&self, day: DayKey, draft: &TaskDraft) -> Result<Task, CoreError> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let count = self.state.tasks_for(day).len();
        Ok(Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            duration_minutes: round_up_to_quarter_hour(draft.duration_minutes),
            start_time: day_anchor(day),
            is_locked: draft.is_locked,
            is_overlapping: false,
            order: 0,
            created_at: Utc::now(),
            color: color_for_index(count),
        })
    }

    /// Reflow, detect overlaps, swap the day's collection in, persist.
    fn commit(&mut self, day: DayKey, tasks: Vec<Task>) {
        let reflowed = reflow(&tasks, day);
        self.commit_reflowed(day, reflowed);
    }

    /// Commit a collection the reorder operations already reflowed.
    fn commit_reflowed(&mut self, day: DayKey, tasks: Vec<Task>) {
        let flagged = detect_overlaps(&tasks);
        self.state.tasks_by_day.insert(day, flagged);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state) {
            // Silent degradation: the in-memory schedule is already
            // committed and stays correct, only the save is lost.
            warn!(error = %e, "failed to persist schedule");
        }
    }
}
