//! Serialization boundary between in-memory tasks and the persisted
//! document.
//!
//! In memory a task carries typed time values; on disk every timestamp is
//! an explicit string. The pair of functions here is the only place that
//! conversion happens.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::migrations::SCHEMA_VERSION;
use crate::error::StorageError;
use crate::task::{color_for_index, PlannerState, Task};
use crate::time::DayKey;

/// Start times are local wall clock, serialized without an offset.
const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// One task as it appears in the persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedTask {
    pub id: String,
    pub title: String,
    pub duration_minutes: i64,
    pub start_time: String,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_overlapping: bool,
    #[serde(default)]
    pub order: usize,
    pub created_at: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Current persisted document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaV2 {
    pub version: u64,
    pub selected_day: Option<String>,
    pub tasks_by_day: BTreeMap<String, Vec<PersistedTask>>,
}

pub fn encode_task(task: &Task) -> PersistedTask {
    PersistedTask {
        id: task.id.clone(),
        title: task.title.clone(),
        duration_minutes: task.duration_minutes,
        start_time: task.start_time.format(START_TIME_FORMAT).to_string(),
        is_locked: task.is_locked,
        is_overlapping: task.is_overlapping,
        order: task.order,
        created_at: task.created_at.to_rfc3339(),
        color: Some(task.color.clone()),
    }
}

/// Decode one persisted task. `index` picks the fallback palette color
/// for records written before colors existed.
pub fn decode_task(record: &PersistedTask, index: usize) -> Result<Task, StorageError> {
    Ok(Task {
        id: record.id.clone(),
        title: record.title.clone(),
        duration_minutes: record.duration_minutes,
        start_time: parse_start_time(&record.start_time)?,
        is_locked: record.is_locked,
        is_overlapping: record.is_overlapping,
        order: record.order,
        created_at: parse_created_at(&record.created_at)?,
        color: record
            .color
            .clone()
            .unwrap_or_else(|| color_for_index(index)),
    })
}

pub fn encode_state(state: &PlannerState) -> SchemaV2 {
    let mut tasks_by_day = BTreeMap::new();
    for (day, tasks) in &state.tasks_by_day {
        tasks_by_day.insert(day.to_string(), tasks.iter().map(encode_task).collect());
    }
    SchemaV2 {
        version: SCHEMA_VERSION,
        selected_day: state.selected_day.map(|d| d.to_string()),
        tasks_by_day,
    }
}

pub fn decode_state(doc: &SchemaV2) -> Result<PlannerState, StorageError> {
    let selected_day = match &doc.selected_day {
        Some(raw) => Some(parse_day_key(raw)?),
        None => None,
    };

    let mut tasks_by_day = std::collections::HashMap::new();
    for (raw_day, records) in &doc.tasks_by_day {
        let day = parse_day_key(raw_day)?;
        let tasks = records
            .iter()
            .enumerate()
            .map(|(index, record)| decode_task(record, index))
            .collect::<Result<Vec<_>, _>>()?;
        tasks_by_day.insert(day, tasks);
    }

    Ok(PlannerState { selected_day, tasks_by_day })
}

fn parse_day_key(raw: &str) -> Result<DayKey, StorageError> {
    raw.parse()
        .map_err(|e| StorageError::ParseFailed(format!("bad day key '{raw}': {e}")))
}

/// Older documents wrote start times with a trailing offset; the literal
/// clock reading is kept and the offset discarded, since reflow re-derives
/// every unlocked time anyway.
fn parse_start_time(raw: &str) -> Result<NaiveDateTime, StorageError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_local()))
        .map_err(|e| StorageError::ParseFailed(format!("bad start_time '{raw}': {e}")))
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::ParseFailed(format!("bad created_at '{raw}': {e}")))
}
