//! JSON-file backed schedule store.

use std::path::{Path, PathBuf};

use super::{codec, data_dir, migrations, ScheduleStore};
use crate::error::StorageError;
use crate::task::PlannerState;
use crate::time::DayKey;

const SCHEDULE_FILE: &str = "schedule.json";

/// Persists the planner document as one JSON file in the app data
/// directory. Writes go through a temp file and a rename so a failed save
/// never truncates the previous document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at the default location (`~/.config/timeblock/schedule.json`).
    pub fn open_default() -> std::io::Result<Self> {
        Ok(Self { path: data_dir()?.join(SCHEDULE_FILE) })
    }

    /// Store at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleStore for JsonFileStore {
    fn load(&self) -> Result<PlannerState, StorageError> {
        if !self.path.exists() {
            return Ok(PlannerState::default());
        }

        let text = std::fs::read_to_string(&self.path).map_err(|e| StorageError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let schema = migrations::decode_document(&text)?;
        let doc = migrations::upgrade(schema, DayKey::today());
        codec::decode_state(&doc)
    }

    fn save(&self, state: &PlannerState) -> Result<(), StorageError> {
        let doc = codec::encode_state(state);
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| StorageError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .and_then(|()| std::fs::rename(&tmp, &self.path))
            .map_err(|e| StorageError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}
