//! Persisted-document schema migrations.
//!
//! The document is decoded into a tagged schema variant by inspecting its
//! shape: the current form is an object carrying a `version`
//! discriminator, the original form was a bare task array for a single
//! implicit day. Each version transition is one pure function, applied in
//! sequence, so old documents stay readable.

use serde_json::Value;

use super::codec::{PersistedTask, SchemaV2};
use crate::error::StorageError;
use crate::task::color_for_index;
use crate::time::DayKey;

/// Current document version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: u64 = 2;

/// A decoded document of any known version.
#[derive(Debug, Clone)]
pub enum PersistedSchema {
    /// Bare task array for one implicit day (the pre-versioned shape).
    V1(Vec<PersistedTask>),
    /// Versioned multi-day document.
    V2(SchemaV2),
}

/// Decode raw JSON into a tagged schema variant.
pub fn decode_document(json: &str) -> Result<PersistedSchema, StorageError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| StorageError::ParseFailed(e.to_string()))?;

    match &value {
        Value::Array(_) => serde_json::from_value(value.clone())
            .map(PersistedSchema::V1)
            .map_err(|e| StorageError::ParseFailed(e.to_string())),
        Value::Object(map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    StorageError::ParseFailed("missing version discriminator".to_string())
                })?;
            match version {
                2 => serde_json::from_value(value.clone())
                    .map(PersistedSchema::V2)
                    .map_err(|e| StorageError::ParseFailed(e.to_string())),
                other => Err(StorageError::UnknownSchemaVersion(other)),
            }
        }
        _ => Err(StorageError::ParseFailed(
            "expected a task array or a versioned document".to_string(),
        )),
    }
}

/// Migration v1 -> v2: the bare array becomes `implicit_day`'s task list
/// and display fields absent from old records are defaulted.
pub fn migrate_v1_to_v2(mut tasks: Vec<PersistedTask>, implicit_day: DayKey) -> SchemaV2 {
    for (index, task) in tasks.iter_mut().enumerate() {
        if task.color.is_none() {
            task.color = Some(color_for_index(index));
        }
    }

    let mut tasks_by_day = std::collections::BTreeMap::new();
    tasks_by_day.insert(implicit_day.to_string(), tasks);
    SchemaV2 {
        version: SCHEMA_VERSION,
        selected_day: Some(implicit_day.to_string()),
        tasks_by_day,
    }
}

/// Bring any known schema up to the current version.
pub fn upgrade(schema: PersistedSchema, implicit_day: DayKey) -> SchemaV2 {
    match schema {
        PersistedSchema::V1(tasks) => migrate_v1_to_v2(tasks, implicit_day),
        PersistedSchema::V2(doc) => doc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap())
    }

    const V1_DOC: &str = r#"[
        {
            "id": "a",
            "title": "Old task",
            "duration_minutes": 60,
            "start_time": "2026-08-05T08:00:00.000Z",
            "is_locked": false,
            "is_overlapping": false,
            "order": 0,
            "created_at": "2026-08-01T12:00:00Z"
        }
    ]"#;

    #[test]
    fn bare_array_decodes_as_v1() {
        let schema = decode_document(V1_DOC).unwrap();
        assert!(matches!(schema, PersistedSchema::V1(ref tasks) if tasks.len() == 1));
    }

    #[test]
    fn v1_upgrade_lands_under_the_implicit_day_with_colors() {
        let schema = decode_document(V1_DOC).unwrap();
        let doc = upgrade(schema, day());
        assert_eq!(doc.version, SCHEMA_VERSION);
        assert_eq!(doc.selected_day.as_deref(), Some("2026-08-05"));
        let tasks = &doc.tasks_by_day["2026-08-05"];
        assert_eq!(tasks[0].color.as_deref(), Some(color_for_index(0).as_str()));
    }

    #[test]
    fn versioned_object_decodes_as_v2() {
        let json = r#"{"version": 2, "selected_day": null, "tasks_by_day": {}}"#;
        let schema = decode_document(json).unwrap();
        assert!(matches!(schema, PersistedSchema::V2(_)));
    }

    #[test]
    fn future_version_is_rejected_not_guessed() {
        let json = r#"{"version": 9, "tasks_by_day": {}}"#;
        assert!(matches!(
            decode_document(json),
            Err(StorageError::UnknownSchemaVersion(9))
        ));
    }

    #[test]
    fn corrupt_documents_fail_to_parse() {
        assert!(decode_document("{not json").is_err());
        assert!(decode_document("42").is_err());
        assert!(decode_document(r#"{"tasks_by_day": {}}"#).is_err());
    }
}
