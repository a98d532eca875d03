//! Core error types for timeblock-core.
//!
//! Rejected gestures (locked-task violations, missing ids, self-targets)
//! are not errors: operations report them as boolean or `None` sentinels
//! and leave state untouched. The variants here cover the storage and
//! configuration boundaries, where a real failure can occur.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeblock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the schedule document
    #[error("Failed to load schedule from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the schedule document
    #[error("Failed to save schedule to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Document did not match any known schema shape
    #[error("Failed to parse schedule document: {0}")]
    ParseFailed(String),

    /// Document declared a schema version this build does not know
    #[error("Unknown schedule schema version: {0}")]
    UnknownSchemaVersion(u64),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A task title must be a non-empty display string
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
