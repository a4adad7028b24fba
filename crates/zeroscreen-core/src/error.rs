//! Core error types for zeroscreen-core.
//!
//! This module defines the error hierarchy using thiserror. Scoring itself
//! never fails except on overflow; everything else comes from input
//! validation or the backing store.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zeroscreen-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid input, rejected before it reaches the score engine
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Cumulative points would leave the representable range
    #[error("Point total overflow: {current} + {delta} does not fit in an i64")]
    ArithmeticOverflow { current: i64, delta: i64 },

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A persisted value could not be decoded
    #[error("Corrupt value stored under '{key}': {value}")]
    CorruptValue { key: String, value: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not resolve the data directory
    #[error("Cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Duration outside what the hour/minute picker can produce
    #[error("Duration of {seconds} seconds for '{field}' is out of range (max {max} seconds)")]
    DurationOutOfRange {
        field: &'static str,
        seconds: u64,
        max: u64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Onboarding operation called from the wrong step
    #[error("Onboarding cannot {action} while at step {step}")]
    WrongOnboardingStep {
        action: &'static str,
        step: &'static str,
    },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
