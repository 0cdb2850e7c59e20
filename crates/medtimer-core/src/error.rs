//! Core error types for medtimer-core.
//!
//! This module defines the error hierarchy using thiserror. The only hard
//! validation in the domain is the non-empty medicine name; operations on
//! unknown medicine ids degrade to no-ops and are expressed with `Option`
//! return values, never as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for medtimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report generation errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Medicine name is empty or whitespace-only
    #[error("Medicine name must not be empty")]
    EmptyName,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configuration directory cannot be determined or created
    #[error("Cannot prepare configuration directory: {0}")]
    DirUnavailable(String),
}

/// Report serialization errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Requested format name is not a known serializer
    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    /// Underlying write failed
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
