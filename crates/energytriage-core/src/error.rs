//! Core error types for energytriage-core.
//!
//! Every fallible operation in the library returns one of these. None of
//! them is retried, and a failed operation leaves the task store untouched.

use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskId;

/// Core error type for energytriage-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input at the create boundary
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator referenced a task id the store never issued
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors raised while turning a draft into a task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or whitespace only
    #[error("Task name must not be empty")]
    EmptyName,

    /// Estimated minutes below zero
    #[error("Estimated minutes must be non-negative, got {0}")]
    NegativeMinutes(i64),

    /// Estimated minutes beyond what a task can carry
    #[error("Estimated minutes out of range: {0}")]
    MinutesOutOfRange(i64),

    /// Raw minutes text that is not an integer
    #[error("Estimated minutes must be a whole number, got '{0}'")]
    InvalidMinutes(String),

    /// Unknown energy level label
    #[error("Invalid energy level '{0}': expected high, medium or low")]
    InvalidEnergy(String),

    /// Unknown priority label
    #[error("Invalid priority '{0}': expected high, medium or low")]
    InvalidPriority(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
