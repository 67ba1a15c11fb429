//! Error types for venvup operations.
//!
//! This module defines [`VenvupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VenvupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `VenvupError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for venvup operations.
#[derive(Debug, Error)]
pub enum VenvupError {
    /// Configuration file explicitly requested but not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The project root could not be determined.
    #[error("Cannot resolve project root from {path}: {message}")]
    RootResolution { path: PathBuf, message: String },

    /// No usable base interpreter was found.
    #[error("No Python interpreter found (tried: {})", candidates.join(", "))]
    InterpreterNotFound { candidates: Vec<String> },

    /// The environment exists but cannot be activated.
    #[error("Cannot activate environment: {path} is missing")]
    ActivationFailed { path: PathBuf },

    /// Child process failed or could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Child process could not be started at all.
    #[error("Failed to start {command}: {message}")]
    SpawnFailed { command: String, message: String },

    /// A setup step failed.
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VenvupError {
    /// Whether this error comes from configuration or root resolution
    /// rather than from running a step.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::RootResolution { .. }
        )
    }
}

/// Result type alias for venvup operations.
pub type Result<T> = std::result::Result<T, VenvupError>;
