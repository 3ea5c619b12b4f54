//! Application layer errors.
//!
//! These errors represent failures in orchestration — loading a template
//! source, writing the destination tree — not business logic. Business logic
//! errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template source could not be loaded.
    #[error("Template source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// Template manifest is missing or malformed.
    #[error("Invalid template manifest at {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    /// Required parameters were not supplied and have no defaults.
    #[error("Missing required parameters: {}", names.join(", "))]
    MissingParameters { names: Vec<String> },

    /// Destination file already exists and overwrite was not requested.
    #[error("Destination already contains {path}")]
    DestinationConflict { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// Render was cancelled between entries.
    #[error("Render cancelled")]
    Cancelled,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SourceUnavailable { reason } => vec![
                format!("Could not load the template: {}", reason),
                "Check that the template directory exists and is readable".into(),
            ],
            Self::InvalidManifest { path, .. } => vec![
                format!("Fix the manifest at: {}", path.display()),
                "See the template.toml format in the documentation".into(),
            ],
            Self::MissingParameters { names } => names
                .iter()
                .map(|n| format!("Supply it with: --param {n}=<value>"))
                .collect(),
            Self::DestinationConflict { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --overwrite to replace existing files (destructive)".into(),
                "Or render into an empty destination".into(),
            ],
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::Cancelled => vec![
                "The render was cancelled".into(),
                "Entries written before cancellation are left in place".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceUnavailable { .. } => ErrorCategory::NotFound,
            Self::InvalidManifest { .. } => ErrorCategory::Configuration,
            Self::MissingParameters { .. } => ErrorCategory::Validation,
            Self::DestinationConflict { .. } => ErrorCategory::Conflict,
            Self::Io { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::Validation,
        }
    }
}
