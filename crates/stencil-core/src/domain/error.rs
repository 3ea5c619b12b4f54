// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for reporting across layers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parameter Resolution Errors
    // ========================================================================
    #[error("parameter name cannot be empty")]
    EmptyParameterName,

    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameterValue { name: String, reason: String },

    #[error("derived parameter '{name}' collides with an existing parameter")]
    ParameterCollision { name: String },

    #[error("derived parameter '{rule}' references undefined parameter '{from}'")]
    UnknownSourceParameter { rule: String, from: String },

    #[error("cycle among derived parameters: {}", names.join(" -> "))]
    CyclicParameters { names: Vec<String> },

    // ========================================================================
    // Rendering Errors
    // ========================================================================
    #[error("unresolved token '{token}' in {origin}")]
    UnresolvedToken { token: String, origin: String },

    #[error("rendered path '{path}' is invalid: {reason}")]
    InvalidRenderedPath { path: String, reason: String },

    // ========================================================================
    // Tree Invariant Violations
    // ========================================================================
    #[error("template tree has no entries")]
    EmptyTemplate,

    #[error("duplicate path after rendering: {path}")]
    DuplicatePath { path: String },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidParameterValue { name, reason } => vec![
                format!("Parameter '{}' was rejected: {}", name, reason),
                "Values must not contain '{{', '..' segments, or absolute paths".into(),
            ],
            Self::ParameterCollision { name } => vec![
                format!("Two rules (or a rule and a user parameter) both define '{}'", name),
                "Rename the derived rule or drop the conflicting parameter".into(),
            ],
            Self::CyclicParameters { names } => vec![
                "Derived parameters must form an acyclic dependency graph".into(),
                format!("Break the cycle: {}", names.join(" -> ")),
            ],
            Self::UnknownSourceParameter { rule, from } => vec![
                format!("Rule '{}' derives from '{}', which is not defined", rule, from),
                "Declare the source parameter or fix the rule's 'from' field".into(),
            ],
            Self::UnresolvedToken { token, origin } => vec![
                format!("Token '{{{{{}}}}}' in {} has no matching parameter", token, origin),
                format!("Supply it with: --param {}=<value>", token),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two template entries rendered to the same path: {}", path),
                "Check for tokenized paths that collapse to one value".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyParameterName | Self::InvalidParameterValue { .. } => {
                ErrorCategory::Validation
            }
            Self::ParameterCollision { .. }
            | Self::UnknownSourceParameter { .. }
            | Self::CyclicParameters { .. } => ErrorCategory::Configuration,
            Self::UnresolvedToken { .. } | Self::InvalidRenderedPath { .. } => {
                ErrorCategory::Validation
            }
            Self::EmptyTemplate | Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
