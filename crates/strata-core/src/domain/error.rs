// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and retries can hold them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Name validation
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Unknown environment '{0}'")]
    UnknownEnvironment(String),

    // ========================================================================
    // File set invariants
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Duplicate path in file set: {path}")]
    DuplicatePath { path: String },

    #[error("File set is empty")]
    EmptyFileSet,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use a plain directory name without path separators".into(),
                "Examples: demo, shop_backend, billing-api".into(),
            ],
            Self::InvalidModuleName { name, reason } => vec![
                format!("Module name '{}' is invalid: {}", name, reason),
                "Module names must be valid Python identifiers".into(),
                "Examples: orders, billing, user_profiles".into(),
            ],
            Self::UnknownEnvironment(_) => vec![
                "Supported environments:".into(),
                "  • dev".into(),
                "  • staging".into(),
                "  • prod".into(),
            ],
            Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::DuplicatePath { .. }
            | Self::EmptyFileSet => vec![
                "A built-in template produced an invalid file set".into(),
                "This is a bug, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidModuleName { .. }
            | Self::UnknownEnvironment(_) => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
