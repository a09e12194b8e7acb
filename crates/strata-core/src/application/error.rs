//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An external tool could not be started or exited unsuccessfully.
    #[error("{tool} failed{}: {diagnostics}", status_suffix(.status))]
    ExternalToolFailure {
        tool: String,
        status: Option<i32>,
        diagnostics: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The isolated environment was created but is missing an executable.
    #[error("Environment at {path} is incomplete: {reason}")]
    EnvironmentIncomplete { path: PathBuf, reason: String },

    /// In-memory adapter lock was poisoned.
    #[error("Filesystem lock poisoned")]
    StoreLockError,

    /// The target project directory does not exist.
    #[error("Project directory not found: {path}")]
    ProjectNotFound { path: PathBuf },
}

fn status_suffix(status: &Option<i32>) -> String {
    status.map_or_else(String::new, |code| format!(" with exit code {code}"))
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ExternalToolFailure { tool, .. } => vec![
                format!("External command failed: {}", tool),
                "Ensure the command is installed and in your PATH".into(),
                "Check the command output above for details".into(),
                "Re-running is safe: existing files are overwritten".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::EnvironmentIncomplete { path, .. } => vec![
                format!("Inspect the environment at {}", path.display()),
                "Remove it and run the command again".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            Self::ProjectNotFound { path } => vec![
                format!("No project directory at {}", path.display()),
                "Run 'strata create-project <name>' first".into(),
                "Or point --project-dir at an existing project".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExternalToolFailure { .. } => ErrorCategory::ExternalTool,
            Self::FilesystemError { .. }
            | Self::EnvironmentIncomplete { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
            Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failure_message_includes_exit_code() {
        let err = ApplicationError::ExternalToolFailure {
            tool: "pip install".into(),
            status: Some(1),
            diagnostics: "no matching distribution".into(),
        };
        assert_eq!(
            err.to_string(),
            "pip install failed with exit code 1: no matching distribution"
        );
    }

    #[test]
    fn tool_failure_without_status_omits_code() {
        let err = ApplicationError::ExternalToolFailure {
            tool: "django-admin".into(),
            status: None,
            diagnostics: "not found".into(),
        };
        assert_eq!(err.to_string(), "django-admin failed: not found");
    }
}
