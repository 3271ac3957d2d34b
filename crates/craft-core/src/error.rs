//! The error type every core operation returns.
//!
//! [`CraftError::Domain`] means the project was rejected before anything
//! changed; [`CraftError::Application`] means a step of the install failed.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Craft Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CraftError {
    /// Pre-flight errors (the project is not installable).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors while installing.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl CraftError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` if the error was raised before anything was mutated.
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CraftResult<T> = Result<T, CraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_preflight() {
        let err: CraftError = DomainError::MissingFramework {
            framework: "next".into(),
        }
        .into();
        assert!(err.is_preflight());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(
            err.to_string(),
            "This project doesn't declare 'next' as a dependency"
        );
    }

    #[test]
    fn application_errors_keep_their_suggestions() {
        let err: CraftError = ApplicationError::BackupFailed {
            path: "/p/components/ds".into(),
            reason: "denied".into(),
        }
        .into();
        assert!(!err.is_preflight());
        assert!(!err.suggestions().is_empty());
    }
}
