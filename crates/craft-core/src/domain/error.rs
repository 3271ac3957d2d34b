// ============================================================================
// domain/error.rs - PRE-FLIGHT ERROR DOMAIN
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// Everything here is raised before the installer touches the filesystem,
/// so none of these errors ever require recovery.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Host project checks
    // ========================================================================
    #[error("No package.json found in {}", root.display())]
    NotAHostProject { root: PathBuf },

    #[error("This project doesn't declare '{framework}' as a dependency")]
    MissingFramework { framework: String },

    #[error("Could not parse manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    // ========================================================================
    // Input validation
    // ========================================================================
    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName { name: String, reason: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Duplicate path in payload: {path}")]
    DuplicatePath { path: String },

    #[error("Path must stay relative to the install directory: {path}")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotAHostProject { root } => vec![
                format!("Looked for package.json in {}", root.display()),
                "Run this command from the root of a Next.js project".into(),
                "Or point at the project with --cwd <DIR>".into(),
            ],
            Self::MissingFramework { framework } => vec![
                format!("Add '{framework}' to dependencies or devDependencies"),
                format!("Example: npm install {framework}"),
            ],
            Self::InvalidManifest { path, .. } => vec![
                format!("Check that {} is valid JSON", path.display()),
                "dependencies and devDependencies must map names to version strings".into(),
            ],
            Self::InvalidComponentName { .. } => vec![
                "Use letters, digits, '-' and '_' only".into(),
                "Examples: ds, craft, design-system".into(),
            ],
            _ => vec!["This is likely a packaging problem, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotAHostProject { .. } => ErrorCategory::NotFound,
            Self::MissingFramework { .. }
            | Self::InvalidManifest { .. }
            | Self::InvalidComponentName { .. } => ErrorCategory::Validation,
            Self::InvalidPayload(_) | Self::DuplicatePath { .. } | Self::PathEscapesRoot { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
