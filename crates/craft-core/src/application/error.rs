//! Application layer errors.
//!
//! These errors represent failures while orchestrating the install, almost
//! all of them raised after the host project was validated. Pre-flight
//! errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during install orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Generic filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Moving the previous install aside failed. Nothing was written.
    #[error("Could not back up {}: {reason}", path.display())]
    BackupFailed { path: PathBuf, reason: String },

    /// Putting the previous install back failed. The backup is still on disk.
    ///
    /// `cause` is the failure that made the restore necessary.
    #[error(
        "Could not restore {} from backup {}: {reason}{}",
        original.display(),
        backup.display(),
        describe_cause(cause.as_deref())
    )]
    RestoreFailed {
        original: PathBuf,
        backup: PathBuf,
        reason: String,
        cause: Option<String>,
    },

    /// Writing a payload file failed.
    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    /// The package manager could not add the missing dependencies.
    #[error("Dependency installation failed: `{command}` {}", describe_status(*status))]
    DependencyInstallFailed {
        command: String,
        status: Option<i32>,
    },

    /// The UI-kit init command failed.
    #[error("UI kit setup failed: `{command}` {}", describe_status(*status))]
    UiKitInitFailed {
        command: String,
        status: Option<i32>,
    },

    /// A subprocess could not be started at all.
    #[error("Could not run `{command}`: {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// Reading an answer from the user failed.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

fn describe_cause(cause: Option<&str>) -> String {
    cause
        .map(|cause| format!(" (restoring after: {cause})"))
        .unwrap_or_default()
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "did not complete".into(),
    }
}

impl ApplicationError {
    /// `true` when the failure must stop the install.
    ///
    /// Dependency and UI-kit failures are reported as warnings; the asset
    /// files are still installed.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::DependencyInstallFailed { .. }
                | Self::UiKitInitFailed { .. }
                | Self::CommandSpawnFailed { .. }
        )
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::BackupFailed { path, .. } => vec![
                format!("Nothing was changed; {} is untouched", path.display()),
                "Check write permissions on the components directory".into(),
            ],
            Self::RestoreFailed {
                original, backup, ..
            } => vec![
                format!("Your previous install is preserved at {}", backup.display()),
                "Automatic recovery failed; restore it manually:".into(),
                format!("  rm -rf {}", original.display()),
                format!("  mv {} {}", backup.display(), original.display()),
            ],
            Self::WriteFailed { path, .. } => vec![
                format!("Could not write: {}", path.display()),
                "Any previous install was restored".into(),
                "Check available disk space and permissions".into(),
            ],
            Self::DependencyInstallFailed { command, .. } | Self::UiKitInitFailed { command, .. } => {
                vec![
                    "Check the package manager output above".into(),
                    format!("Retry manually: {command}"),
                ]
            }
            Self::CommandSpawnFailed { command, .. } => vec![
                "Ensure the package manager is installed and in your PATH".into(),
                format!("Retry manually: {command}"),
            ],
            Self::PromptFailed { .. } => vec![
                "Run in an interactive terminal, or pass --yes to accept defaults".into(),
            ],
            Self::LockPoisoned => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PromptFailed { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::Internal,
        }
    }
}
