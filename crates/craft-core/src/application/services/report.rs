//! What an install run hands back to its caller.

use std::path::PathBuf;

use crate::{
    application::{ApplicationError, services::dependencies::DependencyGap},
    domain::{ComponentName, InstallPhase, InstallationState, PackageManagerKind},
};

/// Outcome of an optional sub-step that never decides overall success.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Completed,
    /// Nothing to do.
    NotNeeded,
    /// Not attempted, with the reason.
    Skipped(String),
    /// Attempted and failed; reported as a warning.
    Failed(ApplicationError),
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of a run that reached a terminal state without a fatal error.
#[derive(Debug)]
pub enum InstallOutcome {
    Done(InstallReport),
    /// The user declined to touch an existing install. Nothing changed.
    Aborted,
    /// Dry run: what would happen. Nothing changed.
    Planned(InstallPlan),
}

#[derive(Debug)]
pub struct InstallReport {
    pub component: ComponentName,
    pub destination: PathBuf,
    pub component_dir: PathBuf,
    pub package_manager: PackageManagerKind,
    pub previous: InstallationState,
    /// Where the previous install now lives, if there was one.
    pub backup: Option<PathBuf>,
    pub files_written: usize,
    pub dependencies: StepOutcome,
    pub ui_kit: StepOutcome,
    pub styling: StepOutcome,
    pub advisories: Vec<String>,
    pub trail: Vec<InstallPhase>,
}

impl InstallReport {
    pub fn is_migration(&self) -> bool {
        self.previous.is_legacy()
    }

    /// `false` when a non-fatal sub-step failed.
    pub fn is_complete(&self) -> bool {
        !(self.dependencies.is_failed() || self.ui_kit.is_failed() || self.styling.is_failed())
    }

    /// Warnings from sub-steps that failed.
    pub fn warnings(&self) -> Vec<&ApplicationError> {
        [&self.dependencies, &self.ui_kit, &self.styling]
            .into_iter()
            .filter_map(|step| match step {
                StepOutcome::Failed(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// One-line summary for the final message.
    pub fn summary(&self) -> String {
        let location = self.component_dir.display();
        let head = match &self.previous {
            InstallationState::LegacySingleFile(old) => format!(
                "Migrated legacy {} to {location}",
                old.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.component.legacy_file_name())
            ),
            InstallationState::CurrentDirectory(_) => format!("Craft reinstalled in {location}"),
            InstallationState::Absent => format!("Craft installed in {location}"),
        };

        if self.is_complete() {
            head
        } else {
            format!("{head} (partially: some follow-up steps failed)")
        }
    }
}

/// Dry-run result.
#[derive(Debug)]
pub struct InstallPlan {
    pub component: ComponentName,
    pub destination: PathBuf,
    /// `false` when the destination would have to be created.
    pub destination_exists: bool,
    pub package_manager: PackageManagerKind,
    pub state: InstallationState,
    pub gap: DependencyGap,
    pub files: Vec<PathBuf>,
    pub advisories: Vec<String>,
}
