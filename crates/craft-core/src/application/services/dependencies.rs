//! Dependency gap computation and package-manager invocation.

use std::fmt;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandSpec, DependencyGroup, PackageManagerKind, ProjectContext, Requirement},
};

/// Required packages the host manifest does not declare yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGap {
    runtime: Vec<String>,
    development: Vec<String>,
}

impl DependencyGap {
    pub fn runtime(&self) -> &[String] {
        &self.runtime
    }

    pub fn development(&self) -> &[String] {
        &self.development
    }

    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.development.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runtime.len() + self.development.len()
    }
}

impl fmt::Display for DependencyGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all: Vec<&str> = self
            .development
            .iter()
            .chain(self.runtime.iter())
            .map(String::as_str)
            .collect();
        f.write_str(&all.join(", "))
    }
}

pub struct DependencyInstaller<'a> {
    runner: &'a dyn CommandRunner,
    root: &'a Path,
}

impl<'a> DependencyInstaller<'a> {
    pub fn new(runner: &'a dyn CommandRunner, root: &'a Path) -> Self {
        Self { runner, root }
    }

    /// Requirements missing from both manifest groups. Pure.
    pub fn compute_gap(context: &ProjectContext, required: &[Requirement]) -> DependencyGap {
        let mut gap = DependencyGap::default();
        for requirement in required {
            if context.manifest().declares(&requirement.name) {
                continue;
            }
            let group = match requirement.group {
                DependencyGroup::Runtime => &mut gap.runtime,
                DependencyGroup::Development => &mut gap.development,
            };
            if !group.contains(&requirement.name) {
                group.push(requirement.name.clone());
            }
        }
        gap
    }

    /// Add the gap with one command per non-empty group, development first.
    ///
    /// Both groups are attempted even if the first fails; the first failure
    /// is returned.
    #[instrument(skip(self, gap), fields(packages = gap.len()))]
    pub fn install(
        &self,
        kind: PackageManagerKind,
        gap: &DependencyGap,
    ) -> Result<(), ApplicationError> {
        let groups = [
            (DependencyGroup::Development, &gap.development),
            (DependencyGroup::Runtime, &gap.runtime),
        ];

        let mut first_failure = None;
        for (group, packages) in groups {
            if packages.is_empty() {
                continue;
            }
            let command = kind.add_command(group, packages, self.root);
            if let Err(e) = self.run(&command, |command, status| {
                ApplicationError::DependencyInstallFailed { command, status }
            }) {
                warn!(error = %e, "Dependency group failed");
                first_failure.get_or_insert(e);
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Run the UI-kit init command.
    #[instrument(skip(self))]
    pub fn init_ui_kit(&self, kind: PackageManagerKind) -> Result<(), ApplicationError> {
        let command = kind.ui_kit_init_command(self.root);
        self.run(&command, |command, status| ApplicationError::UiKitInitFailed {
            command,
            status,
        })
    }

    fn run(
        &self,
        command: &CommandSpec,
        on_failure: impl FnOnce(String, Option<i32>) -> ApplicationError,
    ) -> Result<(), ApplicationError> {
        info!(command = %command, "Running");
        let status = self
            .runner
            .run(command)
            .map_err(|e| ApplicationError::CommandSpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if status.is_success() {
            Ok(())
        } else {
            Err(on_failure(command.to_string(), status.code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockCommandRunner;
    use crate::domain::{CommandStatus, Manifest};
    use mockall::predicate::function;

    fn required() -> Vec<Requirement> {
        vec![
            Requirement::runtime("clsx"),
            Requirement::runtime("tailwind-merge"),
            Requirement::development("tailwindcss"),
        ]
    }

    fn context(manifest: Manifest) -> ProjectContext {
        ProjectContext::new("/p", manifest, false)
    }

    #[test]
    fn gap_skips_declared_packages_in_either_group() {
        let ctx = context(
            Manifest::default()
                .with_dependency("next", "14.0.0")
                .with_dev_dependency("clsx", "2.0.0"),
        );
        let gap = DependencyInstaller::compute_gap(&ctx, &required());
        assert_eq!(gap.runtime(), ["tailwind-merge".to_string()]);
        assert_eq!(gap.development(), ["tailwindcss".to_string()]);
        assert_eq!(gap.to_string(), "tailwindcss, tailwind-merge");
    }

    #[test]
    fn gap_is_empty_when_everything_is_declared() {
        let ctx = context(
            Manifest::default()
                .with_dependency("clsx", "2")
                .with_dependency("tailwind-merge", "2")
                .with_dev_dependency("tailwindcss", "3"),
        );
        assert!(DependencyInstaller::compute_gap(&ctx, &required()).is_empty());
    }

    #[test]
    fn install_runs_dev_group_then_runtime_group() {
        let ctx = context(Manifest::default());
        let gap = DependencyInstaller::compute_gap(&ctx, &required());

        let mut runner = MockCommandRunner::new();
        let mut seq = mockall::Sequence::new();
        runner
            .expect_run()
            .with(function(|c: &CommandSpec| c.to_string() == "pnpm add -D tailwindcss"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandStatus::success()));
        runner
            .expect_run()
            .with(function(|c: &CommandSpec| {
                c.to_string() == "pnpm add clsx tailwind-merge"
            }))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandStatus::success()));

        let installer = DependencyInstaller::new(&runner, Path::new("/p"));
        assert!(installer.install(PackageManagerKind::Pnpm, &gap).is_ok());
    }

    #[test]
    fn failing_group_reports_exit_status_and_still_runs_the_other() {
        let ctx = context(Manifest::default());
        let gap = DependencyInstaller::compute_gap(&ctx, &required());

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(2)
            .returning(|c| {
                if c.args.contains(&"-D".to_string()) {
                    Ok(CommandStatus::exited(127))
                } else {
                    Ok(CommandStatus::success())
                }
            });

        let installer = DependencyInstaller::new(&runner, Path::new("/p"));
        let err = installer
            .install(PackageManagerKind::Npm, &gap)
            .unwrap_err();
        assert_eq!(
            err,
            ApplicationError::DependencyInstallFailed {
                command: "npm install -D tailwindcss".into(),
                status: Some(127),
            }
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn spawn_failure_is_reported_as_non_fatal() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_| {
            Err(ApplicationError::FilesystemError {
                path: "yarn".into(),
                reason: "not found".into(),
            }
            .into())
        });

        let installer = DependencyInstaller::new(&runner, Path::new("/p"));
        let err = installer.init_ui_kit(PackageManagerKind::Yarn).unwrap_err();
        assert!(matches!(err, ApplicationError::CommandSpawnFailed { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn empty_gap_runs_nothing() {
        let runner = MockCommandRunner::new();
        let installer = DependencyInstaller::new(&runner, Path::new("/p"));
        assert!(
            installer
                .install(PackageManagerKind::Pnpm, &DependencyGap::default())
                .is_ok()
        );
    }
}
