//! Install Service - main application orchestrator.
//!
//! Drives one install run through its phases:
//! 1. Validate the host project and resolve the package manager
//! 2. Resolve the destination and classify what is already there
//! 3. Confirm, back up, write the payload (restoring on failure)
//! 4. Add missing dependencies, set up the UI kit, patch the styling config
//!
//! Only steps 1 to 3 decide success. Everything in step 4 degrades to a
//! warning in the final report.

use std::path::Path;

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem, ProgressReporter, Prompter},
        services::{
            backup::{BackupManager, BackupRecord},
            components_dir::{ComponentsDirectoryResolver, ResolvedDirectory},
            dependencies::DependencyInstaller,
            file_writer::FileWriter,
            package_manager::PackageManagerResolver,
            project_validator::ProjectValidator,
            report::{InstallOutcome, InstallPlan, InstallReport, StepOutcome},
            state_detector::InstallationStateDetector,
            styling::{StylingConfigPatcher, StylingPatchOutcome},
        },
    },
    domain::{
        ComponentName, DomainValidator as validator, InstallPhase, InstallationState,
        PackageManagerKind, Payload, ProjectContext,
    },
    error::{CraftError, CraftResult},
};

const NAME_QUESTION: &str = "What should the design system directory be called?";
const UI_KIT_QUESTION: &str = "Would you like to install and configure shadcn/ui? (recommended)";

/// Per-run switches, already merged from config and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Explicit name; skips the name prompt.
    pub component_name: Option<String>,
    /// Offered as the prompt default.
    pub default_component_name: String,
    /// Answer every prompt with its default.
    pub assume_yes: bool,
    /// Skip the dependency and UI-kit sub-steps.
    pub skip_dependencies: bool,
    /// Stop after state detection and describe the plan.
    pub dry_run: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            component_name: None,
            default_component_name: ComponentName::DEFAULT.to_string(),
            assume_yes: false,
            skip_dependencies: false,
            dry_run: false,
        }
    }
}

/// Phases visited so far. Every transition is logged.
#[derive(Debug, Default)]
struct Trail(Vec<InstallPhase>);

impl Trail {
    fn enter(&mut self, phase: InstallPhase) {
        debug!(phase = %phase, "Install phase");
        self.0.push(phase);
    }

    fn fail(&mut self, error: impl Into<CraftError>) -> CraftError {
        let error = error.into();
        warn!(error = %error, "Install failed");
        self.enter(InstallPhase::Failed);
        error
    }
}

/// Main install service.
///
/// Owns its adapters and the payload it installs.
pub struct InstallService {
    fs: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    prompter: Box<dyn Prompter>,
    reporter: Box<dyn ProgressReporter>,
    payload: Payload,
}

impl InstallService {
    /// Create a new install service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use craft_core::application::{InstallOptions, InstallService};
    ///
    /// let service = InstallService::new(
    ///     filesystem, // impl Filesystem
    ///     runner,     // impl CommandRunner
    ///     prompter,   // impl Prompter
    ///     reporter,   // impl ProgressReporter
    ///     payload,    // Payload
    /// );
    /// let outcome = service.install(root, &InstallOptions::default())?;
    /// ```
    pub fn new(
        fs: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        prompter: Box<dyn Prompter>,
        reporter: Box<dyn ProgressReporter>,
        payload: Payload,
    ) -> Self {
        Self {
            fs,
            runner,
            prompter,
            reporter,
            payload,
        }
    }

    /// Install the payload into the project at `root`.
    ///
    /// `Ok` covers every non-fatal terminal state: done (possibly with
    /// warnings), aborted by the user, or planned in a dry run.
    #[instrument(skip_all, fields(root = %root.display(), dry_run = options.dry_run))]
    pub fn install(&self, root: &Path, options: &InstallOptions) -> CraftResult<InstallOutcome> {
        let mut trail = Trail::default();
        trail.enter(InstallPhase::Start);

        validator::validate_payload(&self.payload)?;
        let context = ProjectValidator::validate(&*self.fs, root)?;
        trail.enter(InstallPhase::Validated);

        let mut advisories = Vec::new();
        if let Some(advisory) = context.framework_advisory() {
            self.advise(&mut advisories, advisory);
        }

        let manager = PackageManagerResolver::resolve(&*self.fs, root);
        trail.enter(InstallPhase::ManagerResolved);
        self.reporter.info(&format!("Using {manager}"));

        let component = self
            .component_name(options)
            .map_err(|e| trail.fail(e))?;

        if ComponentsDirectoryResolver::is_monorepo(&*self.fs, root) {
            self.advise(
                &mut advisories,
                format!(
                    "Monorepo layout detected; installing into {}. Run craft inside a \
                     workspace package to install there instead",
                    root.display()
                ),
            );
        }

        if options.dry_run {
            return Ok(InstallOutcome::Planned(self.plan(
                &context, manager, component, advisories, &mut trail,
            )));
        }

        let resolved = ComponentsDirectoryResolver::resolve(&*self.fs, root)
            .map_err(|e| trail.fail(e))?;
        let destination = resolved.path.clone();
        trail.enter(InstallPhase::DestinationResolved);

        let state = InstallationStateDetector::detect(&*self.fs, &destination, &component);
        trail.enter(InstallPhase::StateDetected);
        if let Some(stray) =
            InstallationStateDetector::stray_legacy_file(&*self.fs, &destination, &component, &state)
        {
            self.advise(
                &mut advisories,
                format!(
                    "Legacy file {} was left in place; remove it once you no longer need it",
                    stray.display()
                ),
            );
        }

        if let Some(question) = state.confirmation_question(component.as_str()) {
            if !self.confirm(&question, true, options).map_err(|e| trail.fail(e))? {
                trail.enter(InstallPhase::Aborted);
                self.reporter.info("Aborted; nothing was changed");
                return Ok(InstallOutcome::Aborted);
            }
            trail.enter(InstallPhase::Confirmed);
        }

        let backups = BackupManager::new(&*self.fs);
        let record = match state.existing_path() {
            Some(existing) => {
                let record = backups.backup(existing).map_err(|e| trail.fail(e))?;
                trail.enter(InstallPhase::BackedUp);
                Some(record)
            }
            None => None,
        };

        let component_dir = InstallationStateDetector::directory_path(&destination, &component);
        let files_written = match FileWriter::new(&*self.fs).write(&self.payload, &component_dir) {
            Ok(count) => count,
            Err(cause) => {
                let error = self.recover(&backups, record, &state, &resolved, &component_dir, cause);
                return Err(trail.fail(error));
            }
        };
        trail.enter(InstallPhase::Written);

        let backup = record.map(|record| backups.commit(record));
        if let Some(kept) = &backup {
            self.reporter
                .info(&format!("Previous install kept at {}", kept.display()));
        }

        let installer = DependencyInstaller::new(&*self.runner, root);
        let dependencies = self.install_dependencies(&installer, &context, manager, options);
        let ui_kit = self.init_ui_kit(&installer, &context, manager, options);
        trail.enter(InstallPhase::DependenciesResolved);

        let styling = self.patch_styling(root, &mut advisories);
        trail.enter(InstallPhase::Done);

        let report = InstallReport {
            component,
            destination,
            component_dir,
            package_manager: manager,
            previous: state,
            backup,
            files_written,
            dependencies,
            ui_kit,
            styling,
            advisories,
            trail: trail.0,
        };
        info!(
            files = report.files_written,
            complete = report.is_complete(),
            "Install finished"
        );
        Ok(InstallOutcome::Done(report))
    }

    fn plan(
        &self,
        context: &ProjectContext,
        manager: PackageManagerKind,
        component: ComponentName,
        advisories: Vec<String>,
        trail: &mut Trail,
    ) -> InstallPlan {
        let root = context.root();
        let located = ComponentsDirectoryResolver::locate(&*self.fs, root);
        let destination_exists = located.is_some();
        let destination =
            located.unwrap_or_else(|| ComponentsDirectoryResolver::fallback(root));
        trail.enter(InstallPhase::DestinationResolved);

        let state = InstallationStateDetector::detect(&*self.fs, &destination, &component);
        trail.enter(InstallPhase::StateDetected);

        let component_dir = InstallationStateDetector::directory_path(&destination, &component);
        let files = self
            .payload
            .files()
            .iter()
            .map(|file| component_dir.join(file.path.as_path()))
            .collect();

        InstallPlan {
            gap: DependencyInstaller::compute_gap(context, self.payload.requirements()),
            component,
            destination,
            destination_exists,
            package_manager: manager,
            state,
            files,
            advisories,
        }
    }

    fn component_name(&self, options: &InstallOptions) -> CraftResult<ComponentName> {
        let raw = match &options.component_name {
            Some(name) => name.clone(),
            None if options.assume_yes || options.dry_run => {
                options.default_component_name.clone()
            }
            None => self
                .prompter
                .ask(NAME_QUESTION, &options.default_component_name)?,
        };
        Ok(raw.parse::<ComponentName>()?)
    }

    fn confirm(&self, question: &str, default: bool, options: &InstallOptions) -> CraftResult<bool> {
        if options.assume_yes {
            debug!(question, default, "Assuming default answer");
            return Ok(default);
        }
        self.prompter.confirm(question, default)
    }

    /// Undo a failed write. Returns the error to surface: the restore
    /// failure if there was one, otherwise the original cause.
    fn recover(
        &self,
        backups: &BackupManager<'_>,
        record: Option<BackupRecord>,
        state: &InstallationState,
        destination: &ResolvedDirectory,
        component_dir: &Path,
        cause: ApplicationError,
    ) -> ApplicationError {
        // The directory did not exist before this run.
        if !matches!(state, InstallationState::CurrentDirectory(_))
            && self.fs.exists(component_dir)
        {
            if let Err(e) = self.fs.remove_dir_all(component_dir) {
                warn!(error = %e, path = %component_dir.display(), "Could not remove partial install");
            }
        }

        // Only ever created on an absent install, so nothing else lives there.
        if destination.created {
            if let Err(e) = self.fs.remove_dir(&destination.path) {
                warn!(error = %e, path = %destination.path.display(), "Could not remove components directory");
            }
        }

        if let Some(record) = record {
            match backups.restore(record) {
                Ok(()) => self.reporter.info("Previous install restored"),
                Err(ApplicationError::RestoreFailed {
                    original,
                    backup,
                    reason,
                    ..
                }) => {
                    error!(write_error = %cause, backup = %backup.display(), "Previous install could not be restored");
                    return ApplicationError::RestoreFailed {
                        original,
                        backup,
                        reason,
                        cause: Some(cause.to_string()),
                    };
                }
                Err(other) => return other,
            }
        }
        cause
    }

    fn install_dependencies(
        &self,
        installer: &DependencyInstaller<'_>,
        context: &ProjectContext,
        manager: PackageManagerKind,
        options: &InstallOptions,
    ) -> StepOutcome {
        if options.skip_dependencies {
            return StepOutcome::Skipped("--skip-deps".into());
        }

        let gap = DependencyInstaller::compute_gap(context, self.payload.requirements());
        if gap.is_empty() {
            debug!("All dependencies already declared");
            return StepOutcome::NotNeeded;
        }

        self.reporter
            .info(&format!("Installing dependencies: {gap}"));
        match installer.install(manager, &gap) {
            Ok(()) => StepOutcome::Completed,
            Err(e) => {
                self.reporter.warn(&e.to_string());
                StepOutcome::Failed(e)
            }
        }
    }

    fn init_ui_kit(
        &self,
        installer: &DependencyInstaller<'_>,
        context: &ProjectContext,
        manager: PackageManagerKind,
        options: &InstallOptions,
    ) -> StepOutcome {
        if context.has_ui_kit_config() {
            return StepOutcome::NotNeeded;
        }
        if options.skip_dependencies {
            return StepOutcome::Skipped("--skip-deps".into());
        }

        match self.confirm(UI_KIT_QUESTION, true, options) {
            Ok(true) => {}
            Ok(false) => return StepOutcome::Skipped("declined".into()),
            Err(e) => {
                warn!(error = %e, "UI kit prompt failed");
                return StepOutcome::Skipped(format!("prompt failed: {e}"));
            }
        }

        match installer.init_ui_kit(manager) {
            Ok(()) => StepOutcome::Completed,
            Err(e) => {
                self.reporter.warn(&e.to_string());
                StepOutcome::Failed(e)
            }
        }
    }

    fn patch_styling(&self, root: &Path, advisories: &mut Vec<String>) -> StepOutcome {
        let patcher = StylingConfigPatcher::new(&*self.fs);
        match patcher.patch(root, self.payload.styling_plugins()) {
            Ok(StylingPatchOutcome::Patched(path)) => {
                self.reporter
                    .info(&format!("Registered styling plugins in {}", display_name(&path)));
                StepOutcome::Completed
            }
            Ok(StylingPatchOutcome::AlreadyConfigured(_)) => StepOutcome::NotNeeded,
            Ok(StylingPatchOutcome::NoConfig) => {
                StepOutcome::Skipped("no styling configuration found".into())
            }
            Ok(StylingPatchOutcome::NoPluginsArray(path)) => {
                self.advise(
                    advisories,
                    format!(
                        "{} has no plugins array; register {} manually",
                        display_name(&path),
                        self.payload.styling_plugins().join(" and ")
                    ),
                );
                StepOutcome::Skipped("no plugins array".into())
            }
            Err(e) => {
                self.reporter.warn(&e.to_string());
                StepOutcome::Failed(e)
            }
        }
    }

    fn advise(&self, advisories: &mut Vec<String>, message: String) {
        self.reporter.warn(&message);
        advisories.push(message);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
