//! `craft install`: put the design system into the current project.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, instrument};

use craft_adapters::{LocalFilesystem, SystemRunner, builtin_payload};
use craft_core::prelude::*;

use crate::{
    cli::{GlobalArgs, InstallArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::terminal_prompter,
};

#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(
    args: InstallArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = resolve_root(global.cwd.as_deref())?;
    let options = install_options(args, &config);

    let service = InstallService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemRunner::new()),
        terminal_prompter(!output.supports_color()),
        Box::new(output.clone()),
        builtin_payload()?,
    );

    let outcome = service
        .install(&root, &options)
        .with_cli_context(|| format!("installing into {}", root.display()))?;

    match outcome {
        InstallOutcome::Done(report) => render_report(&output, &root, &report)?,
        InstallOutcome::Aborted => render_aborted(&output)?,
        InstallOutcome::Planned(plan) => render_plan(&output, &root, &plan)?,
    }
    Ok(())
}

/// Flags win over config; config wins over built-in defaults.
fn install_options(args: InstallArgs, config: &AppConfig) -> InstallOptions {
    InstallOptions {
        component_name: args.name,
        default_component_name: config.defaults.component_name.clone(),
        assume_yes: args.yes || config.install.assume_yes,
        skip_dependencies: args.skip_deps || config.install.skip_dependencies,
        dry_run: args.dry_run,
    }
}

fn resolve_root(cwd: Option<&Path>) -> CliResult<PathBuf> {
    let root = match cwd {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().with_cli_context(|| "reading the current directory")?,
    };
    if !root.is_dir() {
        return Err(CliError::ProjectDirNotFound { path: root });
    }
    Ok(root)
}

/// `@/components/ds` style import specifier for the installed directory.
fn import_path(root: &Path, component_dir: &Path) -> String {
    let relative = component_dir.strip_prefix(root).unwrap_or(component_dir);
    let relative = relative.strip_prefix("src").unwrap_or(relative);
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("@/{}", segments.join("/"))
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn describe_step(step: &StepOutcome) -> String {
    match step {
        StepOutcome::Completed => "done".into(),
        StepOutcome::NotNeeded => "not needed".into(),
        StepOutcome::Skipped(reason) => format!("skipped ({reason})"),
        StepOutcome::Failed(error) => format!("failed: {error}"),
    }
}

fn render_report(output: &OutputManager, root: &Path, report: &InstallReport) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "status": if report.is_complete() { "installed" } else { "partial" },
            "component": report.component.as_str(),
            "directory": report.component_dir,
            "package_manager": report.package_manager.as_str(),
            "previous": report.previous.to_string(),
            "backup": report.backup,
            "files_written": report.files_written,
            "dependencies": describe_step(&report.dependencies),
            "ui_kit": describe_step(&report.ui_kit),
            "styling": describe_step(&report.styling),
            "advisories": report.advisories,
        }))?;
        return Ok(());
    }

    output.print("")?;
    if report.is_complete() {
        output.success(&report.summary())?;
    } else {
        output.warning(&report.summary())?;
        for error in report.warnings() {
            output.warning(&error.to_string())?;
        }
    }

    if let Some(backup) = &report.backup {
        output.info(&format!(
            "Previous version kept at {}",
            relative_display(root, backup)
        ))?;
    }

    let import = import_path(root, &report.component_dir);
    output.print("")?;
    output.header("Next steps:")?;
    output.print(&format!(
        "  import {{ Main, Section, Container }} from \"{import}\";"
    ))?;
    output.print(&format!("  import {{ Prose }} from \"{import}\";"))?;
    if matches!(report.dependencies, StepOutcome::Skipped(_)) {
        output.print(
            "  Packages were not installed; run `craft` again without --skip-deps to add them.",
        )?;
    }
    Ok(())
}

fn render_aborted(output: &OutputManager) -> CliResult<()> {
    info!("Installation declined");
    if output.format() == OutputFormat::Json {
        output.json(&json!({ "status": "aborted" }))?;
    }
    Ok(())
}

fn render_plan(output: &OutputManager, root: &Path, plan: &InstallPlan) -> CliResult<()> {
    let target = plan.destination.join(plan.component.as_str());
    let files: Vec<String> = plan
        .files
        .iter()
        .map(|f| relative_display(root, f))
        .collect();

    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "status": "planned",
            "component": plan.component.as_str(),
            "directory": target,
            "create_directory": !plan.destination_exists,
            "package_manager": plan.package_manager.as_str(),
            "state": plan.state.to_string(),
            "files": files,
            "missing_runtime": plan.gap.runtime(),
            "missing_development": plan.gap.development(),
            "advisories": plan.advisories,
        }))?;
        return Ok(());
    }

    output.header("Dry run, nothing was changed")?;
    output.print(&format!(
        "  Destination:     {}{}",
        relative_display(root, &target),
        if plan.destination_exists {
            ""
        } else {
            " (directory will be created)"
        }
    ))?;
    output.print(&format!("  Current state:   {}", plan.state))?;
    output.print(&format!("  Package manager: {}", plan.package_manager))?;
    if plan.state.existing_path().is_some() {
        output.print("  The existing install would be backed up first.")?;
    }
    output.print("  Files:")?;
    for file in &files {
        output.print(&format!("    {file}"))?;
    }
    if plan.gap.is_empty() {
        output.print("  Dependencies:    all declared")?;
    } else {
        output.print(&format!("  Would add:       {}", plan.gap))?;
    }
    Ok(())
}
