//! End-to-end runs of the `craft` binary against temporary projects.
//!
//! Every install here passes `--skip-deps`, so no package manager is spawned.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn craft() -> Command {
    let mut cmd = Command::cargo_bin("craft").unwrap();
    cmd.arg("--no-color").env_remove("RUST_LOG");
    cmd
}

fn next_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "site",
  "dependencies": { "next": "14.2.3", "react": "18.2.0" },
  "devDependencies": { "tailwindcss": "3.4.1" }
}"#,
    )
    .unwrap();
    dir
}

fn backups_in(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.contains(".backup-"))
        .collect()
}

#[test]
fn help_lists_subcommands() {
    craft()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("completions"))
        .stdout(predicate::str::contains("--skip-deps"));
}

#[test]
fn version_flag() {
    craft()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn fresh_install_writes_every_module() {
    let project = next_project();

    craft()
        .args(["--yes", "--skip-deps", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Craft installed in"))
        .stdout(predicate::str::contains("@/components/ds"));

    let ds = project.path().join("components/ds");
    for file in ["index.ts", "types.ts", "layout.tsx", "prose.tsx"] {
        assert!(ds.join(file).is_file(), "{file} missing");
    }
    assert!(backups_in(&project.path().join("components")).is_empty());
}

#[test]
fn install_subcommand_with_custom_name() {
    let project = next_project();

    craft()
        .args(["install", "--yes", "--skip-deps", "--name", "ui", "-C"])
        .arg(project.path())
        .assert()
        .success();

    assert!(project.path().join("components/ui/index.ts").is_file());
    assert!(!project.path().join("components/ds").exists());
}

#[test]
fn src_components_directory_is_preferred() {
    let project = next_project();
    fs::create_dir_all(project.path().join("src/components")).unwrap();

    craft()
        .args(["--yes", "--skip-deps", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("@/components/ds"));

    assert!(project.path().join("src/components/ds/index.ts").is_file());
    assert!(!project.path().join("components").exists());
}

#[test]
fn legacy_file_is_migrated_and_kept() {
    let project = next_project();
    let components = project.path().join("components");
    fs::create_dir_all(&components).unwrap();
    fs::write(components.join("ds.tsx"), "export const legacy = true;\n").unwrap();

    craft()
        .args(["--yes", "--skip-deps", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated legacy ds.tsx"));

    assert!(!components.join("ds.tsx").exists());
    assert!(components.join("ds/index.ts").is_file());

    let backups = backups_in(&components);
    assert_eq!(backups.len(), 1, "{backups:?}");
    assert!(backups[0].starts_with("ds.tsx.backup-"));
    assert_eq!(
        fs::read_to_string(components.join(&backups[0])).unwrap(),
        "export const legacy = true;\n"
    );
}

#[test]
fn reinstall_backs_up_previous_directory() {
    let project = next_project();

    for _ in 0..2 {
        craft()
            .args(["--yes", "--skip-deps", "-C"])
            .arg(project.path())
            .assert()
            .success();
    }

    let components = project.path().join("components");
    assert!(components.join("ds/index.ts").is_file());
    let backups = backups_in(&components);
    assert_eq!(backups.len(), 1, "{backups:?}");
    assert!(components.join(&backups[0]).join("index.ts").is_file());
}

#[test]
fn declining_replacement_changes_nothing() {
    let project = next_project();
    let ds = project.path().join("components/ds");
    fs::create_dir_all(&ds).unwrap();
    fs::write(ds.join("custom.tsx"), "mine").unwrap();

    craft()
        .args(["--skip-deps", "--name", "ds", "-C"])
        .arg(project.path())
        .write_stdin("n\n")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(ds.join("custom.tsx")).unwrap(), "mine");
    assert!(!ds.join("index.ts").exists());
    assert!(backups_in(&project.path().join("components")).is_empty());
}

#[test]
fn declining_with_json_output_reports_aborted() {
    let project = next_project();
    let ds = project.path().join("components/ds");
    fs::create_dir_all(&ds).unwrap();
    fs::write(ds.join("custom.tsx"), "mine").unwrap();

    let output = craft()
        .args(["--output-format", "json", "--skip-deps", "--name", "ds", "-C"])
        .arg(project.path())
        .write_stdin("n\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document, serde_json::json!({ "status": "aborted" }));
    assert!(!ds.join("index.ts").exists());
}

#[test]
fn piped_empty_stdin_accepts_defaults() {
    let project = next_project();

    craft()
        .args(["--skip-deps", "-C"])
        .arg(project.path())
        .write_stdin("")
        .assert()
        .success();

    assert!(project.path().join("components/ds/index.ts").is_file());
}

#[test]
fn dry_run_touches_nothing() {
    let project = next_project();

    craft()
        .args(["--dry-run", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("index.ts"))
        .stdout(predicate::str::contains("clsx"));

    assert!(!project.path().join("components").exists());
}

#[test]
fn dry_run_json_output() {
    let project = next_project();

    let output = craft()
        .args(["--output-format", "json", "--dry-run", "-C"])
        .arg(project.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["status"], "planned");
    assert_eq!(plan["component"], "ds");
    assert_eq!(plan["package_manager"], "pnpm");
    assert!(
        plan["missing_runtime"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "clsx")
    );
}

#[test]
fn lockfile_selects_package_manager() {
    let project = next_project();
    fs::write(project.path().join("yarn.lock"), "").unwrap();

    craft()
        .args(["--dry-run", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Package manager: yarn"));
}

#[test]
fn tailwind_config_gets_plugins() {
    let project = next_project();
    fs::write(
        project.path().join("tailwind.config.js"),
        "module.exports = {\n  content: [],\n  plugins: [],\n};\n",
    )
    .unwrap();

    craft()
        .args(["--yes", "--skip-deps", "-C"])
        .arg(project.path())
        .assert()
        .success();

    let config = fs::read_to_string(project.path().join("tailwind.config.js")).unwrap();
    assert!(config.contains("@tailwindcss/typography"));
    assert!(config.contains("tailwindcss-animate"));
}

#[test]
fn config_defaults_come_from_file_and_env() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("craft.toml");
    fs::write(&file, "[defaults]\ncomponent_name = \"ui\"\n").unwrap();

    craft()
        .arg("--config")
        .arg(&file)
        .args(["config", "get", "defaults.component_name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ui\n"));

    craft()
        .arg("--config")
        .arg(&file)
        .env("CRAFT__DEFAULTS__COMPONENT_NAME", "kit")
        .args(["config", "get", "defaults.component_name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("kit\n"));
}

#[test]
fn config_default_name_is_used_for_install() {
    let project = next_project();

    craft()
        .env("CRAFT__DEFAULTS__COMPONENT_NAME", "kit")
        .args(["--yes", "--skip-deps", "-C"])
        .arg(project.path())
        .assert()
        .success();

    assert!(project.path().join("components/kit/index.ts").is_file());
}

#[test]
fn config_list_and_path() {
    craft()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("component_name"))
        .stdout(predicate::str::contains("[install]"));

    craft()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toml"));
}

#[test]
fn bash_completions_mention_binary() {
    craft()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("craft"));
}
