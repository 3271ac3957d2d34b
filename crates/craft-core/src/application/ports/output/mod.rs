//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the installer needs from the outside world.
//! The `craft-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{CommandSpec, CommandStatus};
use crate::error::CraftResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `craft_adapters::filesystem::LocalFilesystem` (production)
/// - `craft_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are absolute; the installer joins them onto the project root it
/// was handed instead of relying on the process working directory.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CraftResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> CraftResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> CraftResult<String>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Atomically rename a file or directory. Fails if `to` exists.
    fn rename(&self, from: &Path, to: &Path) -> CraftResult<()>;

    fn remove_file(&self, path: &Path) -> CraftResult<()>;

    /// Remove a directory. Fails unless it is empty.
    fn remove_dir(&self, path: &Path) -> CraftResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> CraftResult<()>;
}

/// Port for running package-manager subprocesses.
///
/// Implemented by:
/// - `craft_adapters::process::SystemRunner` (inherits stdio)
/// - `craft_adapters::process::RecordingRunner` (testing)
///
/// Blocks until the process exits. Only the exit status is inspected.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> CraftResult<CommandStatus>;
}

/// Port for synchronous question/answer prompts.
///
/// Implemented by:
/// - `craft_adapters::console::LinePrompter` (reads lines from any reader)
/// - `craft_adapters::console::ScriptedPrompter` (testing)
/// - the CLI's terminal prompter
pub trait Prompter: Send + Sync {
    /// Ask a question. Empty input yields `default`.
    fn ask(&self, question: &str, default: &str) -> CraftResult<String>;

    /// Ask a yes/no question. Empty input yields `default`.
    fn confirm(&self, question: &str, default: bool) -> CraftResult<bool> {
        let answer = self.ask(question, if default { "yes" } else { "no" })?;
        Ok(is_affirmative(&answer))
    }
}

/// `y` / `yes` in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Port for user-facing progress lines.
///
/// The installer reports what it is doing as it goes, so advisories and
/// "Running: ..." lines appear before the subprocess output they describe.
pub trait ProgressReporter: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Reporter that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

/// Mock filesystems for service unit tests.
#[cfg(test)]
pub(crate) mod fake {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::MockFilesystem;
    use crate::application::ApplicationError;

    /// Answers every existence check and read from a fixed tree. Mutating calls have
    /// no expectations, so a test panics if the code under test makes one.
    pub fn tree(files: &[(&str, &str)], dirs: &[&str]) -> MockFilesystem {
        let files: BTreeMap<PathBuf, String> = files
            .iter()
            .map(|(path, content)| (PathBuf::from(path), content.to_string()))
            .collect();
        let dirs: Vec<PathBuf> = dirs.iter().map(PathBuf::from).collect();

        let mut fs = MockFilesystem::new();

        let known = files.clone();
        fs.expect_is_file()
            .returning(move |path| known.contains_key(path));

        let known = dirs.clone();
        fs.expect_is_dir()
            .returning(move |path| known.iter().any(|d| d == path));

        let (known_files, known_dirs) = (files.clone(), dirs);
        fs.expect_exists().returning(move |path| {
            known_files.contains_key(path) || known_dirs.iter().any(|d| d == path)
        });

        fs.expect_read_to_string().returning(move |path| {
            files.get(path).cloned().ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "No such file".into(),
                }
                .into()
            })
        });

        fs
    }
}
