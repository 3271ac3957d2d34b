//! Subprocess adapters.

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use tracing::debug;

use craft_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandSpec, CommandStatus},
    error::CraftResult,
};

/// Runs commands for real, sharing the terminal with the child.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> CraftResult<CommandStatus> {
        debug!(command = %command, cwd = %command.cwd.display(), "Spawning");

        let status = Command::new(program_name(&command.program))
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::CommandSpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        Ok(CommandStatus { code: status.code() })
    }
}

/// Package managers ship as batch shims on Windows.
#[cfg(windows)]
fn program_name(program: &str) -> String {
    format!("{program}.cmd")
}

#[cfg(not(windows))]
fn program_name(program: &str) -> String {
    program.to_string()
}

/// Records every command instead of running it.
///
/// Commands succeed unless a canned status matches their rendered form by
/// prefix. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    invocations: Vec<CommandSpec>,
    canned: Vec<(String, CommandStatus)>,
    spawn_fails: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `prefix` (e.g. `"pnpm add -D"`) exit with `code`.
    pub fn exit_with(self, prefix: &str, code: i32) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .canned
                .push((prefix.to_string(), CommandStatus::exited(code)));
        }
        self
    }

    /// Every command fails to start, as if the program were missing.
    pub fn spawn_fails(self) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.spawn_fails = true;
        }
        self
    }

    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.state
            .lock()
            .map(|state| state.invocations.clone())
            .unwrap_or_default()
    }

    /// Invocations rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> CraftResult<CommandStatus> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        state.invocations.push(command.clone());

        if state.spawn_fails {
            return Err(ApplicationError::CommandSpawnFailed {
                command: command.to_string(),
                reason: "program not found".into(),
            }
            .into());
        }

        let rendered = command.to_string();
        Ok(state
            .canned
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map_or_else(CommandStatus::success, |(_, status)| *status))
    }
}
