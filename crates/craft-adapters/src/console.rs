//! Prompt and progress adapters that need no terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::{Arc, Mutex};

use craft_core::{
    application::{
        ApplicationError,
        ports::{ProgressReporter, Prompter},
    },
    error::CraftResult,
};

/// Line-oriented prompts over any reader.
///
/// End of input and blank lines both yield the default, so piping
/// `/dev/null` into the installer accepts every default.
pub struct LinePrompter<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl LinePrompter<BufReader<Stdin>, Stderr> {
    /// Read answers from stdin, print questions to stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }
}

fn prompt_failed(e: impl ToString) -> ApplicationError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for LinePrompter<R, W> {
    fn ask(&self, question: &str, default: &str) -> CraftResult<String> {
        {
            let mut out = self
                .output
                .lock()
                .map_err(|_| ApplicationError::LockPoisoned)?;
            write!(out, "? {question} (default: {default}): ").map_err(prompt_failed)?;
            out.flush().map_err(prompt_failed)?;
        }

        let mut line = String::new();
        self.input
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .read_line(&mut line)
            .map_err(prompt_failed)?;

        let answer = line.trim();
        Ok(if answer.is_empty() { default } else { answer }.to_string())
    }
}

/// Answers prompts from a fixed script and records the questions.
///
/// Once the script runs out every question gets its default.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                answers: answers.into_iter().map(Into::into).collect(),
                questions: Vec::new(),
            })),
        }
    }

    /// Accept every default.
    pub fn defaults() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.questions.clone())
            .unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str, default: &str) -> CraftResult<String> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        state.questions.push(question.to_string());
        Ok(state
            .answers
            .pop_front()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
}

/// Keeps every progress line for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, line)| line)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl ProgressReporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }
}
