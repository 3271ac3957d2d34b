//! User-facing output.
//!
//! [`OutputManager`] also serves as the installer's progress reporter, so
//! advisories and step results share the same symbols as the CLI's own
//! messages.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use tracing::debug;

use craft_core::application::ports::ProgressReporter;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Debug, Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    /// Human-readable lines. Stderr in JSON mode so stdout stays parseable.
    term: Term,
    stdout: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = resolve_format(
            args.output_format,
            &config.output.format,
            io::stdout().is_terminal(),
        );

        let term = match resolved_format {
            OutputFormat::Json => Term::stderr(),
            _ => Term::stdout(),
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term,
            stdout: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Success, msg)
    }

    /// Shown even with `--quiet`; partial installs are reported this way.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    fn marked(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet && !mark.survives_quiet() {
            return Ok(());
        }
        self.term.write_line(&mark.render(msg, !self.no_color))
    }

    /// Pretty-printed JSON document on stdout, regardless of `--quiet`.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.stdout.write_line(&rendered)
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// The flag wins over `output.format`; `auto` from both means `human` on a
/// terminal and `plain` otherwise. An unknown config value counts as `auto`.
fn resolve_format(flag: OutputFormat, configured: &str, stdout_is_tty: bool) -> OutputFormat {
    let requested = match flag {
        OutputFormat::Auto => configured.parse().unwrap_or(OutputFormat::Auto),
        explicit => explicit,
    };
    match requested {
        OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        resolved => resolved,
    }
}

/// Leading symbol of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Success,
    Warning,
    Info,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn survives_quiet(self) -> bool {
        self == Self::Warning
    }

    fn render(self, msg: &str, colored: bool) -> String {
        if !colored {
            return format!("{} {msg}", self.symbol());
        }
        let symbol = self.symbol();
        match self {
            Self::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Self::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Self::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

fn report(result: io::Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "Could not write progress line");
    }
}

impl ProgressReporter for OutputManager {
    fn info(&self, message: &str) {
        report(OutputManager::info(self, message));
    }

    fn success(&self, message: &str) {
        report(OutputManager::success(self, message));
    }

    fn warn(&self, message: &str) {
        report(self.warning(message));
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn args(quiet: bool, no_color: bool, output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            cwd: None,
            output_format,
        }
    }

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        // Human avoids TTY detection in tests.
        OutputManager::new(&args(quiet, no_color, OutputFormat::Human), &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.info("hello").is_ok());
    }

    #[test]
    fn warning_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true);
        assert!(out.warning("styling config was not patched").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        let colored = make_manager(false, false);
        let no_color = make_manager(false, true);
        assert!(colored.supports_color());
        assert!(!no_color.supports_color());
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&args(false, false, OutputFormat::Human), &config);
        assert!(!out.supports_color());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = OutputManager::new(
            &args(false, false, OutputFormat::Plain),
            &AppConfig::default(),
        );
        assert!(!out.supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::new(&args(false, true, OutputFormat::Auto), &config);
        assert_eq!(out.format(), OutputFormat::Json);

        let flag_wins = OutputManager::new(&args(false, true, OutputFormat::Plain), &config);
        assert_eq!(flag_wins.format(), OutputFormat::Plain);
    }

    #[test]
    fn auto_follows_the_terminal() {
        assert_eq!(resolve_format(OutputFormat::Auto, "auto", true), OutputFormat::Human);
        assert_eq!(resolve_format(OutputFormat::Auto, "auto", false), OutputFormat::Plain);
        assert_eq!(resolve_format(OutputFormat::Auto, "bogus", false), OutputFormat::Plain);
        assert_eq!(resolve_format(OutputFormat::Json, "plain", true), OutputFormat::Json);
    }

    #[test]
    fn plain_marks_carry_symbols() {
        assert_eq!(Mark::Success.render("Done", false), "\u{2713} Done");
        assert_eq!(Mark::Warning.render("Partial", false), "\u{26a0} Partial");
        assert!(Mark::Info.render("Using pnpm", true).contains("Using pnpm"));
    }

    #[test]
    fn only_warnings_survive_quiet() {
        assert!(Mark::Warning.survives_quiet());
        assert!(!Mark::Info.survives_quiet());
        assert!(!Mark::Success.survives_quiet());
    }

    #[test]
    fn acts_as_progress_reporter() {
        let out = make_manager(true, true);
        let reporter: &dyn ProgressReporter = &out;
        reporter.info("Using pnpm");
        reporter.warn("next 13 is old");
        reporter.success("done");
    }
}
