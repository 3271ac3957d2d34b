//! Diagnostic logging for the installer.
//!
//! Logs and user-facing output are separate streams: [`crate::output`] owns
//! what the user is told, tracing owns what a maintainer needs when an
//! install goes wrong. Both end up on stderr so `--output-format json`
//! keeps stdout parseable, and the package manager's own output (inherited
//! stdio) interleaves with them in order.
//!
//! `-v` adds progress events from the install state machine, `-vv` adds
//! every filesystem check and port call, `-vvv` adds spans. `RUST_LOG` replaces the
//! computed filter entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events pass the computed filter. Anything else (the
/// `config` crate, for one) stays silent unless `RUST_LOG` asks for it.
const LOG_TARGETS: [&str; 3] = ["craft", "craft_core", "craft_adapters"];

/// Subscriber settings derived from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    ansi: bool,
    /// Show span open/close and event targets.
    trace_spans: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_tty: bool) -> Self {
        let level = match (args.quiet, args.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self {
            level,
            ansi: stderr_is_tty && !args.no_color,
            trace_spans: level == LevelFilter::TRACE,
        }
    }

    fn directives(&self) -> String {
        let level = self.level.to_string().to_ascii_lowercase();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let span_events = if settings.trace_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(settings.trace_spans)
        .with_span_events(span_events)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}
