//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Running `craft` with no subcommand installs, so the install flags are also
/// accepted at the top level.
#[derive(Debug, Parser)]
#[command(
    name    = "craft",
    bin_name = "craft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Install the Craft design system into a Next.js project",
    long_about = "Craft copies a small set of layout and typography components \
                  into your Next.js project, adds the packages they import and \
                  registers the Tailwind plugins they rely on.",
    after_help = "EXAMPLES:\n\
        \x20 craft                      # install into ./components/ds\n\
        \x20 craft --yes --name ui      # non-interactive, custom name\n\
        \x20 craft install --dry-run    # show what would change\n\
        \x20 craft completions bash > ~/.local/share/bash-completion/completions/craft",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Install flags for the bare `craft` invocation.
    #[command(flatten)]
    pub install: InstallArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run; `install` when none was given.
    ///
    /// Install flags given before `install` are folded into the subcommand's.
    pub fn into_parts(self) -> (GlobalArgs, Commands) {
        let command = match self.command {
            None => Commands::Install(self.install),
            Some(Commands::Install(args)) => Commands::Install(args.merge(self.install)),
            Some(other) => other,
        };
        (self.global, command)
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install or update Craft in the current project.
    #[command(
        visible_alias = "i",
        about = "Install Craft (the default command)",
        after_help = "EXAMPLES:\n\
            \x20 craft install\n\
            \x20 craft install --name ui --yes\n\
            \x20 craft install --skip-deps\n\
            \x20 craft -C ../my-app install --dry-run"
    )]
    Install(InstallArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 craft completions bash > ~/.local/share/bash-completion/completions/craft\n\
            \x20 craft completions zsh  > ~/.zfunc/_craft\n\
            \x20 craft completions fish > ~/.config/fish/completions/craft.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Craft configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 craft config get defaults.component_name\n\
            \x20 craft config list\n\
            \x20 craft config path"
    )]
    Config(ConfigCommands),
}

// ── install ───────────────────────────────────────────────────────────────────

/// Arguments for `craft install`.
#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// Directory name for the components, e.g. `ds` for `components/ds/`.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Design system directory name (default: ds)"
    )]
    pub name: Option<String>,

    /// Answer every question with its default.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip prompts and accept the defaults"
    )]
    pub yes: bool,

    /// Write the files only.
    #[arg(
        long = "skip-deps",
        help = "Do not install packages or initialise shadcn/ui"
    )]
    pub skip_deps: bool,

    /// Report what would happen without touching the project.
    #[arg(long = "dry-run", help = "Show what would be installed without installing")]
    pub dry_run: bool,
}

impl InstallArgs {
    fn merge(self, outer: Self) -> Self {
        Self {
            name: self.name.or(outer.name),
            yes: self.yes || outer.yes,
            skip_deps: self.skip_deps || outer.skip_deps,
            dry_run: self.dry_run || outer.dry_run,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `craft completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `craft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.component_name`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_installs() {
        let (_, command) = Cli::parse_from(["craft"]).into_parts();
        match command {
            Commands::Install(args) => {
                assert!(args.name.is_none());
                assert!(!args.yes && !args.skip_deps && !args.dry_run);
            }
            other => panic!("expected Install, got {other:?}"),
        }
    }

    #[test]
    fn top_level_install_flags() {
        let (_, command) =
            Cli::parse_from(["craft", "--yes", "--name", "ui", "--skip-deps"]).into_parts();
        let Commands::Install(args) = command else {
            panic!("expected Install");
        };
        assert!(args.yes);
        assert!(args.skip_deps);
        assert_eq!(args.name.as_deref(), Some("ui"));
    }

    #[test]
    fn install_subcommand_and_alias() {
        for sub in ["install", "i"] {
            let (_, command) = Cli::parse_from(["craft", sub, "-y", "--dry-run"]).into_parts();
            let Commands::Install(args) = command else {
                panic!("expected Install for {sub}");
            };
            assert!(args.yes && args.dry_run);
        }
    }

    #[test]
    fn flags_before_install_are_merged() {
        let (_, command) =
            Cli::parse_from(["craft", "--yes", "install", "--name", "ui"]).into_parts();
        let Commands::Install(args) = command else {
            panic!("expected Install");
        };
        assert!(args.yes);
        assert_eq!(args.name.as_deref(), Some("ui"));
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let cli = Cli::parse_from(["craft", "config", "path", "-C", "/tmp", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["craft", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Zsh }))
        ));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["craft", "--frobnicate"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["craft", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }
}
