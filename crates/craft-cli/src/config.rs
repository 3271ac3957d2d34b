//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `CRAFT__<SECTION>__<KEY>`
//!    (e.g. `CRAFT__DEFAULTS__COMPONENT_NAME=ui`)
//! 3. Config file: `--config FILE`, or [`AppConfig::config_path`] if present
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults for the installer's questions.
    #[serde(default)]
    pub defaults: Defaults,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Install behaviour.
    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Offered when asking for the design system directory name.
    pub component_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Same as always passing `--skip-deps`.
    pub skip_dependencies: bool,
    /// Same as always passing `--yes`.
    pub assume_yes: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            component_name: craft_core::domain::ComponentName::DEFAULT.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        debug!(path = %path.display(), explicit = config_file.is_some(), "Loading configuration");

        Self::load_from(&path, config_file.is_some())
    }

    fn load_from(path: &Path, required: bool) -> CliResult<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("defaults.component_name", defaults.defaults.component_name)
            .and_then(|b| b.set_default("output.no_color", defaults.output.no_color))
            .and_then(|b| b.set_default("output.format", defaults.output.format))
            .and_then(|b| {
                b.set_default("install.skip_dependencies", defaults.install.skip_dependencies)
            })
            .and_then(|b| b.set_default("install.assume_yes", defaults.install.assume_yes))
            .map_err(|e| config_error("Invalid built-in defaults", e))?
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("CRAFT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| config_error(format!("Failed to read {}", path.display()), e))?;

        settings
            .try_deserialize()
            .map_err(|e| config_error(format!("Invalid configuration in {}", path.display()), e))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.craft.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "craft", "craft")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".craft.toml"))
    }
}

fn config_error(message: impl Into<String>, source: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: message.into(),
        source: Some(Box::new(source)),
    }
}
