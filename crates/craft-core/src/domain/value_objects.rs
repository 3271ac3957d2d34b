//! Value objects: small immutable types with no identity.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::{entities::payload::DependencyGroup, error::DomainError};

// ============================================================================
// Package manager
// ============================================================================

/// Package manager used by the host project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManagerKind {
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManagerKind {
    /// Lockfile lookup order. The first lockfile found wins.
    pub const LOOKUP_ORDER: [Self; 3] = [Self::Pnpm, Self::Yarn, Self::Npm];

    /// Used when no lockfile is present.
    pub const DEFAULT: Self = Self::Pnpm;

    pub const fn lockfile(self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm-lock.yaml",
            Self::Yarn => "yarn.lock",
            Self::Npm => "package-lock.json",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Command that adds `packages` to the given manifest group.
    pub fn add_command(
        self,
        group: DependencyGroup,
        packages: &[String],
        cwd: &Path,
    ) -> CommandSpec {
        let mut args = vec![match self {
            Self::Npm => "install".to_string(),
            Self::Pnpm | Self::Yarn => "add".to_string(),
        }];
        if group == DependencyGroup::Development {
            args.push("-D".into());
        }
        args.extend(packages.iter().cloned());
        CommandSpec::new(self.as_str(), args, cwd)
    }

    /// Command that initialises the UI-kit configuration (`components.json`).
    ///
    /// Yarn classic has no `dlx`, so yarn projects go through `npx` like npm.
    pub fn ui_kit_init_command(self, cwd: &Path) -> CommandSpec {
        match self {
            Self::Pnpm => CommandSpec::new("pnpm", ["dlx", "shadcn@latest", "init"], cwd),
            Self::Yarn | Self::Npm => CommandSpec::new("npx", ["shadcn@latest", "init"], cwd),
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Component name
// ============================================================================

/// Validated name of the installed component.
///
/// Determines both install shapes: the legacy `<name>.tsx` file and the
/// current `<name>/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String);

impl ComponentName {
    pub const DEFAULT: &'static str = "ds";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the legacy single-file install.
    pub fn legacy_file_name(&self) -> String {
        format!("{}.tsx", self.0)
    }
}

impl Default for ComponentName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl FromStr for ComponentName {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim();
        let invalid = |reason: &str| DomainError::InvalidComponentName {
            name: name.into(),
            reason: reason.into(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(invalid("only letters, digits, '-', '_' and '.' are allowed"));
        }

        Ok(Self(name.to_string()))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Subprocess description
// ============================================================================

/// A subprocess invocation: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished subprocess. `code` is `None` when the process
/// was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const fn success() -> Self {
        Self { code: Some(0) }
    }

    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}
