use std::fmt;
use std::path::{Path, PathBuf};

/// Prior installation found at the destination.
///
/// Exactly one value is computed per run and every later branch of the
/// installer keys off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationState {
    /// Nothing installed yet.
    Absent,
    /// Older layout: a single `<name>.tsx` file.
    LegacySingleFile(PathBuf),
    /// Current layout: a `<name>/` directory of modules.
    CurrentDirectory(PathBuf),
}

impl InstallationState {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::LegacySingleFile(_))
    }

    /// The path a run would have to move aside before writing.
    pub fn existing_path(&self) -> Option<&Path> {
        match self {
            Self::Absent => None,
            Self::LegacySingleFile(path) | Self::CurrentDirectory(path) => Some(path),
        }
    }

    /// Question put to the user before touching an existing install.
    pub fn confirmation_question(&self, component: &str) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::LegacySingleFile(path) => Some(format!(
                "Found a legacy single-file install at {}. Migrate it to the \
                 '{component}/' layout? A backup will be kept",
                path.display()
            )),
            Self::CurrentDirectory(path) => Some(format!(
                "'{component}' is already installed at {}. Replace it? \
                 A backup will be kept",
                path.display()
            )),
        }
    }
}

impl fmt::Display for InstallationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "not installed"),
            Self::LegacySingleFile(path) => write!(f, "legacy install at {}", path.display()),
            Self::CurrentDirectory(path) => write!(f, "installed at {}", path.display()),
        }
    }
}

/// States of the install state machine, in the order a full run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Start,
    Validated,
    ManagerResolved,
    DestinationResolved,
    StateDetected,
    Confirmed,
    Aborted,
    BackedUp,
    Written,
    DependenciesResolved,
    Done,
    Failed,
}

impl InstallPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted | Self::Failed)
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Validated => "validated",
            Self::ManagerResolved => "manager-resolved",
            Self::DestinationResolved => "destination-resolved",
            Self::StateDetected => "state-detected",
            Self::Confirmed => "confirmed",
            Self::Aborted => "aborted",
            Self::BackedUp => "backed-up",
            Self::Written => "written",
            Self::DependenciesResolved => "dependencies-resolved",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
