//! Classifies any install already present at the destination.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::ports::Filesystem,
    domain::{ComponentName, InstallationState},
};

pub struct InstallationStateDetector;

impl InstallationStateDetector {
    pub fn legacy_path(destination: &Path, name: &ComponentName) -> PathBuf {
        destination.join(name.legacy_file_name())
    }

    pub fn directory_path(destination: &Path, name: &ComponentName) -> PathBuf {
        destination.join(name.as_str())
    }

    /// Anything at `<destination>/<name>` counts as the current layout,
    /// since that is the path the writer is about to fill. It wins over a
    /// legacy file when both exist.
    pub fn detect(
        fs: &dyn Filesystem,
        destination: &Path,
        name: &ComponentName,
    ) -> InstallationState {
        let directory = Self::directory_path(destination, name);
        let legacy = Self::legacy_path(destination, name);

        let state = if fs.exists(&directory) {
            InstallationState::CurrentDirectory(directory)
        } else if fs.is_file(&legacy) {
            InstallationState::LegacySingleFile(legacy)
        } else {
            InstallationState::Absent
        };

        debug!(state = %state, "Installation state detected");
        state
    }

    /// Legacy file left next to a current install, which this run will not
    /// touch.
    pub fn stray_legacy_file(
        fs: &dyn Filesystem,
        destination: &Path,
        name: &ComponentName,
        state: &InstallationState,
    ) -> Option<PathBuf> {
        let legacy = Self::legacy_path(destination, name);
        (matches!(state, InstallationState::CurrentDirectory(_)) && fs.is_file(&legacy))
            .then_some(legacy)
    }
}
