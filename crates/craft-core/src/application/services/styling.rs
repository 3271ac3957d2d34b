//! Registers the payload's plugins in the styling configuration.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ModuleStyle, PluginPatch, register_plugins},
};

/// Styling configuration file names, checked in order.
pub const STYLING_CONFIG_FILES: [&str; 4] = [
    "tailwind.config.ts",
    "tailwind.config.js",
    "tailwind.config.mjs",
    "tailwind.config.cjs",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylingPatchOutcome {
    Patched(PathBuf),
    AlreadyConfigured(PathBuf),
    NoPluginsArray(PathBuf),
    NoConfig,
}

pub struct StylingConfigPatcher<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> StylingConfigPatcher<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    pub fn locate(&self, root: &Path) -> Option<PathBuf> {
        STYLING_CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| self.fs.is_file(path))
    }

    /// Append missing plugin registrations. The file is only rewritten when
    /// something was added.
    ///
    /// The patch is additive and happens after the payload is committed, so
    /// it is not covered by the install's backup.
    pub fn patch(
        &self,
        root: &Path,
        plugins: &[String],
    ) -> Result<StylingPatchOutcome, ApplicationError> {
        let Some(path) = self.locate(root) else {
            debug!("No styling configuration found");
            return Ok(StylingPatchOutcome::NoConfig);
        };

        let io_failed = |reason: String| ApplicationError::FilesystemError {
            path: path.clone(),
            reason,
        };
        let source = self
            .fs
            .read_to_string(&path)
            .map_err(|e| io_failed(e.to_string()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let style = ModuleStyle::detect(&file_name, &source);
        debug!(?style, "Styling configuration module style");

        match register_plugins(&source, plugins, style) {
            PluginPatch::Patched(updated) => {
                self.fs
                    .write_file(&path, &updated)
                    .map_err(|e| io_failed(e.to_string()))?;
                info!(path = %path.display(), "Registered styling plugins");
                Ok(StylingPatchOutcome::Patched(path))
            }
            PluginPatch::AlreadyPresent => Ok(StylingPatchOutcome::AlreadyConfigured(path)),
            PluginPatch::NoPluginsArray => Ok(StylingPatchOutcome::NoPluginsArray(path)),
        }
    }
}
