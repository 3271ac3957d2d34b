use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Manifest file at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// UI-kit configuration file; its presence means the kit is already set up.
pub const UI_KIT_CONFIG_FILE: &str = "components.json";

/// Host framework every supported project must declare.
pub const HOST_FRAMEWORK: &str = "next";

/// Styling framework the payload is written against.
pub const STYLING_FRAMEWORK: &str = "tailwindcss";

/// Oldest host framework major version that does not trigger an advisory.
pub const MIN_FRAMEWORK_MAJOR: u64 = 14;

/// The parts of `package.json` the installer cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    dev_dependencies: Option<BTreeMap<String, String>>,
}

impl Manifest {
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_dependency(mut self, name: &str, version: &str) -> Self {
        self.dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), version.into());
        self
    }

    pub fn with_dev_dependency(mut self, name: &str, version: &str) -> Self {
        self.dev_dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), version.into());
        self
    }

    /// Version requirement for `name`, looking at runtime dependencies first.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .find_map(|group| group.get(name))
            .map(String::as_str)
    }

    /// `true` if either dependency group declares `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.version_of(name).is_some()
    }
}

/// Everything learned about the host project during validation.
///
/// Built once by the project validator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
    manifest: Manifest,
    has_ui_kit_config: bool,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>, manifest: Manifest, has_ui_kit_config: bool) -> Self {
        Self {
            root: root.into(),
            manifest,
            has_ui_kit_config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn has_framework(&self) -> bool {
        self.manifest.declares(HOST_FRAMEWORK)
    }

    pub fn has_styling_framework(&self) -> bool {
        self.manifest.declares(STYLING_FRAMEWORK)
    }

    pub fn has_ui_kit_config(&self) -> bool {
        self.has_ui_kit_config
    }

    /// Advisory for an outdated host framework. Never fatal.
    pub fn framework_advisory(&self) -> Option<String> {
        let major = self
            .manifest
            .version_of(HOST_FRAMEWORK)
            .and_then(leading_major)?;
        (major < MIN_FRAMEWORK_MAJOR).then(|| {
            format!(
                "Craft works best with Next.js {MIN_FRAMEWORK_MAJOR} or higher \
                 (found {major}). Consider upgrading."
            )
        })
    }
}

/// First run of digits in a version requirement, e.g. `^13.4.1` -> 13.
///
/// Tags such as `latest` or `canary` yield `None`.
fn leading_major(requirement: &str) -> Option<u64> {
    let digits: String = requirement
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
