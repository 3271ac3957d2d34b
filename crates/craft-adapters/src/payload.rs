//! The design system payload compiled into the binary.
//!
//! `assets/payload.toml` lists the files, the packages they import and the
//! styling plugins they rely on. File contents come from the `FILES` table
//! below, so adding a file means touching both.
//!
//! # `payload.toml` format
//!
//! ```toml
//! [payload]
//! files = ["index.ts", "layout.tsx"]
//!
//! [[requirements]]
//! name  = "clsx"
//! group = "runtime"        # runtime | development
//!
//! [styling]
//! plugins = ["tailwindcss-animate"]
//! ```
//!
//! Unknown tables and keys are errors, so a typo cannot silently drop a
//! setting.

use serde::Deserialize;
use tracing::{debug, instrument};

use craft_core::domain::{DependencyGroup, DomainError, Payload, Requirement};

const MANIFEST: &str = include_str!("../assets/payload.toml");

const FILES: &[(&str, &str)] = &[
    ("index.ts", include_str!("../assets/ds/index.ts")),
    ("types.ts", include_str!("../assets/ds/types.ts")),
    ("layout.tsx", include_str!("../assets/ds/layout.tsx")),
    ("prose.tsx", include_str!("../assets/ds/prose.tsx")),
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    payload: PayloadSection,
    #[serde(default)]
    requirements: Vec<RequirementEntry>,
    #[serde(default)]
    styling: StylingSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PayloadSection {
    files: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequirementEntry {
    name: String,
    group: GroupEntry,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum GroupEntry {
    Runtime,
    Development,
}

impl From<GroupEntry> for DependencyGroup {
    fn from(group: GroupEntry) -> Self {
        match group {
            GroupEntry::Runtime => Self::Runtime,
            GroupEntry::Development => Self::Development,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StylingSection {
    #[serde(default)]
    plugins: Vec<String>,
}

/// The payload shipped with this build.
#[instrument]
pub fn builtin_payload() -> Result<Payload, DomainError> {
    load(MANIFEST, FILES)
}

fn load(manifest: &str, files: &[(&str, &str)]) -> Result<Payload, DomainError> {
    let manifest: ManifestFile = toml::from_str(manifest)
        .map_err(|e| DomainError::InvalidPayload(format!("payload.toml: {e}")))?;

    let mut payload = Payload::new();
    for path in &manifest.payload.files {
        let content = files
            .iter()
            .find_map(|(name, content)| (*name == path.as_str()).then_some(*content))
            .ok_or_else(|| {
                DomainError::InvalidPayload(format!("'{path}' is listed but not compiled in"))
            })?;
        payload = payload.with_file(path, content)?;
    }

    for entry in manifest.requirements {
        payload = payload.with_requirement(Requirement {
            name: entry.name,
            group: entry.group.into(),
        });
    }
    for plugin in manifest.styling.plugins {
        payload = payload.with_styling_plugin(plugin);
    }

    payload.validate()?;
    debug!(
        files = payload.file_count(),
        requirements = payload.requirements().len(),
        "Payload loaded"
    );
    Ok(payload)
}
