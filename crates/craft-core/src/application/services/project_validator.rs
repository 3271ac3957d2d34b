//! Confirms the working directory is a supported host project.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        DomainError, DomainValidator as validator, MANIFEST_FILE, Manifest, ProjectContext,
        UI_KIT_CONFIG_FILE,
    },
    error::CraftResult,
};

/// Reads the manifest and builds the [`ProjectContext`]. Never mutates.
pub struct ProjectValidator;

impl ProjectValidator {
    #[instrument(skip(fs), fields(root = %root.display()))]
    pub fn validate(fs: &dyn Filesystem, root: &Path) -> CraftResult<ProjectContext> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !fs.is_file(&manifest_path) {
            return Err(DomainError::NotAHostProject {
                root: root.to_path_buf(),
            }
            .into());
        }

        let source = fs.read_to_string(&manifest_path)?;
        let manifest = Manifest::parse(&source).map_err(|e| DomainError::InvalidManifest {
            path: manifest_path.clone(),
            reason: e.to_string(),
        })?;

        let has_ui_kit_config = fs.is_file(&root.join(UI_KIT_CONFIG_FILE));
        let context = ProjectContext::new(root, manifest, has_ui_kit_config);
        validator::validate_project(&context)?;

        debug!(
            styling = context.has_styling_framework(),
            ui_kit = context.has_ui_kit_config(),
            "Host project validated"
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{application::ports::output::fake, error::CraftError};

    fn validate(files: &[(&str, &str)]) -> CraftResult<ProjectContext> {
        ProjectValidator::validate(&fake::tree(files, &["/p"]), Path::new("/p"))
    }

    #[test]
    fn missing_manifest_is_not_a_host_project() {
        assert!(matches!(
            validate(&[]),
            Err(CraftError::Domain(DomainError::NotAHostProject { .. }))
        ));
    }

    #[test]
    fn manifest_without_next_is_rejected() {
        assert!(matches!(
            validate(&[("/p/package.json", r#"{"dependencies":{"react":"18.2.0"}}"#)]),
            Err(CraftError::Domain(DomainError::MissingFramework { .. }))
        ));
    }

    #[test]
    fn malformed_manifest_names_the_file() {
        match validate(&[("/p/package.json", "{ not json")]) {
            Err(CraftError::Domain(DomainError::InvalidManifest { path, .. })) => {
                assert_eq!(path, Path::new("/p/package.json"));
            }
            other => panic!("expected InvalidManifest, got {other:?}"),
        }
    }

    #[test]
    fn dev_dependency_framework_is_accepted() {
        let ctx = validate(&[(
            "/p/package.json",
            r#"{"devDependencies":{"next":"14.2.0","tailwindcss":"3.4.1"}}"#,
        )])
        .unwrap();
        assert!(ctx.has_framework());
        assert!(ctx.has_styling_framework());
        assert!(!ctx.has_ui_kit_config());
    }

    #[test]
    fn ui_kit_config_is_detected() {
        let ctx = validate(&[
            ("/p/package.json", r#"{"dependencies":{"next":"15.0.0"}}"#),
            ("/p/components.json", "{}"),
        ])
        .unwrap();
        assert!(ctx.has_ui_kit_config());
        assert!(!ctx.has_styling_framework());
        assert_eq!(ctx.root(), Path::new("/p"));
    }
}
