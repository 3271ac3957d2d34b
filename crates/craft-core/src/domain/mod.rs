//! Core domain layer for Craft.
//!
//! Pure installer rules with no I/O: what a host project must declare,
//! which install shapes exist, which command a package manager takes and
//! how the styling configuration is patched. Filesystem, subprocess and
//! prompt access all go through the ports in `crate::application`.

pub mod entities;
pub mod error;
pub mod styling;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    install_state::{InstallPhase, InstallationState},
    payload::{DependencyGroup, Payload, PayloadFile, Requirement},
    project::{
        HOST_FRAMEWORK, MANIFEST_FILE, Manifest, ProjectContext, STYLING_FRAMEWORK,
        UI_KIT_CONFIG_FILE,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use styling::{ModuleStyle, PluginPatch, register_plugins};

pub use value_objects::{CommandSpec, CommandStatus, ComponentName, PackageManagerKind};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_without_framework_fails_validation() {
        let ctx = ProjectContext::new(
            "/p",
            Manifest::default().with_dependency("react", "18.0.0"),
            false,
        );
        assert_eq!(
            DomainValidator::validate_project(&ctx),
            Err(DomainError::MissingFramework {
                framework: "next".into()
            })
        );
    }

    #[test]
    fn project_with_framework_passes_validation() {
        let ctx = ProjectContext::new(
            "/p",
            Manifest::default().with_dependency("next", "14.1.0"),
            false,
        );
        assert!(DomainValidator::validate_project(&ctx).is_ok());
    }

    #[test]
    fn missing_framework_is_a_validation_error() {
        let err = DomainError::MissingFramework {
            framework: "next".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("next")));
    }

    #[test]
    fn not_a_host_project_is_not_found() {
        let err = DomainError::NotAHostProject { root: "/tmp".into() };
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
