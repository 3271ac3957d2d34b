use crate::domain::{
    entities::{Payload, ProjectContext, project::HOST_FRAMEWORK},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project(context: &ProjectContext) -> Result<(), DomainError> {
        if context.has_framework() {
            Ok(())
        } else {
            Err(DomainError::MissingFramework {
                framework: HOST_FRAMEWORK.into(),
            })
        }
    }

    pub fn validate_payload(payload: &Payload) -> Result<(), DomainError> {
        payload.validate()
    }
}
