pub mod common;
pub mod install_state;
pub mod payload;
pub mod project;

pub use crate::domain::DomainError;
pub use install_state::{InstallPhase, InstallationState};
pub use payload::{DependencyGroup, Payload, PayloadFile, Requirement};
pub use project::{Manifest, ProjectContext};
