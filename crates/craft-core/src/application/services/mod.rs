//! Application services - orchestrate use cases.
//!
//! Each service owns one step of the install; [`InstallService`] strings
//! them together into the install state machine.

pub mod backup;
pub mod components_dir;
pub mod dependencies;
pub mod file_writer;
pub mod install_service;
pub mod package_manager;
pub mod project_validator;
pub mod report;
pub mod state_detector;
pub mod styling;

pub use backup::{BackupManager, BackupRecord};
pub use components_dir::{ComponentsDirectoryResolver, ResolvedDirectory};
pub use dependencies::{DependencyGap, DependencyInstaller};
pub use file_writer::FileWriter;
pub use install_service::{InstallOptions, InstallService};
pub use package_manager::PackageManagerResolver;
pub use project_validator::ProjectValidator;
pub use report::{InstallOutcome, InstallPlan, InstallReport, StepOutcome};
pub use state_detector::InstallationStateDetector;
pub use styling::{STYLING_CONFIG_FILES, StylingConfigPatcher, StylingPatchOutcome};
