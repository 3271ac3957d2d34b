//! Application layer for Craft.
//!
//! This layer contains:
//! - **Services**: the install state machine and the steps it sequences
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Rules about projects, install shapes and commands live in
//! `crate::domain`; this layer decides the order things happen in and what
//! is undone when a step fails.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BackupManager, BackupRecord, ComponentsDirectoryResolver, DependencyGap,
    DependencyInstaller, FileWriter, InstallOptions, InstallOutcome, InstallPlan, InstallReport,
    InstallService, InstallationStateDetector, PackageManagerResolver, ProjectValidator,
    StepOutcome, StylingConfigPatcher, StylingPatchOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, ProgressReporter, Prompter};

pub use error::ApplicationError;
