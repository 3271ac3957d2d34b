//! Craft Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Craft
//! design-system installer, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            craft-cli (CLI)              │
//! │     (Config, prompts, terminal UI)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (InstallService + step services)     │
//! │      Install state machine, rollback    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, CommandRunner, Prompter,   │
//! │  ProgressReporter)                      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     craft-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemRunner, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectContext, InstallationState,     │
//! │  Payload, PackageManagerKind)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use craft_core::application::{InstallOptions, InstallOutcome, InstallService};
//!
//! // Adapters and payload come from craft-adapters.
//! let service = InstallService::new(filesystem, runner, prompter, reporter, payload);
//! match service.install(root, &InstallOptions::default())? {
//!     InstallOutcome::Done(report) => println!("{}", report.summary()),
//!     InstallOutcome::Aborted => println!("Aborted"),
//!     InstallOutcome::Planned(plan) => println!("{plan:?}"),
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InstallOptions, InstallOutcome, InstallPlan, InstallReport, InstallService, StepOutcome,
        ports::{CommandRunner, Filesystem, ProgressReporter, Prompter, SilentReporter},
    };
    pub use crate::domain::{
        CommandSpec, CommandStatus, ComponentName, DependencyGroup, InstallPhase,
        InstallationState, PackageManagerKind, Payload, Requirement,
    };
    pub use crate::error::{CraftError, CraftResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
