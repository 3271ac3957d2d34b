//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `craft-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: Package-manager subprocesses
//!   - `Prompter`: Interactive questions
//!   - `ProgressReporter`: Progress lines for the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`InstallService::install`, called by the CLI)

pub mod output;

pub use output::{
    CommandRunner, Filesystem, ProgressReporter, Prompter, SilentReporter, is_affirmative,
};
