//! Infrastructure adapters for Craft.
//!
//! This crate implements the ports defined in `craft_core::application::ports`.
//! It contains all external dependencies and I/O operations, plus the
//! compiled-in design system payload.

pub mod console;
pub mod filesystem;
pub mod payload;
pub mod process;

// Re-export commonly used adapters
pub use console::{LinePrompter, RecordingReporter, ScriptedPrompter};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use payload::builtin_payload;
pub use process::{RecordingRunner, SystemRunner};
