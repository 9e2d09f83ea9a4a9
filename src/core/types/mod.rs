//! Core type definitions for dropsweep
//!
//! File identifiers, path and strategy selectors, operation outcomes,
//! and the crate error type.

mod error;
mod file_id;
mod kinds;

// Re-export all public types
pub use error::{CleanupError, CleanupResult};
pub use file_id::{read_file_ids, FileId};
pub use kinds::{
    DeleteOutcome, DeletionStrategy, KillOutcome, PathKind, MAX_NT_PATH, MAX_PATH,
};

// Common type aliases
pub type ProcessId = u32;
pub type ThreadId = u32;
