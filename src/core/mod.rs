//! Core module containing fundamental types for dropsweep
//!
//! This module provides the building blocks shared by the file and
//! process layers: file IDs, path kinds, outcomes and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    CleanupError, CleanupResult, DeleteOutcome, DeletionStrategy, FileId, KillOutcome, PathKind,
    ProcessId,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

