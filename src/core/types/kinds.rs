//! Small enums shared by the file and process layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path form returned by `GetFinalPathNameByHandleW`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// `\\?\C:\dir\file`
    Dos,
    /// `\Device\HarddiskVolumeN\dir\file`
    Nt,
}

impl PathKind {
    /// `VOLUME_NAME_*` flag value
    pub const fn flag(&self) -> u32 {
        match self {
            PathKind::Dos => 0x0,
            PathKind::Nt => 0x2,
        }
    }

    /// Buffer size in UTF-16 units used for the first lookup attempt
    pub const fn initial_capacity(&self) -> usize {
        match self {
            PathKind::Dos => MAX_PATH,
            PathKind::Nt => MAX_NT_PATH,
        }
    }
}

/// Classic Win32 path limit
pub const MAX_PATH: usize = 260;

/// NT paths carry a device prefix, so they get twice the room
pub const MAX_NT_PATH: usize = MAX_PATH * 2;

/// How `delete_by_id` removes a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStrategy {
    /// Set delete disposition on the ID handle, reopening by NT path if refused
    #[default]
    Disposition,
    /// Rename the DOS path to a spoiled name, then delete it
    RenameThenDelete,
}

impl fmt::Display for DeletionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionStrategy::Disposition => write!(f, "disposition"),
            DeletionStrategy::RenameThenDelete => write!(f, "rename_then_delete"),
        }
    }
}

/// Result of a successful delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    /// The ID no longer exists on the volume
    AlreadyGone,
}

/// Result of a successful kill request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KillOutcome {
    Terminated,
    AlreadyGone,
}
