//! Process creation, inspection and termination
//!
//! Everything touching a live process is Windows-only; command line
//! construction and the PID sentinel are portable.

pub mod command_line;
#[cfg(windows)]
pub mod create;
#[cfg(windows)]
pub mod handle;
#[cfg(windows)]
pub mod parent;
#[cfg(windows)]
pub mod privileges;
#[cfg(windows)]
pub mod terminate;

pub use command_line::{build_command_line, CreationFlags};
#[cfg(windows)]
pub use create::{create_new_process, make_new_process, SpawnedProcess};
#[cfg(windows)]
pub use handle::{ProcessAccess, ProcessHandle};
#[cfg(windows)]
pub use parent::{get_parent_pid, parent_pid_or_invalid};
#[cfg(windows)]
pub use privileges::{
    has_debug_privilege, set_debug_privilege, set_privilege, DebugPrivilegeGuard, SE_DEBUG_NAME,
};
#[cfg(windows)]
pub use terminate::{kill_pid, kill_pid_with_code};

use crate::core::types::ProcessId;

/// Sentinel returned by `parent_pid_or_invalid` when the lookup fails
pub const INVALID_PID_VALUE: ProcessId = ProcessId::MAX;
