//! Parent PID lookup through the basic process information block

use super::handle::ProcessHandle;
use super::INVALID_PID_VALUE;
use crate::core::types::{CleanupResult, ProcessId};
use tracing::debug;

/// PID of the process `pid` was started from
///
/// Fails for invalid PIDs and for processes we lack query rights on.
pub fn get_parent_pid(pid: ProcessId) -> CleanupResult<ProcessId> {
    let process = ProcessHandle::open_for_query(pid)?;
    process.parent_pid()
}

/// Like `get_parent_pid`, reporting failure as `INVALID_PID_VALUE`
pub fn parent_pid_or_invalid(pid: ProcessId) -> ProcessId {
    match get_parent_pid(pid) {
        Ok(parent) => parent,
        Err(err) => {
            debug!("Parent of {} unavailable: {}", pid, err);
            INVALID_PID_VALUE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_parent_of_current_process() {
        let parent = get_parent_pid(std::process::id());
        if let Ok(ppid) = parent {
            assert_ne!(ppid, std::process::id());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_invalid_pid_yields_sentinel() {
        assert!(get_parent_pid(0).is_err());
        assert_eq!(parent_pid_or_invalid(0), INVALID_PID_VALUE);
    }
}
