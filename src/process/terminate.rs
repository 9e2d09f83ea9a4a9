//! Forced process termination

use super::handle::ProcessHandle;
use crate::core::types::{CleanupError, CleanupResult, KillOutcome, ProcessId};
use tracing::debug;

/// Terminate `pid` with exit code 0
pub fn kill_pid(pid: ProcessId) -> CleanupResult<KillOutcome> {
    kill_pid_with_code(pid, 0)
}

/// Terminate `pid` with `exit_code`
///
/// A PID that no longer exists is reported as `AlreadyGone`.
pub fn kill_pid_with_code(pid: ProcessId, exit_code: u32) -> CleanupResult<KillOutcome> {
    debug!("[!] Killing PID: {}", pid);

    let process = match ProcessHandle::open_for_terminate(pid) {
        Ok(process) => process,
        Err(CleanupError::ProcessNotFound(_)) => return Ok(KillOutcome::AlreadyGone),
        Err(err) => return Err(err),
    };

    process.terminate(exit_code)?;
    Ok(KillOutcome::Terminated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_kill_nonexistent_pid_is_already_gone() {
        // far beyond any PID the kernel hands out
        let outcome = kill_pid(0xFFFF_FFF1);
        assert!(matches!(outcome, Ok(KillOutcome::AlreadyGone)));
    }
}
