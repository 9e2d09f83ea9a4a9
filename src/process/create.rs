//! Starting new processes

use super::command_line::{build_command_line, CreationFlags};
use super::handle::{ProcessAccess, ProcessHandle};
use crate::core::types::{CleanupResult, ProcessId, ThreadId};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use tracing::{debug, info};

/// A freshly created process and its primary thread
#[derive(Debug)]
pub struct SpawnedProcess {
    pub pid: ProcessId,
    pub tid: ThreadId,
    pub process: Handle,
    pub thread: Handle,
}

impl SpawnedProcess {
    /// Keep only the process handle, closing the thread handle
    pub fn into_process_handle(self) -> ProcessHandle {
        let SpawnedProcess {
            pid,
            process,
            thread,
            ..
        } = self;
        drop(thread);
        ProcessHandle::from_handle(
            process,
            pid,
            ProcessAccess::combine(&[
                ProcessAccess::TERMINATE,
                ProcessAccess::QUERY_INFORMATION,
                ProcessAccess::SYNCHRONIZE,
            ]),
        )
    }
}

/// Start `exe_path` with `cmd` appended to its command line
pub fn create_new_process(
    exe_path: &str,
    cmd: &str,
    flags: CreationFlags,
) -> CleanupResult<SpawnedProcess> {
    let command_line = build_command_line(exe_path, cmd);
    info!("Commandline: {}", cmd);

    let application = exe_path.trim_matches('"');
    let pi = kernel32::create_process(application, &command_line, flags.bits())?;

    Ok(SpawnedProcess {
        pid: pi.dwProcessId,
        tid: pi.dwThreadId,
        process: Handle::new(pi.hProcess),
        thread: Handle::new(pi.hThread),
    })
}

/// Start a process and return only its handle
pub fn make_new_process(
    exe_path: &str,
    cmd: &str,
    flags: CreationFlags,
) -> CleanupResult<ProcessHandle> {
    let spawned = create_new_process(exe_path, cmd, flags)?;
    debug!("PID: {}", spawned.pid);
    Ok(spawned.into_process_handle())
}
