//! Process handle wrapper with RAII semantics

use crate::core::types::{CleanupError, CleanupResult, ProcessId};
use crate::windows::bindings::{kernel32, ntdll};
use crate::windows::types::Handle;
use crate::windows::utils::ErrorCode;
use std::fmt;
use winapi::um::winnt::HANDLE;

/// Access rights for process handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Terminate the process
    pub const TERMINATE: Self = Self { value: 0x0001 };
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Limited query, granted for protected processes
    pub const QUERY_LIMITED_INFORMATION: Self = Self { value: 0x1000 };
    /// Wait on the process
    pub const SYNCHRONIZE: Self = Self { value: 0x0010_0000 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Owned handle to another process
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
    access: ProcessAccess,
}

impl ProcessHandle {
    /// Wrap an already-open process handle
    pub fn from_handle(handle: Handle, pid: ProcessId, access: ProcessAccess) -> Self {
        ProcessHandle {
            handle,
            pid,
            access,
        }
    }

    /// Open a process with specified access rights
    ///
    /// A PID the kernel rejects (`ERROR_INVALID_PARAMETER`) is reported as
    /// `ProcessNotFound`.
    pub fn open(pid: ProcessId, access: ProcessAccess) -> CleanupResult<Self> {
        let raw_handle = kernel32::open_process(pid, access.value()).map_err(|err| {
            match err.win32_code() {
                Some(ErrorCode::InvalidParameter) => CleanupError::ProcessNotFound(pid),
                Some(ErrorCode::AccessDenied) => {
                    CleanupError::access_denied(pid, format!("{:?} refused", access))
                }
                _ => err,
            }
        })?;
        Ok(ProcessHandle {
            handle: Handle::new(raw_handle),
            pid,
            access,
        })
    }

    /// Open a process for `NtQueryInformationProcess`
    pub fn open_for_query(pid: ProcessId) -> CleanupResult<Self> {
        Self::open(pid, ProcessAccess::QUERY_INFORMATION)
    }

    /// Open a process for termination
    pub fn open_for_terminate(pid: ProcessId) -> CleanupResult<Self> {
        Self::open(pid, ProcessAccess::TERMINATE)
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid as long as this ProcessHandle exists
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Get the access rights
    pub fn access(&self) -> ProcessAccess {
        self.access
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    fn ensure_valid(&self) -> CleanupResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CleanupError::InvalidHandle(format!(
                "process handle for {} is null",
                self.pid
            )))
        }
    }

    /// PID of the process this one was started from
    pub fn parent_pid(&self) -> CleanupResult<ProcessId> {
        self.ensure_valid()?;
        let info = unsafe { ntdll::query_basic_information(self.handle.raw())? };
        Ok(info.inherited_from_unique_process_id as ProcessId)
    }

    /// Terminate the process with `exit_code`
    pub fn terminate(&self, exit_code: u32) -> CleanupResult<()> {
        self.ensure_valid()?;
        unsafe { kernel32::terminate_process(self.handle.raw(), exit_code) }
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .field("access", &format!("0x{:X}", self.access.value()))
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessHandle(pid={}, valid={})",
            self.pid,
            self.is_valid()
        )
    }
}
