//! Custom error types for dropsweep

use crate::windows::utils::ErrorCode;
use thiserror::Error;

/// Main error type for file and process remediation
#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("{operation} failed with status 0x{status:08X}")]
    NtStatus { operation: String, status: u32 },

    #[error("{operation} failed: {code}")]
    Win32 { operation: String, code: ErrorCode },

    #[error("Process not found: {0}")]
    ProcessNotFound(u32),

    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: u32, reason: String },

    #[error("Insufficient privileges: {0}")]
    InsufficientPrivileges(String),

    #[error("Invalid drive letter: {0:?}")]
    InvalidDriveLetter(String),

    #[error("Invalid file ID: {0}")]
    InvalidFileId(String),

    #[error("Cannot resolve path of file {0}")]
    PathResolution(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias for remediation operations
pub type CleanupResult<T> = Result<T, CleanupError>;

impl CleanupError {
    /// Creates a Win32 error from the calling thread's last error code
    pub fn last_win32(operation: impl Into<String>) -> Self {
        CleanupError::Win32 {
            operation: operation.into(),
            code: ErrorCode::last_error(),
        }
    }

    /// Creates a Win32 error with a known code
    pub fn win32(operation: impl Into<String>, code: ErrorCode) -> Self {
        CleanupError::Win32 {
            operation: operation.into(),
            code,
        }
    }

    /// Creates an error from a failed NTSTATUS
    pub fn nt_status(operation: impl Into<String>, status: i32) -> Self {
        CleanupError::NtStatus {
            operation: operation.into(),
            status: status as u32,
        }
    }

    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        CleanupError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Wraps the calling thread's last error as a `windows::core::Error`
    #[cfg(windows)]
    pub fn last_os_error() -> Self {
        CleanupError::WindowsApiError(windows::core::Error::from_win32())
    }

    /// Win32 code carried by this error, if any
    pub fn win32_code(&self) -> Option<ErrorCode> {
        match self {
            CleanupError::Win32 { code, .. } => Some(*code),
            _ => None,
        }
    }
}
