//! Windows error code handling utilities

use std::fmt;

/// Win32 error codes the remediation paths branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    FileNotFound = 2,
    PathNotFound = 3,
    AccessDenied = 5,
    InvalidHandle = 6,
    InvalidParameter = 87,
    InsufficientBuffer = 122,
    NoToken = 1008,
    NotAllAssigned = 1300,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            2 => ErrorCode::FileNotFound,
            3 => ErrorCode::PathNotFound,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            122 => ErrorCode::InsufficientBuffer,
            1008 => ErrorCode::NoToken,
            1300 => ErrorCode::NotAllAssigned,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the calling thread's last OS error
    pub fn last_error() -> Self {
        let raw = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        ErrorCode::from(raw as u32)
    }

    /// Numeric value of the code
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::FileNotFound => 2,
            ErrorCode::PathNotFound => 3,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::InvalidParameter => 87,
            ErrorCode::InsufficientBuffer => 122,
            ErrorCode::NoToken => 1008,
            ErrorCode::NotAllAssigned => 1300,
            ErrorCode::Unknown(code) => *code,
        }
    }

    /// The file or file ID no longer exists
    pub fn is_missing(&self) -> bool {
        matches!(self, ErrorCode::FileNotFound | ErrorCode::PathNotFound)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::FileNotFound => write!(f, "File not found"),
            ErrorCode::PathNotFound => write!(f, "Path not found"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::NoToken => write!(f, "No token"),
            ErrorCode::NotAllAssigned => write!(f, "Not all privileges assigned"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}
