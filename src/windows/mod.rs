//! Windows API layer for file and process remediation
//!
//! Provides safe wrappers around the Win32 and native (ntdll) functions
//! the file and process layers call. All unsafe FFI calls are contained
//! within `bindings`; `utils` is plain data handling and builds anywhere.

#[cfg(windows)]
pub mod bindings;
#[cfg(windows)]
pub mod types;
pub mod utils;

// Re-export commonly used types
#[cfg(windows)]
pub use types::Handle;
pub use utils::ErrorCode;

// Re-export key bindings
#[cfg(windows)]
pub use bindings::{kernel32, ntdll};
