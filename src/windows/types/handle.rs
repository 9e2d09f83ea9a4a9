//! Owned HANDLE wrapper with automatic cleanup

use crate::windows::bindings::kernel32;
use std::fmt;
use std::ptr;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winnt::HANDLE;

/// Owned Windows HANDLE, closed on drop
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Take ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Create a null handle
    pub fn null() -> Self {
        Handle {
            handle: ptr::null_mut(),
        }
    }

    /// Check if handle is null
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Neither null nor `INVALID_HANDLE_VALUE`
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null() && self.handle != INVALID_HANDLE_VALUE
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }

    /// Take ownership of the handle, preventing automatic cleanup
    pub fn take(mut self) -> HANDLE {
        let handle = self.handle;
        self.handle = ptr::null_mut();
        handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.is_valid() {
            // Ignore errors on cleanup
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", self.handle)
    }
}

// HANDLEs are process-wide kernel object references
unsafe impl Send for Handle {}
