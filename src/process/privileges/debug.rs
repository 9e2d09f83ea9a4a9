//! SeDebugPrivilege handling for the calling thread

use super::token::{open_thread_token, set_privilege};
use crate::core::types::CleanupResult;
use crate::windows::types::Handle;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Privilege name accepted by `LookupPrivilegeValueW`
pub const SE_DEBUG_NAME: &str = "SeDebugPrivilege";

static DEBUG_PRIVILEGE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Check if SeDebugPrivilege was enabled through this crate
pub fn has_debug_privilege() -> bool {
    DEBUG_PRIVILEGE_ENABLED.load(Ordering::Relaxed)
}

/// Enable SeDebugPrivilege on the calling thread's token
///
/// Fails with `InsufficientPrivileges` when the account does not hold the
/// privilege at all, as is the case outside an elevated administrator session.
pub fn set_debug_privilege() -> CleanupResult<()> {
    let token = open_thread_token()?;
    set_privilege(&token, SE_DEBUG_NAME, true)?;
    DEBUG_PRIVILEGE_ENABLED.store(true, Ordering::Relaxed);
    debug!("{} enabled", SE_DEBUG_NAME);
    Ok(())
}

/// RAII guard for temporarily enabling debug privilege
///
/// The privilege is disabled again on drop unless it was already enabled.
pub struct DebugPrivilegeGuard {
    token: Handle,
    was_enabled: bool,
}

impl DebugPrivilegeGuard {
    pub fn new() -> CleanupResult<Self> {
        let token = open_thread_token()?;
        let was_enabled = set_privilege(&token, SE_DEBUG_NAME, true)?;
        DEBUG_PRIVILEGE_ENABLED.store(true, Ordering::Relaxed);
        Ok(DebugPrivilegeGuard { token, was_enabled })
    }

    /// Whether the privilege was already enabled before the guard
    pub fn was_enabled(&self) -> bool {
        self.was_enabled
    }
}

impl Drop for DebugPrivilegeGuard {
    fn drop(&mut self) {
        if self.was_enabled {
            return;
        }
        match set_privilege(&self.token, SE_DEBUG_NAME, false) {
            Ok(_) => DEBUG_PRIVILEGE_ENABLED.store(false, Ordering::Relaxed),
            Err(err) => warn!("Could not disable {}: {}", SE_DEBUG_NAME, err),
        }
    }
}
