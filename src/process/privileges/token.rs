//! Thread token access and privilege adjustment

use crate::core::types::{CleanupError, CleanupResult};
use crate::windows::types::Handle;
use crate::windows::utils::string_conv::string_to_wide;
use crate::windows::utils::ErrorCode;
use std::{mem, ptr};
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::processthreadsapi::{GetCurrentThread, OpenThreadToken};
use winapi::um::securitybaseapi::{AdjustTokenPrivileges, ImpersonateSelf};
use winapi::um::winbase::LookupPrivilegeValueW;
use winapi::um::winnt::{
    SecurityImpersonation, HANDLE, LUID, LUID_AND_ATTRIBUTES, SE_PRIVILEGE_ENABLED,
    TOKEN_ADJUST_PRIVILEGES, TOKEN_PRIVILEGES, TOKEN_QUERY,
};

fn open_current_thread_token() -> Result<HANDLE, ErrorCode> {
    let mut token: HANDLE = ptr::null_mut();
    let ok = unsafe {
        OpenThreadToken(
            GetCurrentThread(),
            TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY,
            FALSE,
            &mut token,
        )
    };
    if ok == FALSE {
        Err(ErrorCode::last_error())
    } else {
        Ok(token)
    }
}

/// Open the calling thread's token for privilege adjustment
///
/// A thread without its own token first impersonates the process token
/// (`SecurityImpersonation`), so adjustments stay local to this thread.
pub fn open_thread_token() -> CleanupResult<Handle> {
    match open_current_thread_token() {
        Ok(token) => Ok(Handle::new(token)),
        Err(ErrorCode::NoToken) => {
            if unsafe { ImpersonateSelf(SecurityImpersonation) } == FALSE {
                return Err(CleanupError::last_win32("ImpersonateSelf"));
            }
            open_current_thread_token()
                .map(Handle::new)
                .map_err(|code| CleanupError::win32("OpenThreadToken", code))
        }
        Err(code) => Err(CleanupError::win32("OpenThreadToken", code)),
    }
}

/// `AdjustTokenPrivileges` reports partial failure only through the last error
fn check_adjust(ok: i32, operation: &str, privilege: &str) -> CleanupResult<()> {
    if ok == FALSE {
        return Err(CleanupError::last_win32(operation));
    }
    match ErrorCode::last_error() {
        ErrorCode::Success => Ok(()),
        ErrorCode::NotAllAssigned => Err(CleanupError::InsufficientPrivileges(format!(
            "{} is not held by the token",
            privilege
        ))),
        code => Err(CleanupError::win32(operation, code)),
    }
}

/// Enable or disable `privilege` on `token`
///
/// The current attributes are read back with a first adjustment and then
/// re-applied with `SE_PRIVILEGE_ENABLED` set or cleared. Returns whether the
/// privilege was enabled before the call.
pub fn set_privilege(token: &Handle, privilege: &str, enable: bool) -> CleanupResult<bool> {
    if !token.is_valid() {
        return Err(CleanupError::InvalidHandle("token handle is null".to_string()));
    }

    let name = string_to_wide(privilege);
    let mut luid = LUID {
        LowPart: 0,
        HighPart: 0,
    };
    if unsafe { LookupPrivilegeValueW(ptr::null(), name.as_ptr(), &mut luid) } == FALSE {
        return Err(CleanupError::last_win32(format!(
            "LookupPrivilegeValueW({})",
            privilege
        )));
    }

    let mut query = TOKEN_PRIVILEGES {
        PrivilegeCount: 1,
        Privileges: [LUID_AND_ATTRIBUTES {
            Luid: luid,
            Attributes: 0,
        }],
    };
    let mut previous: TOKEN_PRIVILEGES = unsafe { mem::zeroed() };
    let mut previous_len = mem::size_of::<TOKEN_PRIVILEGES>() as DWORD;

    let ok = unsafe {
        AdjustTokenPrivileges(
            token.raw(),
            FALSE,
            &mut query,
            mem::size_of::<TOKEN_PRIVILEGES>() as DWORD,
            &mut previous,
            &mut previous_len,
        )
    };
    check_adjust(ok, "AdjustTokenPrivileges(query)", privilege)?;

    // the query disables the privilege; nothing changed if it was already off
    let was_enabled = previous.PrivilegeCount != 0
        && previous.Privileges[0].Attributes & SE_PRIVILEGE_ENABLED != 0;

    previous.PrivilegeCount = 1;
    previous.Privileges[0].Luid = luid;
    previous.Privileges[0].Attributes = apply_enabled(previous.Privileges[0].Attributes, enable);

    let ok = unsafe {
        AdjustTokenPrivileges(
            token.raw(),
            FALSE,
            &mut previous,
            previous_len,
            ptr::null_mut(),
            ptr::null_mut(),
        )
    };
    check_adjust(ok, "AdjustTokenPrivileges(set)", privilege)?;

    Ok(was_enabled)
}

fn apply_enabled(attributes: DWORD, enable: bool) -> DWORD {
    if enable {
        attributes | SE_PRIVILEGE_ENABLED
    } else {
        attributes & !SE_PRIVILEGE_ENABLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_enabled() {
        assert_eq!(apply_enabled(0, true), SE_PRIVILEGE_ENABLED);
        assert_eq!(apply_enabled(SE_PRIVILEGE_ENABLED, false), 0);
        // other attribute bits survive
        assert_eq!(apply_enabled(0x1 | SE_PRIVILEGE_ENABLED, false), 0x1);
    }

    #[test]
    fn test_set_privilege_on_null_token() {
        let token = Handle::null();
        let result = set_privilege(&token, "SeDebugPrivilege", true);
        assert!(matches!(result, Err(CleanupError::InvalidHandle(_))));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_unknown_privilege_name_fails() {
        let token = open_thread_token().unwrap();
        let result = set_privilege(&token, "SeNonexistentPrivilege", true);
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_previous_state_of_change_notify() {
        // held and enabled by every standard token
        let token = open_thread_token().unwrap();
        assert_eq!(set_privilege(&token, "SeChangeNotifyPrivilege", true).unwrap(), true);
        assert_eq!(set_privilege(&token, "SeChangeNotifyPrivilege", false).unwrap(), true);
        assert_eq!(set_privilege(&token, "SeChangeNotifyPrivilege", false).unwrap(), false);
        assert_eq!(set_privilege(&token, "SeChangeNotifyPrivilege", true).unwrap(), false);
        assert_eq!(set_privilege(&token, "SeChangeNotifyPrivilege", true).unwrap(), true);
    }
}
