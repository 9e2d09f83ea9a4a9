//! Kernel32.dll bindings for file-by-ID and process operations

use crate::core::types::{CleanupError, CleanupResult, FileId, PathKind};
use crate::windows::utils::error_codes::ErrorCode;
use crate::windows::utils::string_conv::{string_to_wide, wide_to_string};
use std::{mem, ptr};
use winapi::shared::minwindef::{BOOL, DWORD, FALSE};
use winapi::um::fileapi::GetFinalPathNameByHandleW;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::processthreadsapi::{
    CreateProcessW, OpenProcess, TerminateProcess, PROCESS_INFORMATION, STARTUPINFOW,
};
use winapi::um::winbase::{
    FileIdType, OpenFileById, FILE_FLAG_BACKUP_SEMANTICS, FILE_ID_DESCRIPTOR,
};
use winapi::um::winnt::HANDLE;

/// `FILE_ID_DESCRIPTOR` selecting a 64-bit file reference number
fn file_id_descriptor(file_id: FileId) -> FILE_ID_DESCRIPTOR {
    let mut descriptor: FILE_ID_DESCRIPTOR = unsafe { mem::zeroed() };
    descriptor.dwSize = mem::size_of::<FILE_ID_DESCRIPTOR>() as DWORD;
    descriptor.Type = FileIdType;
    unsafe {
        *descriptor.u.FileId_mut().QuadPart_mut() = file_id.raw();
    }
    descriptor
}

/// Safe wrapper for OpenProcess
///
/// Failures keep the Win32 code so callers can tell a vanished PID
/// (`ERROR_INVALID_PARAMETER`) from a refused one.
pub fn open_process(pid: u32, desired_access: u32) -> CleanupResult<HANDLE> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(CleanupError::last_win32(format!("OpenProcess({})", pid)))
        } else {
            Ok(handle)
        }
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> CleanupResult<()> {
    if handle.is_null() || handle == INVALID_HANDLE_VALUE {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(CleanupError::last_os_error())
    } else {
        Ok(())
    }
}

/// Safe wrapper for OpenFileById with a `FileIdType` descriptor
///
/// `FILE_FLAG_BACKUP_SEMANTICS` lets the ID name a directory as well.
///
/// # Safety
/// `volume` must be a valid handle to a file or directory on the target volume
pub unsafe fn open_file_by_id(
    volume: HANDLE,
    file_id: FileId,
    desired_access: u32,
    share_mode: u32,
) -> CleanupResult<HANDLE> {
    let mut descriptor = file_id_descriptor(file_id);
    let handle = OpenFileById(
        volume,
        &mut descriptor,
        desired_access,
        share_mode,
        ptr::null_mut(),
        FILE_FLAG_BACKUP_SEMANTICS,
    );

    if handle.is_null() || handle == INVALID_HANDLE_VALUE {
        Err(CleanupError::last_win32(format!("OpenFileById({})", file_id)))
    } else {
        Ok(handle)
    }
}

/// Safe wrapper for GetFinalPathNameByHandleW
///
/// Starts with the buffer size suited to `kind` and retries once with the
/// length the OS asks for.
///
/// # Safety
/// The handle must be a valid file handle
pub unsafe fn final_path_name(handle: HANDLE, kind: PathKind) -> CleanupResult<String> {
    let mut capacity = kind.initial_capacity();

    for _ in 0..2 {
        let mut buffer = vec![0u16; capacity];
        let len = GetFinalPathNameByHandleW(
            handle,
            buffer.as_mut_ptr(),
            buffer.len() as DWORD,
            kind.flag(),
        ) as usize;

        if len == 0 {
            return Err(CleanupError::last_win32("GetFinalPathNameByHandleW"));
        }
        if len < buffer.len() {
            return Ok(wide_to_string(&buffer[..len]));
        }
        // too small: `len` is the required size including the terminator
        capacity = len;
    }

    Err(CleanupError::win32(
        "GetFinalPathNameByHandleW",
        ErrorCode::InsufficientBuffer,
    ))
}

/// Safe wrapper for TerminateProcess
///
/// # Safety
/// The handle must be a valid process handle opened with `PROCESS_TERMINATE`
pub unsafe fn terminate_process(handle: HANDLE, exit_code: u32) -> CleanupResult<()> {
    let ok: BOOL = TerminateProcess(handle, exit_code);
    if ok == FALSE {
        Err(CleanupError::last_win32("TerminateProcess"))
    } else {
        Ok(())
    }
}

/// Safe wrapper for CreateProcessW without handle inheritance
///
/// Both handles in the returned `PROCESS_INFORMATION` are owned by the caller.
pub fn create_process(
    application: &str,
    command_line: &str,
    creation_flags: u32,
) -> CleanupResult<PROCESS_INFORMATION> {
    let application = string_to_wide(application);
    // CreateProcessW may write into the command line buffer
    let mut command_line = string_to_wide(command_line);

    unsafe {
        let mut startup: STARTUPINFOW = mem::zeroed();
        startup.cb = mem::size_of::<STARTUPINFOW>() as DWORD;
        let mut info: PROCESS_INFORMATION = mem::zeroed();

        let ok = CreateProcessW(
            application.as_ptr(),
            command_line.as_mut_ptr(),
            ptr::null_mut(),
            ptr::null_mut(),
            FALSE,
            creation_flags,
            ptr::null_mut(),
            ptr::null(),
            &mut startup,
            &mut info,
        );

        if ok == FALSE {
            Err(CleanupError::last_win32("CreateProcessW"))
        } else {
            Ok(info)
        }
    }
}
