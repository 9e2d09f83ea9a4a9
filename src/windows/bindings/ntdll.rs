//! NTDLL.dll bindings for native file and process operations

use crate::core::types::{CleanupError, CleanupResult};
use crate::windows::utils::nt_status::{nt_success, NtStatus};
use crate::windows::utils::string_conv::string_to_wide;
use std::{mem, ptr};
use winapi::shared::minwindef::ULONG;
use winapi::shared::ntdef::PVOID;
use winapi::um::winnt::HANDLE;

// ObjectAttributes flags
pub const OBJ_CASE_INSENSITIVE: ULONG = 0x00000040;

// CreateDisposition
pub const FILE_OPEN: ULONG = 0x00000001;

// CreateOptions / OpenOptions
pub const FILE_DIRECTORY_FILE: ULONG = 0x00000001;
pub const FILE_SYNCHRONOUS_IO_NONALERT: ULONG = 0x00000020;

// IoStatusBlock.Information value for create/open
pub const FILE_DOES_NOT_EXIST: usize = 5;

const STATUS_NAME_TOO_LONG: NtStatus = 0xC0000106_u32 as i32;

pub const FILE_ATTRIBUTE_NORMAL: ULONG = 0x00000080;

/// File information class for NtSetInformationFile
#[repr(C)]
pub enum FileInfoClass {
    FileDispositionInformation = 13,
}

/// Process information class for NtQueryInformationProcess
#[repr(C)]
pub enum ProcessInfoClass {
    ProcessBasicInformation = 0,
}

#[repr(C)]
pub struct UnicodeString {
    pub length: u16,
    pub maximum_length: u16,
    pub buffer: *mut u16,
}

#[repr(C)]
pub struct ObjectAttributes {
    pub length: ULONG,
    pub root_directory: HANDLE,
    pub object_name: *mut UnicodeString,
    pub attributes: ULONG,
    pub security_descriptor: PVOID,
    pub security_quality_of_service: PVOID,
}

/// `Status` shares a pointer-sized union with `Pointer`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct IoStatusBlock {
    pub status: isize,
    pub information: usize,
}

impl IoStatusBlock {
    pub fn status(&self) -> NtStatus {
        self.status as NtStatus
    }
}

#[repr(C)]
pub struct FileDispositionInformation {
    pub delete_file: u8,
}

/// Basic process information structure
#[repr(C)]
pub struct ProcessBasicInfo {
    pub exit_status: NtStatus,
    pub peb_base_address: PVOID,
    pub affinity_mask: usize,
    pub base_priority: i32,
    pub unique_process_id: usize,
    pub inherited_from_unique_process_id: usize,
}

#[link(name = "ntdll")]
extern "system" {
    fn NtOpenFile(
        file_handle: *mut HANDLE,
        desired_access: ULONG,
        object_attributes: *mut ObjectAttributes,
        io_status_block: *mut IoStatusBlock,
        share_access: ULONG,
        open_options: ULONG,
    ) -> NtStatus;

    fn NtCreateFile(
        file_handle: *mut HANDLE,
        desired_access: ULONG,
        object_attributes: *mut ObjectAttributes,
        io_status_block: *mut IoStatusBlock,
        allocation_size: *mut i64,
        file_attributes: ULONG,
        share_access: ULONG,
        create_disposition: ULONG,
        create_options: ULONG,
        ea_buffer: PVOID,
        ea_length: ULONG,
    ) -> NtStatus;

    fn NtSetInformationFile(
        file_handle: HANDLE,
        io_status_block: *mut IoStatusBlock,
        file_information: PVOID,
        length: ULONG,
        file_information_class: ULONG,
    ) -> NtStatus;

    fn NtQueryInformationProcess(
        process_handle: HANDLE,
        process_info_class: ULONG,
        process_info: PVOID,
        process_info_length: ULONG,
        return_length: *mut ULONG,
    ) -> NtStatus;
}

/// A failed create/open, with the IO status the kernel filled in
#[derive(Debug, Clone, Copy)]
pub struct NtOpenFailure {
    pub status: NtStatus,
    pub io: IoStatusBlock,
}

impl NtOpenFailure {
    pub fn into_error(self, operation: &str) -> CleanupError {
        CleanupError::nt_status(operation, self.status)
    }
}

/// Owned NT object name, kept alive for the duration of a call
struct ObjectName {
    wide: Vec<u16>,
    unicode: UnicodeString,
}

impl ObjectName {
    fn new(path: &str) -> Result<Box<Self>, NtOpenFailure> {
        let wide = string_to_wide(path);
        let byte_len = (wide.len() - 1) * mem::size_of::<u16>();
        if byte_len > (u16::MAX as usize) - mem::size_of::<u16>() {
            return Err(NtOpenFailure {
                status: STATUS_NAME_TOO_LONG,
                io: IoStatusBlock::default(),
            });
        }
        let mut name = Box::new(ObjectName {
            wide,
            unicode: UnicodeString {
                length: byte_len as u16,
                maximum_length: (byte_len + mem::size_of::<u16>()) as u16,
                buffer: ptr::null_mut(),
            },
        });
        name.unicode.buffer = name.wide.as_mut_ptr();
        Ok(name)
    }

    fn attributes(&mut self) -> ObjectAttributes {
        ObjectAttributes {
            length: mem::size_of::<ObjectAttributes>() as ULONG,
            root_directory: ptr::null_mut(),
            object_name: &mut self.unicode,
            attributes: OBJ_CASE_INSENSITIVE,
            security_descriptor: ptr::null_mut(),
            security_quality_of_service: ptr::null_mut(),
        }
    }
}

/// Safe wrapper for NtOpenFile on a case-insensitive NT path
///
/// The returned handle is owned by the caller.
pub fn open_file(
    path: &str,
    desired_access: u32,
    share_access: u32,
    open_options: u32,
) -> Result<HANDLE, NtOpenFailure> {
    let mut name = ObjectName::new(path)?;
    let mut attributes = name.attributes();
    let mut io = IoStatusBlock::default();
    let mut handle: HANDLE = ptr::null_mut();

    let status = unsafe {
        NtOpenFile(
            &mut handle,
            desired_access,
            &mut attributes,
            &mut io,
            share_access,
            open_options,
        )
    };

    if nt_success(status) {
        Ok(handle)
    } else {
        Err(NtOpenFailure { status, io })
    }
}

/// Safe wrapper for NtCreateFile opening an existing file
pub fn create_file(
    path: &str,
    desired_access: u32,
    share_access: u32,
    create_disposition: u32,
    create_options: u32,
) -> Result<HANDLE, NtOpenFailure> {
    let mut name = ObjectName::new(path)?;
    let mut attributes = name.attributes();
    let mut io = IoStatusBlock::default();
    let mut handle: HANDLE = ptr::null_mut();

    let status = unsafe {
        NtCreateFile(
            &mut handle,
            desired_access,
            &mut attributes,
            &mut io,
            ptr::null_mut(),
            FILE_ATTRIBUTE_NORMAL,
            share_access,
            create_disposition,
            create_options,
            ptr::null_mut(),
            0,
        )
    };

    if nt_success(status) {
        Ok(handle)
    } else {
        Err(NtOpenFailure { status, io })
    }
}

/// Mark an open file for deletion on last close
///
/// # Safety
/// The handle must be a valid file handle opened with `DELETE` access
pub unsafe fn set_delete_disposition(handle: HANDLE) -> (NtStatus, IoStatusBlock) {
    let mut io = IoStatusBlock::default();
    let mut disposition = FileDispositionInformation { delete_file: 1 };

    let status = NtSetInformationFile(
        handle,
        &mut io,
        &mut disposition as *mut _ as PVOID,
        mem::size_of::<FileDispositionInformation>() as ULONG,
        FileInfoClass::FileDispositionInformation as ULONG,
    );
    (status, io)
}

/// Safe wrapper for NtQueryInformationProcess(ProcessBasicInformation)
///
/// # Safety
/// The handle must be a valid process handle with query access
pub unsafe fn query_basic_information(handle: HANDLE) -> CleanupResult<ProcessBasicInfo> {
    let mut info = ProcessBasicInfo {
        exit_status: 0,
        peb_base_address: ptr::null_mut(),
        affinity_mask: 0,
        base_priority: 0,
        unique_process_id: 0,
        inherited_from_unique_process_id: 0,
    };

    let mut return_length = 0u32;

    let status = NtQueryInformationProcess(
        handle,
        ProcessInfoClass::ProcessBasicInformation as ULONG,
        &mut info as *mut _ as PVOID,
        mem::size_of::<ProcessBasicInfo>() as ULONG,
        &mut return_length,
    );

    if nt_success(status) {
        Ok(info)
    } else {
        Err(CleanupError::nt_status("NtQueryInformationProcess", status))
    }
}
