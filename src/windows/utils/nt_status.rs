//! NTSTATUS values returned by the native file and process calls

pub type NtStatus = i32;

pub const STATUS_SUCCESS: NtStatus = 0x00000000;
pub const STATUS_INFO_LENGTH_MISMATCH: NtStatus = 0xC0000004_u32 as i32;
pub const STATUS_INVALID_PARAMETER: NtStatus = 0xC000000D_u32 as i32;
pub const STATUS_ACCESS_DENIED: NtStatus = 0xC0000022_u32 as i32;
pub const STATUS_OBJECT_NAME_NOT_FOUND: NtStatus = 0xC0000034_u32 as i32;
pub const STATUS_OBJECT_PATH_NOT_FOUND: NtStatus = 0xC000003A_u32 as i32;
pub const STATUS_SHARING_VIOLATION: NtStatus = 0xC0000043_u32 as i32;
pub const STATUS_DELETE_PENDING: NtStatus = 0xC0000056_u32 as i32;
pub const STATUS_CANNOT_DELETE: NtStatus = 0xC0000121_u32 as i32;

/// Check if NTSTATUS indicates success
pub fn nt_success(status: NtStatus) -> bool {
    status >= 0
}

/// The target object is gone, or about to be
pub fn is_gone(status: NtStatus) -> bool {
    matches!(
        status,
        STATUS_OBJECT_NAME_NOT_FOUND | STATUS_OBJECT_PATH_NOT_FOUND | STATUS_DELETE_PENDING
    )
}
