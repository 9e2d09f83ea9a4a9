//! Volume root handles used as the hint for open-by-ID

use super::naming::{nt_volume_root, parse_drive_letter};
use crate::core::types::{CleanupResult, FileId, PathKind};
use crate::windows::bindings::{kernel32, ntdll};
use crate::windows::types::Handle;
use std::fmt;
use tracing::debug;
use winapi::um::winnt::{FILE_READ_ATTRIBUTES, FILE_SHARE_READ, SYNCHRONIZE};

/// An open handle on the root directory of a volume
pub struct Volume {
    handle: Handle,
    letter: char,
}

impl Volume {
    /// Open `\??\<letter>:\` for attribute reads
    pub fn open(drive: &str) -> CleanupResult<Self> {
        let letter = parse_drive_letter(drive)?;
        let root = nt_volume_root(drive)?;

        let raw = ntdll::open_file(
            &root,
            SYNCHRONIZE | FILE_READ_ATTRIBUTES,
            FILE_SHARE_READ,
            ntdll::FILE_DIRECTORY_FILE | ntdll::FILE_SYNCHRONOUS_IO_NONALERT,
        )
        .map_err(|failure| failure.into_error(&format!("NtOpenFile({})", root)))?;

        debug!("opened volume root {}", root);
        Ok(Volume {
            handle: Handle::new(raw),
            letter,
        })
    }

    /// Upper-case drive letter of this volume
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Open a file on this volume by its ID
    pub fn open_by_id(&self, id: FileId, access: u32, share: u32) -> CleanupResult<Handle> {
        let raw = unsafe { kernel32::open_file_by_id(self.handle.raw(), id, access, share)? };
        Ok(Handle::new(raw))
    }

    /// Open a file by ID with read-attribute access and resolve its path
    pub fn path_of(&self, id: FileId, kind: PathKind) -> CleanupResult<String> {
        let file = self.open_by_id(id, SYNCHRONIZE | FILE_READ_ATTRIBUTES, FILE_SHARE_READ)?;
        unsafe { kernel32::final_path_name(file.raw(), kind) }
    }
}

impl fmt::Debug for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Volume")
            .field("letter", &self.letter)
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CleanupError;

    #[test]
    fn test_open_rejects_bad_letter_before_os_call() {
        let result = Volume::open("not-a-drive");
        assert!(matches!(result, Err(CleanupError::InvalidDriveLetter(_))));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_system_volume() {
        let system_drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        let volume = Volume::open(&system_drive).unwrap();
        assert!(volume.letter().is_ascii_uppercase());
        assert!(format!("{:?}", volume).contains("Volume"));
    }
}
