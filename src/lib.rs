//! dropsweep: Windows file-by-ID and process remediation
//!
//! Resolves and force-deletes files identified by NTFS file IDs, and
//! creates, inspects and terminates processes. Everything that talks to the
//! OS is Windows-only; types, configuration and helpers build everywhere.

pub mod config;
pub mod core;
pub mod files;
pub mod process;
pub mod windows;

pub use core::types::{
    CleanupError, CleanupResult, DeleteOutcome, DeletionStrategy, FileId, KillOutcome, PathKind,
    ProcessId, ThreadId,
};
pub use process::{CreationFlags, INVALID_PID_VALUE};

#[cfg(windows)]
pub use files::{
    delete_by_id, delete_dropped_files, delete_dropped_files_on, get_file_path, list_files,
    list_files_on, set_to_delete, DeleteOptions, Volume,
};
#[cfg(windows)]
pub use process::{
    create_new_process, get_parent_pid, kill_pid, make_new_process, set_debug_privilege,
    DebugPrivilegeGuard,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_module_accessible() {
        assert_eq!(core::VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!core::AUTHORS.is_empty());
    }

    #[test]
    fn test_reexports() {
        let id: FileId = "0x10".parse().unwrap();
        assert_eq!(id, FileId::new(16));
        assert_eq!(DeletionStrategy::default(), DeletionStrategy::Disposition);
        assert_eq!(INVALID_PID_VALUE, u32::MAX);
        assert_eq!(CreationFlags::default(), CreationFlags::NONE);
    }
}
