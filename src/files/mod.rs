//! File remediation by file-system ID
//!
//! A `Volume` is opened once per drive and used as the hint for every
//! open-by-ID call. IDs can be resolved to DOS or NT paths, listed, or
//! forcibly deleted with one of the `DeletionStrategy` routes.

pub mod naming;

#[cfg(windows)]
pub mod delete;
#[cfg(windows)]
pub mod resolver;
#[cfg(windows)]
pub mod volume;

pub use naming::{
    nt_path_of, nt_volume_root, parse_drive_letter, remove_via_spoiled_rename, spoiled_name,
    SpoilError, DEFAULT_SPOIL_SUFFIX,
};

#[cfg(windows)]
pub use delete::{
    delete_by_id, delete_dropped_files, delete_dropped_files_on, delete_dropped_files_report,
    set_to_delete, DeleteOptions, DeletionReport,
};
#[cfg(windows)]
pub use resolver::{get_file_path, list_files, list_files_on, FileListing, ResolvedFile};
#[cfg(windows)]
pub use volume::Volume;
