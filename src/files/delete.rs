//! Forced deletion of files identified by ID
//!
//! Two strategies are supported. `Disposition` reopens the file by ID with
//! `DELETE` access and flags it for deletion on that handle; if the ID route
//! is refused the file is reopened by its NT path and flagged there.
//! `RenameThenDelete` works on the DOS path: the file is first renamed to a
//! spoiled name so nothing can load it again, then removed.

use super::naming::{nt_path_of, remove_via_spoiled_rename, DEFAULT_SPOIL_SUFFIX};
use super::volume::Volume;
use crate::core::types::{
    CleanupError, CleanupResult, DeleteOutcome, DeletionStrategy, FileId, PathKind,
};
use crate::windows::bindings::{kernel32, ntdll};
use crate::windows::types::Handle;
use crate::windows::utils::nt_status::{is_gone, nt_success};
use crate::windows::utils::ErrorCode;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};
use winapi::um::winnt::{
    DELETE, FILE_READ_ATTRIBUTES, FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE,
    SYNCHRONIZE,
};

/// Options for deleting files by ID
#[derive(Debug, Clone)]
pub struct DeleteOptions {
    pub strategy: DeletionStrategy,
    /// Suffix used by `RenameThenDelete`
    pub spoil_suffix: String,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        DeleteOptions {
            strategy: DeletionStrategy::Disposition,
            spoil_suffix: DEFAULT_SPOIL_SUFFIX.to_string(),
        }
    }
}

/// Per-ID results of a deletion sweep
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeletionReport {
    pub removed: Vec<(FileId, DeleteOutcome)>,
    pub remaining: Vec<FileId>,
}

impl DeletionReport {
    /// Number of IDs removed from the working set
    pub fn processed(&self) -> usize {
        self.removed.len()
    }
}

/// Paths of a file captured before its handle is closed
struct KnownPaths {
    nt: Option<String>,
    dos: Option<String>,
}

/// Flag the file at `nt_path` for deletion via `NtCreateFile`
///
/// A file the kernel reports as nonexistent counts as deleted.
pub fn set_to_delete(nt_path: &str) -> CleanupResult<()> {
    let opened = ntdll::create_file(
        nt_path,
        SYNCHRONIZE | DELETE,
        FILE_SHARE_DELETE,
        ntdll::FILE_OPEN,
        ntdll::FILE_SYNCHRONOUS_IO_NONALERT,
    );

    let file = match opened {
        Ok(raw) => Handle::new(raw),
        Err(failure) => {
            if failure.io.information == ntdll::FILE_DOES_NOT_EXIST || is_gone(failure.status) {
                debug!("{} already deleted", nt_path);
                return Ok(());
            }
            warn!(
                "Failed to open the file for deletion: 0x{:08X}",
                failure.status as u32
            );
            return Err(failure.into_error("NtCreateFile"));
        }
    };

    let (status, io) = unsafe { ntdll::set_delete_disposition(file.raw()) };
    drop(file);
    debug!(
        "Attempted to set delete disposition, status: 0x{:08X} IO status: 0x{:08X}",
        status as u32,
        io.status() as u32
    );

    if nt_success(status) {
        Ok(())
    } else {
        Err(CleanupError::nt_status("NtSetInformationFile", status))
    }
}

/// Open the file by ID with `DELETE` access and flag it on that handle
fn dispose_by_id(volume: &Volume, id: FileId) -> CleanupResult<()> {
    let file = volume.open_by_id(
        id,
        SYNCHRONIZE | DELETE,
        FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
    )?;
    let (status, _io) = unsafe { ntdll::set_delete_disposition(file.raw()) };
    if nt_success(status) {
        Ok(())
    } else {
        Err(CleanupError::nt_status("NtSetInformationFile", status))
    }
}

fn known_paths(file: &Handle) -> KnownPaths {
    let nt = unsafe { kernel32::final_path_name(file.raw(), PathKind::Nt) }.ok();
    let dos = unsafe { kernel32::final_path_name(file.raw(), PathKind::Dos) }.ok();
    KnownPaths { nt, dos }
}

fn delete_by_disposition(volume: &Volume, id: FileId, paths: &KnownPaths) -> CleanupResult<()> {
    let by_id = match dispose_by_id(volume, id) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    debug!("Deletion by ID {} refused: {}", id, by_id);

    // file cannot be deleted by its ID, so reopen it again by name
    delete_by_name(paths).map_err(|err| err.unwrap_or(by_id))
}

/// NT path first, then the DOS path
///
/// `Err(None)` means neither path was known.
fn delete_by_name(paths: &KnownPaths) -> Result<(), Option<CleanupError>> {
    let by_nt = match &paths.nt {
        Some(nt) => match set_to_delete(nt) {
            Ok(()) => return Ok(()),
            Err(err) => Some(err),
        },
        None => None,
    };

    let Some(dos) = &paths.dos else {
        return Err(by_nt);
    };
    match std::fs::remove_file(dos) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!("DeleteFile({}) failed: {}", dos, err);
            Err(Some(by_nt.unwrap_or_else(|| err.into())))
        }
    }
}

fn delete_by_rename(paths: &KnownPaths, spoil_suffix: &str) -> CleanupResult<()> {
    let Some(dos) = &paths.dos else {
        return match &paths.nt {
            Some(nt) => set_to_delete(nt),
            None => Err(CleanupError::PathResolution("no DOS path".to_string())),
        };
    };

    let err = match remove_via_spoiled_rename(Path::new(dos), spoil_suffix) {
        Ok(removed) => {
            debug!("Removed {}", removed.display());
            return Ok(());
        }
        Err(err) => err,
    };

    // the file now lives at `err.path`; the old NT path may be stale
    let leftover = if err.renamed {
        nt_path_of(&err.path)
    } else {
        paths.nt.clone().or_else(|| nt_path_of(&err.path))
    };
    match leftover {
        Some(nt) => {
            debug!("Rename-then-delete failed ({}), falling back to {}", err, nt);
            set_to_delete(&nt)
        }
        None => Err(CleanupError::IoError(err.source)),
    }
}

/// `OpenFileById` answers `ERROR_INVALID_PARAMETER` for a reclaimed ID;
/// some builds report a plain not-found instead
fn id_is_gone(code: ErrorCode) -> bool {
    code == ErrorCode::InvalidParameter || code.is_missing()
}

/// Delete one file identified by `id` on `volume`
///
/// An ID that no longer exists yields `AlreadyGone`.
pub fn delete_by_id(
    volume: &Volume,
    id: FileId,
    options: &DeleteOptions,
) -> CleanupResult<DeleteOutcome> {
    let file = match volume.open_by_id(id, SYNCHRONIZE | FILE_READ_ATTRIBUTES, FILE_SHARE_READ) {
        Ok(file) => file,
        Err(err) if err.win32_code().is_some_and(id_is_gone) => {
            return Ok(DeleteOutcome::AlreadyGone);
        }
        Err(err) => return Err(err),
    };

    let paths = known_paths(&file);
    drop(file);

    if paths.nt.is_none() && paths.dos.is_none() {
        return Err(CleanupError::PathResolution(id.to_string()));
    }
    if let Some(dos) = &paths.dos {
        debug!("File: {}", dos);
    }

    match options.strategy {
        DeletionStrategy::Disposition => delete_by_disposition(volume, id, &paths)?,
        DeletionStrategy::RenameThenDelete => delete_by_rename(&paths, &options.spoil_suffix)?,
    }
    Ok(DeleteOutcome::Deleted)
}

/// Delete every file in `ids`, removing the handled ones from the set
///
/// Failed IDs stay in the set so the caller can retry them later.
pub fn delete_dropped_files_report(
    volume: &Volume,
    ids: &mut BTreeSet<FileId>,
    options: &DeleteOptions,
) -> DeletionReport {
    let mut report = DeletionReport::default();

    ids.retain(|&id| match delete_by_id(volume, id, options) {
        Ok(outcome) => {
            report.removed.push((id, outcome));
            false
        }
        Err(err) => {
            warn!("Failed to delete dropped file {}: {}", id, err);
            report.remaining.push(id);
            true
        }
    });

    report
}

/// Delete every file in `ids`; returns how many were removed from the set
pub fn delete_dropped_files(
    volume: &Volume,
    ids: &mut BTreeSet<FileId>,
    options: &DeleteOptions,
) -> usize {
    delete_dropped_files_report(volume, ids, options).processed()
}

/// Open the volume for `drive` and delete `ids` on it
///
/// An unopenable volume processes nothing.
pub fn delete_dropped_files_on(
    drive: &str,
    ids: &mut BTreeSet<FileId>,
    options: &DeleteOptions,
) -> usize {
    match Volume::open(drive) {
        Ok(volume) => delete_dropped_files(&volume, ids, options),
        Err(err) => {
            warn!("Cannot open volume {}: {}", drive, err);
            0
        }
    }
}
