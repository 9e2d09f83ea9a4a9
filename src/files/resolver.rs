//! Resolving file IDs to paths

use super::volume::Volume;
use crate::core::types::{CleanupResult, FileId, PathKind};
use serde::Serialize;
use tracing::{debug, warn};

/// A file ID together with the path it currently resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub id: FileId,
    pub path: String,
}

/// Outcome of listing a set of file IDs
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileListing {
    pub resolved: Vec<ResolvedFile>,
    pub unresolved: Vec<FileId>,
}

impl FileListing {
    /// Number of IDs that resolved to a path
    pub fn processed(&self) -> usize {
        self.resolved.len()
    }
}

/// Resolve a file ID on `volume` to its DOS or NT path
pub fn get_file_path(volume: &Volume, id: FileId, kind: PathKind) -> CleanupResult<String> {
    volume.path_of(id, kind)
}

/// Resolve every ID to its DOS path, skipping the ones that fail
pub fn list_files<'a, I>(volume: &Volume, ids: I) -> FileListing
where
    I: IntoIterator<Item = &'a FileId>,
{
    let mut listing = FileListing::default();

    for &id in ids {
        match get_file_path(volume, id, PathKind::Dos) {
            Ok(path) => {
                debug!("File: {}", path);
                listing.resolved.push(ResolvedFile { id, path });
            }
            Err(err) => {
                warn!("Failed to retrieve the name of the file with ID {}: {}", id, err);
                listing.unresolved.push(id);
            }
        }
    }

    listing
}

/// Open the volume for `drive` and list `ids` on it
///
/// An unopenable volume yields an empty listing.
pub fn list_files_on<'a, I>(drive: &str, ids: I) -> FileListing
where
    I: IntoIterator<Item = &'a FileId>,
{
    match Volume::open(drive) {
        Ok(volume) => list_files(&volume, ids),
        Err(err) => {
            warn!("Cannot open volume {}: {}", drive, err);
            FileListing::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_listing_counts_resolved_only() {
        let listing = FileListing {
            resolved: vec![ResolvedFile {
                id: FileId::new(5),
                path: r"\\?\C:\a.txt".to_string(),
            }],
            unresolved: vec![FileId::new(6), FileId::new(7)],
        };
        assert_eq!(listing.processed(), 1);
    }

    #[test]
    fn test_list_on_bad_drive_is_empty() {
        let ids: BTreeSet<FileId> = [FileId::new(1), FileId::new(2)].into_iter().collect();
        let listing = list_files_on("??", &ids);
        assert_eq!(listing.processed(), 0);
        assert!(listing.unresolved.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_unknown_id_is_reported_unresolved() {
        let system_drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        let Ok(volume) = Volume::open(&system_drive) else { return };

        // record number and sequence both all-ones: never allocated
        let listing = list_files(&volume, &[FileId::new(-1)]);
        assert_eq!(listing.processed(), 0);
        assert_eq!(listing.unresolved, vec![FileId::new(-1)]);
    }
}
