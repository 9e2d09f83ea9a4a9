//! Integration tests for resolving and deleting files by ID

#![cfg(windows)]

use dropsweep::files::{
    delete_by_id, delete_dropped_files, get_file_path, list_files, list_files_on, DeleteOptions,
    Volume,
};
use dropsweep::windows::utils::string_conv::strip_verbatim_prefix;
use dropsweep::{DeleteOutcome, DeletionStrategy, FileId, PathKind};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::os::windows::io::AsRawHandle;
use std::path::Path;
use tempfile::TempDir;
use winapi::um::fileapi::{GetFileInformationByHandle, BY_HANDLE_FILE_INFORMATION};

fn file_id_of(path: &Path) -> FileId {
    let file = File::open(path).unwrap();
    let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { std::mem::zeroed() };
    let ok = unsafe { GetFileInformationByHandle(file.as_raw_handle() as _, &mut info) };
    assert_ne!(ok, 0, "GetFileInformationByHandle failed");
    let raw = ((info.nFileIndexHigh as u64) << 32) | info.nFileIndexLow as u64;
    FileId::new(raw as i64)
}

fn drive_of(path: &Path) -> String {
    let text = strip_verbatim_prefix(&path.to_string_lossy());
    text.chars().next().unwrap().to_string()
}

fn dropped_file(dir: &TempDir, name: &str) -> (std::path::PathBuf, FileId) {
    let path = dir.path().join(name);
    fs::write(&path, b"dropped payload").unwrap();
    let id = file_id_of(&path);
    (path, id)
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_resolve_dos_and_nt_paths() {
    let dir = TempDir::new().unwrap();
    let (path, id) = dropped_file(&dir, "resolve-me.bin");
    let volume = Volume::open(&drive_of(&path)).unwrap();

    let dos = get_file_path(&volume, id, PathKind::Dos).unwrap();
    assert!(dos.starts_with(r"\\?\"));
    assert!(dos.ends_with("resolve-me.bin"));

    let nt = get_file_path(&volume, id, PathKind::Nt).unwrap();
    assert!(nt.starts_with(r"\Device\"));
    assert!(nt.ends_with("resolve-me.bin"));
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_list_files_splits_resolved_and_unresolved() {
    let dir = TempDir::new().unwrap();
    let (path, id) = dropped_file(&dir, "listed.bin");
    let ids = [id, FileId::new(-1)];

    let listing = list_files_on(&drive_of(&path), &ids);
    assert_eq!(listing.processed(), 1);
    assert_eq!(listing.resolved[0].id, id);
    assert_eq!(listing.unresolved, vec![FileId::new(-1)]);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_delete_by_id_with_each_strategy() {
    let dir = TempDir::new().unwrap();
    for strategy in [DeletionStrategy::Disposition, DeletionStrategy::RenameThenDelete] {
        let (path, id) = dropped_file(&dir, &format!("{}.bin", strategy));
        let volume = Volume::open(&drive_of(&path)).unwrap();
        let options = DeleteOptions {
            strategy,
            ..DeleteOptions::default()
        };

        assert_eq!(delete_by_id(&volume, id, &options).unwrap(), DeleteOutcome::Deleted);
        assert!(!path.exists(), "{} left {}", strategy, path.display());

        // the ID is gone now
        assert_eq!(
            delete_by_id(&volume, id, &options).unwrap(),
            DeleteOutcome::AlreadyGone
        );
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_delete_dropped_files_empties_the_set() {
    let dir = TempDir::new().unwrap();
    let (first, first_id) = dropped_file(&dir, "a.bin");
    let (second, second_id) = dropped_file(&dir, "b.bin");
    let volume = Volume::open(&drive_of(&first)).unwrap();

    let mut ids: BTreeSet<FileId> = [first_id, second_id].into_iter().collect();
    let processed = delete_dropped_files(&volume, &mut ids, &DeleteOptions::default());

    assert_eq!(processed, 2);
    assert!(ids.is_empty());
    assert!(!first.exists());
    assert!(!second.exists());

    let listing = list_files(&volume, &[first_id]);
    assert_eq!(listing.processed(), 0);
}
