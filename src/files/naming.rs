//! Volume roots and spoiled names
//!
//! Pure path handling plus the rename-then-delete primitive. None of this
//! touches the native API, so it builds and is tested on every platform.

use crate::core::types::{CleanupError, CleanupResult};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Suffix appended to a file name before it is deleted
pub const DEFAULT_SPOIL_SUFFIX: &str = ".spoiled";

/// How many numbered candidates `spoiled_name` tries before giving up
const MAX_SPOIL_ATTEMPTS: u32 = 1000;

/// Validate a drive letter (`"C"`, `"c"`, `"C:"`) and return it uppercased
pub fn parse_drive_letter(drive: &str) -> CleanupResult<char> {
    let trimmed = drive.strip_suffix(':').unwrap_or(drive);
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter.to_ascii_uppercase()),
        _ => Err(CleanupError::InvalidDriveLetter(drive.to_string())),
    }
}

/// NT form of a volume root, e.g. `\??\C:\`
pub fn nt_volume_root(drive: &str) -> CleanupResult<String> {
    let letter = parse_drive_letter(drive)?;
    Ok(format!(r"\??\{}:\", letter))
}

fn candidate(path: &Path, suffix: &str, attempt: u32) -> Option<PathBuf> {
    let mut name: OsString = path.file_name()?.to_os_string();
    name.push(suffix);
    if attempt > 0 {
        name.push(format!(".{}", attempt));
    }
    Some(path.with_file_name(name))
}

/// First free spoiled name next to `path`: `name<suffix>`, then `name<suffix>.1`, ...
pub fn spoiled_name(path: &Path, suffix: &str) -> io::Result<PathBuf> {
    for attempt in 0..MAX_SPOIL_ATTEMPTS {
        let target = candidate(path, suffix, attempt).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?;
        if fs::symlink_metadata(&target).is_err() {
            return Ok(target);
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free spoiled name for {}", path.display()),
    ))
}

/// A file `remove_via_spoiled_rename` could not delete
#[derive(Debug, Error)]
#[error("cannot remove {}: {source}", .path.display())]
pub struct SpoilError {
    /// Where the file is now; the spoiled name once the rename went through
    pub path: PathBuf,
    pub renamed: bool,
    #[source]
    pub source: io::Error,
}

/// Rename `path` to its spoiled name and delete the renamed file
///
/// If the rename is refused the original path is deleted in place.
/// Returns the path that was actually removed.
pub fn remove_via_spoiled_rename(path: &Path, suffix: &str) -> Result<PathBuf, SpoilError> {
    let (target, renamed) = match spoiled_name(path, suffix) {
        Ok(target) => match fs::rename(path, &target) {
            Ok(()) => (target, true),
            Err(err) => {
                debug!("rename of {} refused: {}", path.display(), err);
                (path.to_path_buf(), false)
            }
        },
        Err(err) => {
            debug!("no spoiled name for {}: {}", path.display(), err);
            (path.to_path_buf(), false)
        }
    };

    match fs::remove_file(&target) {
        Ok(()) => Ok(target),
        Err(source) => Err(SpoilError {
            path: target,
            renamed,
            source,
        }),
    }
}

/// Object-manager form of a DOS path: `C:\x` and `\\?\C:\x` become `\??\C:\x`,
/// `\\server\share` becomes `\??\UNC\server\share`
pub fn nt_path_of(dos: &Path) -> Option<String> {
    let text = dos.to_str()?;
    if let Some(rest) = text.strip_prefix(r"\\?\") {
        return Some(format!(r"\??\{}", rest));
    }
    if let Some(share) = text.strip_prefix(r"\\") {
        return Some(format!(r"\??\UNC\{}", share));
    }
    let bytes = text.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && &bytes[1..3] == b":\\" {
        return Some(format!(r"\??\{}", text));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_drive_letter() {
        assert_eq!(parse_drive_letter("C").unwrap(), 'C');
        assert_eq!(parse_drive_letter("d").unwrap(), 'D');
        assert_eq!(parse_drive_letter("E:").unwrap(), 'E');
        assert!(parse_drive_letter("").is_err());
        assert!(parse_drive_letter("CD").is_err());
        assert!(parse_drive_letter("1").is_err());
        assert!(parse_drive_letter("C:\\").is_err());
    }

    #[test]
    fn test_nt_volume_root() {
        assert_eq!(nt_volume_root("c").unwrap(), r"\??\C:\");
        assert!(matches!(
            nt_volume_root("??"),
            Err(CleanupError::InvalidDriveLetter(_))
        ));
    }

    #[test]
    fn test_spoiled_name_is_next_to_original() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("payload.exe");
        let spoiled = spoiled_name(&original, DEFAULT_SPOIL_SUFFIX).unwrap();
        assert_eq!(spoiled, dir.path().join("payload.exe.spoiled"));
    }

    #[test]
    fn test_spoiled_name_skips_taken_candidates() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("payload.exe");
        fs::write(dir.path().join("payload.exe.spoiled"), b"x").unwrap();
        fs::write(dir.path().join("payload.exe.spoiled.1"), b"x").unwrap();

        let spoiled = spoiled_name(&original, DEFAULT_SPOIL_SUFFIX).unwrap();
        assert_eq!(spoiled, dir.path().join("payload.exe.spoiled.2"));
    }

    #[test]
    fn test_spoiled_name_without_file_name() {
        let err = spoiled_name(Path::new("/"), DEFAULT_SPOIL_SUFFIX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_remove_via_spoiled_rename() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("dropped.dll");
        fs::write(&original, b"MZ").unwrap();

        let removed = remove_via_spoiled_rename(&original, ".gone").unwrap();
        assert_eq!(removed, dir.path().join("dropped.dll.gone"));
        assert!(!original.exists());
        assert!(!removed.exists());
    }

    #[test]
    fn test_remove_via_spoiled_rename_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("never-there.bin");
        let err = remove_via_spoiled_rename(&missing, DEFAULT_SPOIL_SUFFIX).unwrap_err();
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path, missing);
        assert!(!err.renamed);
    }

    #[test]
    fn test_failed_removal_reports_spoiled_path() {
        // a directory renames fine but cannot be removed as a file
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("payload.exe");
        fs::create_dir(&original).unwrap();

        let err = remove_via_spoiled_rename(&original, DEFAULT_SPOIL_SUFFIX).unwrap_err();
        let spoiled = dir.path().join("payload.exe.spoiled");
        assert!(err.renamed);
        assert_eq!(err.path, spoiled);
        assert!(!original.exists());
        assert!(spoiled.exists());
        assert!(err.to_string().contains("payload.exe.spoiled"));
    }

    #[test]
    fn test_nt_path_of() {
        assert_eq!(
            nt_path_of(Path::new(r"\\?\C:\Temp\a.exe")).as_deref(),
            Some(r"\??\C:\Temp\a.exe")
        );
        assert_eq!(
            nt_path_of(Path::new(r"C:\Temp\a.exe.spoiled")).as_deref(),
            Some(r"\??\C:\Temp\a.exe.spoiled")
        );
        assert_eq!(
            nt_path_of(Path::new(r"\\server\share\a.exe")).as_deref(),
            Some(r"\??\UNC\server\share\a.exe")
        );
        assert_eq!(
            nt_path_of(Path::new(r"\\?\UNC\server\share\a.exe")).as_deref(),
            Some(r"\??\UNC\server\share\a.exe")
        );
        assert_eq!(nt_path_of(Path::new("relative/a.exe")), None);
    }

    proptest! {
        #[test]
        fn spoiled_name_keeps_directory_and_prefix(stem in "[a-z]{1,12}", ext in "[a-z]{0,3}") {
            let dir = TempDir::new().unwrap();
            let file = if ext.is_empty() { stem.clone() } else { format!("{}.{}", stem, ext) };
            let original = dir.path().join(&file);
            let spoiled = spoiled_name(&original, DEFAULT_SPOIL_SUFFIX).unwrap();
            prop_assert_eq!(spoiled.parent(), Some(dir.path()));
            let name = spoiled.file_name().unwrap().to_string_lossy().into_owned();
            prop_assert!(name.starts_with(&file));
            prop_assert!(name.ends_with(DEFAULT_SPOIL_SUFFIX));
        }
    }
}
