//! NTFS file reference numbers

use super::error::{CleanupError, CleanupResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;
use tracing::warn;

/// A file-system identifier, unique within one volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(i64);

impl FileId {
    /// Wrap a raw file reference number
    pub const fn new(raw: i64) -> Self {
        FileId(raw)
    }

    /// Get the raw value as passed to `FILE_ID_DESCRIPTOR`
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Parse a decimal or `0x`-prefixed hexadecimal ID
    pub fn parse(text: &str) -> CleanupResult<Self> {
        let trimmed = text.trim();
        let parsed = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            u64::from_str_radix(hex, 16).map(|v| v as i64)
        } else {
            trimmed.parse::<i64>()
        };
        parsed
            .map(FileId)
            .map_err(|_| CleanupError::InvalidFileId(text.to_string()))
    }
}

impl From<i64> for FileId {
    fn from(raw: i64) -> Self {
        FileId(raw)
    }
}

impl FromStr for FileId {
    type Err = CleanupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileId::parse(s)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0 as u64)
    }
}

/// One ID per line, decimal or `0x` hex; blank lines and `#` comments are skipped
///
/// Lines that do not parse are logged and dropped.
pub fn read_file_ids<R: BufRead>(reader: R) -> io::Result<BTreeSet<FileId>> {
    let mut ids = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        match FileId::parse(text) {
            Ok(id) => {
                ids.insert(id);
            }
            Err(err) => warn!("Skipping input line {:?}: {}", text, err),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!(FileId::parse("42").unwrap(), FileId::new(42));
        assert_eq!(FileId::parse("0x2A").unwrap(), FileId::new(42));
        assert_eq!(FileId::parse("0X2a").unwrap(), FileId::new(42));
        assert_eq!(FileId::parse("  17 \n").unwrap(), FileId::new(17));
    }

    #[test]
    fn test_parse_full_width_hex() {
        let id = FileId::parse("0xFFFFFFFFFFFFFFFF").unwrap();
        assert_eq!(id.raw(), -1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            FileId::parse("file"),
            Err(CleanupError::InvalidFileId(_))
        ));
        assert!(FileId::parse("").is_err());
        assert!(FileId::parse("0x").is_err());
    }

    #[test]
    fn test_display_is_padded_hex() {
        assert_eq!(FileId::new(0x10).to_string(), "0x0000000000000010");
        assert_eq!(FileId::new(-1).to_string(), "0xFFFFFFFFFFFFFFFF");
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let mut ids = vec![FileId::new(3), FileId::new(1), FileId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![FileId::new(1), FileId::new(2), FileId::new(3)]);
    }

    proptest! {
        #[test]
        fn display_parses_back(raw in any::<i64>()) {
            let id = FileId::new(raw);
            prop_assert_eq!(id.to_string().parse::<FileId>().unwrap(), id);
        }
    }

    #[test]
    fn test_read_file_ids() {
        let input = "10\n\n  0x20  \n# comment\nnot-an-id\n10\n";
        let ids = read_file_ids(input.as_bytes()).unwrap();
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec![FileId::new(10), FileId::new(0x20)]
        );
    }

    #[test]
    fn test_read_no_ids() {
        assert!(read_file_ids("".as_bytes()).unwrap().is_empty());
    }
}
