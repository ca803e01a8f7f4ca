/*!
 * Content reading with binary detection
 */

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::types::{FileContent, SkipReason};

/// Number of leading bytes inspected for binary content
pub const SNIFF_LEN: usize = 512;

/// Check a content prefix for a null byte or bytes that cannot be UTF-8
///
/// This is a heuristic: binary formats that happen to decode as UTF-8 and
/// carry no early null byte pass as text. A multi-byte sequence cut off at
/// the end of the prefix is not held against it.
pub fn looks_binary(prefix: &[u8]) -> bool {
    if prefix.contains(&0) {
        return true;
    }
    match std::str::from_utf8(prefix) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some(),
    }
}

/// Read a file in full unless its prefix looks binary
///
/// Open and read failures are reported as [`SkipReason::Unreadable`]; binary
/// files are rejected before the remainder is loaded.
pub fn read_if_text(path: &Path) -> FileContent {
    match try_read_text(path) {
        Ok(Some(content)) => FileContent::Text(content),
        Ok(None) => FileContent::Skipped(SkipReason::Binary),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to read file");
            FileContent::Skipped(SkipReason::Unreadable)
        }
    }
}

fn try_read_text(path: &Path) -> io::Result<Option<Vec<u8>>> {
    let mut file = File::open(path)?;

    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    (&mut file).take(SNIFF_LEN as u64).read_to_end(&mut prefix)?;
    if looks_binary(&prefix) {
        return Ok(None);
    }

    file.rewind()?;
    let size_hint = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
    let mut content = Vec::with_capacity(size_hint);
    file.read_to_end(&mut content)?;

    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_looks_binary() {
        assert!(looks_binary(b"PK\x03\x04\x00\x00"));
        assert!(!looks_binary(b"package main\n"));
        assert!(looks_binary(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!looks_binary(b""));
        assert!(!looks_binary("caf\u{e9} na\u{ef}ve".as_bytes()));
        // "\u{e9}" cut after its first byte
        assert!(!looks_binary(&[b'c', b'a', b'f', 0xC3]));
    }

    #[test]
    fn test_reads_text_in_full() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("big.txt");
        let body = "line of text\n".repeat(10_000);
        fs::write(&path, &body)?;

        assert_eq!(read_if_text(&path), FileContent::Text(body.into_bytes()));
        Ok(())
    }

    #[test]
    fn test_null_byte_in_prefix_is_binary() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("blob.dat");
        let mut bytes = vec![b'a'; SNIFF_LEN];
        bytes[SNIFF_LEN / 2] = 0;
        fs::write(&path, &bytes)?;

        assert_eq!(
            read_if_text(&path),
            FileContent::Skipped(SkipReason::Binary)
        );
        Ok(())
    }

    #[test]
    fn test_latin1_text_is_binary() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.txt");
        // "caf\u{e9}" encoded as Latin-1, not UTF-8
        fs::write(&path, b"caf\xe9\n")?;

        assert!(looks_binary(b"caf\xe9\n"));
        assert_eq!(
            read_if_text(&path),
            FileContent::Skipped(SkipReason::Binary)
        );
        Ok(())
    }

    #[test]
    fn test_null_byte_after_prefix_is_text() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("late.dat");
        let mut bytes = vec![b'a'; SNIFF_LEN + 10];
        bytes[SNIFF_LEN + 5] = 0;
        fs::write(&path, &bytes)?;

        assert_eq!(read_if_text(&path), FileContent::Text(bytes));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempdir().unwrap();
        assert_eq!(
            read_if_text(&dir.path().join("gone.txt")),
            FileContent::Skipped(SkipReason::Unreadable)
        );
    }

    #[test]
    fn test_empty_file_is_text() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.txt");
        fs::write(&path, b"")?;

        assert_eq!(read_if_text(&path), FileContent::Text(Vec::new()));
        Ok(())
    }
}
