/*!
 * Output formatting for the flattened text artifact
 *
 * Every record is a separator line, the raw file bytes, and two newlines:
 *
 * ```text
 * === relative/path.ext ===
 * <content>
 *
 * ```
 *
 * Content is never escaped, so a line inside a file that looks like a
 * separator is indistinguishable from a real one.
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{RepoTxtError, Result};
use crate::types::OutputRecord;

/// Produce the bytes of one output record
pub fn format_record(relative_path: &str, content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(relative_path.len() + content.len() + 10);
    out.extend_from_slice(b"=== ");
    out.extend_from_slice(relative_path.as_bytes());
    out.extend_from_slice(b" ===\n");
    out.extend_from_slice(content);
    out.extend_from_slice(b"\n\n");
    out
}

/// Buffered writer that appends formatted records to a sink
pub struct RecordWriter<W: Write> {
    inner: BufWriter<W>,
    records: usize,
}

impl RecordWriter<File> {
    /// Create or truncate `path` and wrap it in a buffered record writer
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| RepoTxtError::output(path, e))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wrap an arbitrary sink
    pub fn new(sink: W) -> Self {
        Self {
            inner: BufWriter::new(sink),
            records: 0,
        }
    }

    /// Append one record
    pub fn write_record(&mut self, relative_path: &str, content: &[u8]) -> io::Result<()> {
        self.inner
            .write_all(&format_record(relative_path, content))?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush buffered bytes and hand back the sink
    ///
    /// Dropping the writer without calling this still flushes, but any error
    /// from that final flush is lost.
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

/// Destination path paired with its writer, for error context
pub struct OutputFile {
    /// Where the artifact lives
    pub path: PathBuf,
    /// Writer over the artifact
    pub writer: RecordWriter<File>,
}

impl OutputFile {
    /// Create or truncate the artifact at `path`
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            writer: RecordWriter::create(path)?,
        })
    }

    /// Append a record, tagging failures with the artifact path
    pub fn write_record(&mut self, relative_path: &str, content: &[u8]) -> Result<()> {
        self.writer
            .write_record(relative_path, content)
            .map_err(|e| RepoTxtError::output(&self.path, e))
    }

    /// Append a prepared record
    pub fn write(&mut self, record: &OutputRecord) -> Result<()> {
        self.write_record(&record.relative_path, &record.content)
    }

    /// Flush and close the artifact
    pub fn finish(self) -> Result<()> {
        let path = self.path;
        self.writer
            .finish()
            .map(drop)
            .map_err(|e| RepoTxtError::output(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_record_layout() {
        assert_eq!(
            format_record("test.go", b"package main\n"),
            b"=== test.go ===\npackage main\n\n\n".to_vec()
        );
        assert_eq!(
            format_record("src/a.txt", b"no newline"),
            b"=== src/a.txt ===\nno newline\n\n".to_vec()
        );
    }

    #[test]
    fn test_format_record_is_deterministic() {
        let content = b"=== fake.txt ===\ninside\n";
        assert_eq!(
            format_record("real.txt", content),
            format_record("real.txt", content)
        );
    }

    #[test]
    fn test_writer_matches_formatter() -> io::Result<()> {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_record("a.rs", b"fn a() {}\n")?;
        writer.write_record("dir/b.rs", b"")?;
        assert_eq!(writer.records(), 2);

        let bytes = writer.finish()?;
        let mut expected = format_record("a.rs", b"fn a() {}\n");
        expected.extend(format_record("dir/b.rs", b""));
        assert_eq!(bytes, expected);
        Ok(())
    }

    #[test]
    fn test_output_file_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale content")?;

        let mut output = OutputFile::create(&path)?;
        output.write_record("main.go", b"package main\n")?;
        output.write(&OutputRecord {
            relative_path: "lib/util.go".to_string(),
            content: b"package lib".to_vec(),
        })?;
        output.finish()?;

        assert_eq!(
            fs::read(&path)?,
            b"=== main.go ===\npackage main\n\n\n=== lib/util.go ===\npackage lib\n\n".to_vec()
        );
        Ok(())
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = OutputFile::create(&path).err().unwrap();
        assert!(matches!(err, RepoTxtError::Output { .. }));
    }
}
