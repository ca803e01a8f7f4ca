/*!
 * Repository walking: filter, read and stream every file into one artifact
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::content::read_if_text;
use crate::error::{RepoTxtError, Result};
use crate::filter::FilterPolicy;
use crate::report::ScanReport;
use crate::types::{EntryOutcome, FileContent, RepoEntry};
use crate::utils::is_hidden_name;
use crate::writer::OutputFile;

/// Walker that flattens a directory tree into the output format
pub struct Scanner<'a> {
    /// Inclusion and exclusion rules
    policy: &'a FilterPolicy,
    /// Canonical path of the artifact being written, never emitted itself
    output_path: Option<PathBuf>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(policy: &'a FilterPolicy) -> Self {
        Self {
            policy,
            output_path: None,
        }
    }

    /// Write every included file under `root` to `output_file`
    ///
    /// The output is created (or truncated) before the walk starts. Binary
    /// and unreadable files are skipped and reported; any traversal error
    /// aborts the run and leaves a partial artifact behind.
    pub fn write_all(mut self, root: &Path, output_file: &Path) -> Result<ScanReport> {
        let start = Instant::now();
        let mut output = OutputFile::create(output_file)?;
        self.output_path = fs::canonicalize(output_file).ok();

        let root = fs::canonicalize(root).map_err(|e| RepoTxtError::Walk {
            path: root.to_path_buf(),
            source: e,
        })?;
        if !root.is_dir() {
            return Err(RepoTxtError::InvalidInput(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut report = ScanReport::new(output_file);
        for entry in walk(&root) {
            let entry = entry.map_err(|e| RepoTxtError::Walk {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                source: e.into(),
            })?;
            if entry.file_type().is_dir() {
                continue;
            }

            let entry = RepoEntry::new(&root, entry.path(), false);
            let outcome = self.visit(&entry, &mut output)?;
            report.record(outcome);
        }

        output.finish()?;
        report.duration = start.elapsed();
        Ok(report)
    }

    /// Process one file entry, writing its record when it is emitted
    pub fn visit(&self, entry: &RepoEntry, output: &mut OutputFile) -> Result<EntryOutcome> {
        if entry.is_dir || entry.is_hidden() || self.is_output(&entry.path) {
            return Ok(EntryOutcome::Excluded);
        }

        if self.policy.should_exclude(&entry.relative_path) {
            trace!(path = %entry.relative_path, "excluded by filter policy");
            return Ok(EntryOutcome::Excluded);
        }

        match read_if_text(&entry.path) {
            FileContent::Text(content) => {
                output.write_record(&entry.relative_path, &content)?;
                debug!(path = %entry.relative_path, bytes = content.len(), "added file");
                Ok(EntryOutcome::Emitted {
                    path: entry.relative_path.clone(),
                    bytes: content.len() as u64,
                })
            }
            FileContent::Skipped(reason) => {
                warn!("Skipping file {}: {}", entry.relative_path, reason);
                Ok(EntryOutcome::Skipped {
                    path: entry.relative_path.clone(),
                    reason,
                })
            }
        }
    }

    fn is_output(&self, path: &Path) -> bool {
        self.output_path.as_deref() == Some(path)
    }
}

/// Flatten `root` into `output_file` using `policy`
pub fn write_repo_contents(
    root: &Path,
    output_file: &Path,
    policy: &FilterPolicy,
) -> Result<ScanReport> {
    Scanner::new(policy).write_all(root, output_file)
}

/// Depth-first walk in file-name order that never descends into dot-directories
///
/// The root itself is exempt from the dot rule.
pub(crate) fn walk(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_name(&e.file_name().to_string_lossy()))
}
