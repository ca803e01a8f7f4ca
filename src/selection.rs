/*!
 * Selected-files mode: write only the files the user named
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use crate::error::Result;
use crate::finder::find_files;
use crate::report::ScanReport;
use crate::types::{EntryOutcome, OutputRecord, SkipReason};
use crate::utils::to_slash_path;
use crate::writer::OutputFile;

/// Resolves a name that matched more than one file
pub trait FileSelector {
    /// Pick one of `candidates` (all absolute paths) for `name`
    fn select(&mut self, name: &str, candidates: &[PathBuf]) -> Result<PathBuf>;
}

impl<F> FileSelector for F
where
    F: FnMut(&str, &[PathBuf]) -> Result<PathBuf>,
{
    fn select(&mut self, name: &str, candidates: &[PathBuf]) -> Result<PathBuf> {
        self(name, candidates)
    }
}

/// Write the files named in `names` from `root` to `output_file`
///
/// Records follow the order of `names`. A name without matches is logged and
/// skipped; several matches are resolved through `selector`.
pub fn write_selected_files<S: AsRef<str>>(
    root: &Path,
    output_file: &Path,
    names: &[S],
    selector: &mut dyn FileSelector,
) -> Result<ScanReport> {
    let start = Instant::now();
    let matches = find_files(root, names)?;

    let mut output = OutputFile::create(output_file)?;
    let mut report = ScanReport::new(output_file);

    for name in names.iter().map(AsRef::as_ref) {
        let candidates = match matches.get(name) {
            Some(candidates) if !candidates.is_empty() => candidates,
            _ => {
                warn!("No matches found for file name: {}", name);
                continue;
            }
        };

        let selected = if let [only] = candidates.as_slice() {
            info!("Found one match for {}: {}", name, only.display());
            only.clone()
        } else {
            selector.select(name, candidates)?
        };

        let relative_path = relative_to(root, &selected);
        let content = match fs::read(&selected) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read file {}: {}", selected.display(), e);
                report.record(EntryOutcome::Skipped {
                    path: relative_path,
                    reason: SkipReason::Unreadable,
                });
                continue;
            }
        };

        let record = OutputRecord {
            relative_path,
            content,
        };
        output.write(&record)?;
        info!("Added {} to {}", selected.display(), output_file.display());
        report.record(EntryOutcome::Emitted {
            bytes: record.content.len() as u64,
            path: record.relative_path,
        });
    }

    output.finish()?;
    report.duration = start.elapsed();
    Ok(report)
}

/// Forward-slash path of `path` under `root`, or its base name when outside
fn relative_to(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => to_slash_path(relative),
        Err(_) => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| to_slash_path(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoTxtError;
    use tempfile::tempdir;

    fn setup() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("main.go"), "package main\n").unwrap();
        fs::write(dir.path().join("a").join("util.go"), "package a\n").unwrap();
        fs::write(dir.path().join("b").join("util.go"), "package b\n").unwrap();
        dir
    }

    fn never(_: &str, _: &[PathBuf]) -> Result<PathBuf> {
        panic!("selector should not be called");
    }

    #[test]
    fn test_single_matches_follow_request_order() -> Result<()> {
        let dir = setup();
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        let report = write_selected_files(dir.path(), &output, &["main.go", "missing.rs"], &mut never)?;

        assert_eq!(fs::read_to_string(&output)?, "=== main.go ===\npackage main\n\n\n");
        assert_eq!(report.emitted.len(), 1);
        Ok(())
    }

    #[test]
    fn test_ambiguous_name_uses_selector() -> Result<()> {
        let dir = setup();
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        let mut seen = Vec::new();
        let mut pick_last = |name: &str, candidates: &[PathBuf]| -> Result<PathBuf> {
            seen.push((name.to_string(), candidates.len()));
            Ok(candidates[candidates.len() - 1].clone())
        };
        write_selected_files(dir.path(), &output, &["UTIL.go", "main.go"], &mut pick_last)?;

        assert_eq!(seen, vec![("UTIL.go".to_string(), 2)]);
        assert_eq!(
            fs::read_to_string(&output)?,
            "=== b/util.go ===\npackage b\n\n\n=== main.go ===\npackage main\n\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_selector_error_aborts() {
        let dir = setup();
        let out_dir = tempdir().unwrap();
        let output = out_dir.path().join("out.txt");

        let mut refuse = |_: &str, _: &[PathBuf]| -> Result<PathBuf> {
            Err(RepoTxtError::Prompt("choice out of range".to_string()))
        };
        let err = write_selected_files(dir.path(), &output, &["util.go"], &mut refuse).unwrap_err();
        assert!(matches!(err, RepoTxtError::Prompt(_)));
    }

    #[test]
    fn test_empty_request_is_an_error() {
        let dir = setup();
        let output = dir.path().join("out.txt");
        let err = write_selected_files::<&str>(dir.path(), &output, &[], &mut never).unwrap_err();
        assert!(matches!(err, RepoTxtError::InvalidInput(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_relative_to_outside_root_falls_back_to_name() {
        assert_eq!(relative_to(Path::new("/repo"), Path::new("/elsewhere/x.rs")), "x.rs");
        assert_eq!(relative_to(Path::new("/repo"), Path::new("/repo/src/x.rs")), "src/x.rs");
    }
}
