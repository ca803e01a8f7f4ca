/*!
 * Locate files by exact, case-insensitive base name
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::scanner::walk;

/// Requested name mapped to every path found for it, in discovery order
pub type FileMatches = HashMap<String, Vec<PathBuf>>;

/// Search `root` for files whose base name equals one of `names`
///
/// Hidden files and directories are skipped, filter policy is not applied.
/// Paths that cannot be accessed are logged and skipped. Names with no match
/// are absent from the result.
pub fn find_files<S: AsRef<str>>(root: &Path, names: &[S]) -> Result<FileMatches> {
    crate::ensure!(
        !names.is_empty(),
        InvalidInput,
        "no file names provided to search for"
    );

    let wanted: Vec<(&str, String)> = names
        .iter()
        .map(|n| (n.as_ref(), n.as_ref().to_lowercase()))
        .collect();

    let mut matches = FileMatches::new();
    for entry in walk(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error accessing path {}: {}", display_path(&e, root), e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let base_name = entry.file_name().to_string_lossy().to_lowercase();
        for (requested, lowered) in &wanted {
            if *lowered == base_name {
                matches
                    .entry((*requested).to_string())
                    .or_default()
                    .push(entry.path().to_path_buf());
            }
        }
    }

    Ok(matches)
}

fn display_path(err: &walkdir::Error, root: &Path) -> String {
    err.path().unwrap_or(root).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoTxtError;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn test_empty_request_is_an_error() {
        let dir = tempdir().unwrap();
        let err = find_files::<&str>(dir.path(), &[]).unwrap_err();
        assert!(matches!(err, RepoTxtError::InvalidInput(_)));
    }

    #[test]
    fn test_case_insensitive_exact_match() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "docs/readme.md");
        touch(dir.path(), "docs/readme.md.bak");
        touch(dir.path(), "src/main.rs");

        let matches = find_files(dir.path(), &["readme.MD"]).unwrap();
        assert_eq!(
            matches["readme.MD"],
            vec![
                dir.path().join("README.md"),
                dir.path().join("docs").join("readme.md"),
            ]
        );
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_missing_names_are_absent() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "main.go");

        let matches = find_files(dir.path(), &["main.go", "Cargo.toml"]).unwrap();
        assert_eq!(matches["main.go"].len(), 1);
        assert!(!matches.contains_key("Cargo.toml"));
    }

    #[test]
    fn test_hidden_entries_are_not_searched() {
        let dir = tempdir().unwrap();
        touch(dir.path(), ".git/config");
        touch(dir.path(), ".config");
        touch(dir.path(), "app/config");

        let matches = find_files(dir.path(), &["config", ".config"]).unwrap();
        assert_eq!(matches["config"], vec![dir.path().join("app").join("config")]);
        assert!(!matches.contains_key(".config"));
    }

    #[test]
    fn test_missing_root_yields_empty_result() {
        let dir = tempdir().unwrap();
        let matches = find_files(&dir.path().join("nope"), &["a.txt"]).unwrap();
        assert!(matches.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_yields_partial_result() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "locked/main.go");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = find_files(dir.path(), &["main.go"]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let matches = result.unwrap();
        assert_eq!(matches["main.go"], vec![dir.path().join("main.go")]);
    }
}
