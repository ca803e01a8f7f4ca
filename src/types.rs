/*!
 * Core types shared by the walker, the finder and the writer
 */

use std::path::{Path, PathBuf};

use strum::{AsRefStr, Display};

use crate::utils::{is_hidden_name, to_slash_path};

/// A filesystem node visited during traversal
#[derive(Debug, Clone)]
pub struct RepoEntry {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the traversal root, always forward-slash separated
    pub relative_path: String,
    /// Whether the node is a directory
    pub is_dir: bool,
    /// Final path component
    pub base_name: String,
}

impl RepoEntry {
    /// Build an entry for `path` found under `root`
    pub fn new(root: &Path, path: &Path, is_dir: bool) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let base_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            path: path.to_path_buf(),
            relative_path: to_slash_path(relative),
            is_dir,
            base_name,
        }
    }

    /// Hidden entries are never traversed or emitted
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.base_name)
    }
}

/// Why a file candidate produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SkipReason {
    /// A null byte was found in the sniffed prefix
    Binary,
    /// The file could not be opened or read
    Unreadable,
}

/// Result of reading one file candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Full file content, unmodified
    Text(Vec<u8>),
    /// The file is not emitted
    Skipped(SkipReason),
}

/// The unit the formatter turns into bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Forward-slash path relative to the repository root
    pub relative_path: String,
    /// Raw content bytes
    pub content: Vec<u8>,
}

/// What happened to a single visited entry
///
/// Fatal conditions are not an outcome; they surface as `Err` from the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Pruned by the dot rule, the filter policy, or because it is the output itself
    Excluded,
    /// A record was written
    Emitted {
        /// Relative path of the record
        path: String,
        /// Number of content bytes written
        bytes: u64,
    },
    /// The file passed the filter but its content was not usable
    Skipped {
        /// Relative path of the skipped file
        path: String,
        /// Reason for the skip
        reason: SkipReason,
    },
}
