//! Global error handling for repo-to-txt
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::git::GitError;

/// Global error type for repo-to-txt operations
#[derive(Error, Debug)]
pub enum RepoTxtError {
    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The output artifact could not be created or written
    #[error("Unable to write output file {path}: {source}")]
    Output {
        /// Output file path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The directory tree could not be traversed
    #[error("Error walking the path {path}: {source}")]
    Walk {
        /// Path that failed, or the traversal root
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive input errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RepoTxtError {
    /// Wrap an IO failure on the output artifact
    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

/// Specialized Result type for repo-to-txt operations
pub type Result<T> = std::result::Result<T, RepoTxtError>;

/// Creates a RepoTxtError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::RepoTxtError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
