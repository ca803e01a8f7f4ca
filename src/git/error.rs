/*!
 * Error types for Git operations
 */

use thiserror::Error;

/// Errors that can occur during Git operations
#[derive(Error, Debug)]
pub enum GitError {
    /// Invalid Git URL format
    #[error("Invalid Git URL: {0}")]
    InvalidUrl(String),

    /// Error opening a Git repository
    #[error("Failed to open existing repository: {0}")]
    OpenError(git2::Error),

    /// Error cloning a Git repository
    #[error("Failed to clone repository: {0}")]
    CloneError(git2::Error),

    /// Error fetching from remote or updating the work tree
    #[error("Failed to pull repository: {0}")]
    PullError(git2::Error),

    /// The remote rejected or never received usable credentials
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// IO error during Git operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Specialized Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;
