/*!
 * Git repository handling functionality
 */

mod auth;
mod error;
mod progress;
mod repository;
mod url;

// Re-export public items
pub use auth::{default_ssh_key_path, is_key_encrypted, Credentials};
pub use error::{GitError, GitResult};
pub use progress::{BarReporter, GitProgress, ProgressReporter};
pub use repository::{clone_or_pull, Repository};
pub use url::{parse_git_url, RepoUrl, UrlKind};
