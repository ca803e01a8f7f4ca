/*!
 * repo-to-txt - Flatten a Git repository into a single text file
 *
 * This library clones (or updates) a repository and concatenates the
 * contents of its text files into one delimited document, suitable as
 * context for Large Language Models.
 */

pub mod clipboard;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod finder;
pub mod git;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod selection;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{RepoTxtError, Result};
pub use filter::{should_exclude, FilterPolicy};
pub use finder::{find_files, FileMatches};
pub use report::{ReportFormat, Reporter, ScanReport};
pub use scanner::{write_repo_contents, Scanner};
pub use selection::{write_selected_files, FileSelector};
pub use types::{EntryOutcome, FileContent, RepoEntry, SkipReason};
pub use utils::format_file_size;
pub use writer::{format_record, OutputFile, RecordWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
