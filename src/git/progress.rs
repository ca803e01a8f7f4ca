/*!
 * Progress reporting for Git operations
 */

use git2::{Progress, RemoteCallbacks};
use indicatif::{ProgressBar, ProgressStyle};

use crate::utils::format_file_size;

/// Trait for reporting Git operation progress
pub trait ProgressReporter {
    /// Called with progress information during Git operations
    fn report(&self, progress: &GitProgress);
}

/// Progress information for Git operations
#[derive(Debug, Clone, Default)]
pub struct GitProgress {
    /// Total number of objects to download
    pub total_objects: usize,
    /// Number of received objects
    pub received_objects: usize,
    /// Number of indexed objects
    pub indexed_objects: usize,
    /// Number of bytes received
    pub received_bytes: usize,
}

impl GitProgress {
    /// Get the progress percentage
    pub fn percentage(&self) -> u8 {
        if self.total_objects == 0 {
            return 0;
        }

        ((self.received_objects * 100) / self.total_objects) as u8
    }

    /// All objects are received and the pack is still being indexed
    pub fn is_indexing(&self) -> bool {
        self.total_objects > 0
            && self.received_objects == self.total_objects
            && self.indexed_objects < self.total_objects
    }

    /// Get a formatted string of received bytes
    pub fn formatted_bytes(&self) -> String {
        format_file_size(self.received_bytes as u64)
    }
}

impl From<&Progress<'_>> for GitProgress {
    fn from(stats: &Progress<'_>) -> Self {
        Self {
            total_objects: stats.total_objects(),
            received_objects: stats.received_objects(),
            indexed_objects: stats.indexed_objects(),
            received_bytes: stats.received_bytes(),
        }
    }
}

// Implement ProgressReporter for closures
impl<F> ProgressReporter for F
where
    F: Fn(&GitProgress),
{
    fn report(&self, progress: &GitProgress) {
        self(progress)
    }
}

/// Transfer progress drawn as an indicatif bar
pub struct BarReporter {
    bar: ProgressBar,
    name: String,
}

impl BarReporter {
    /// Bar labelled with the repository name
    pub fn new(name: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}% {prefix}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message(format!("Fetching {}", name));
        Self {
            bar,
            name: name.to_string(),
        }
    }

    /// Clear the bar once the transfer is done
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for BarReporter {
    fn report(&self, progress: &GitProgress) {
        if progress.is_indexing() {
            let indexed = (progress.indexed_objects * 100) / progress.total_objects;
            self.bar.set_message(format!("Indexing {}", self.name));
            self.bar.set_position(indexed as u64);
        } else {
            self.bar.set_position(progress.percentage() as u64);
        }
        self.bar.set_prefix(progress.formatted_bytes());
    }
}

/// Install a transfer-progress callback forwarding to `reporter`
pub(crate) fn attach<'a, P: ProgressReporter + ?Sized>(
    callbacks: &mut RemoteCallbacks<'a>,
    reporter: &'a P,
) {
    callbacks.transfer_progress(move |stats| {
        reporter.report(&GitProgress::from(&stats));
        true
    });
}
