/*!
 * Path filtering: folder-prefix exclusion and extension policy
 */

use std::path::Path;

/// File suffix skipped when the caller configured no extension allow-list
pub const DEFAULT_EXCLUDED_EXT: &str = ".ipynb";

/// Inclusion and exclusion rules applied to every file candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Relative path prefixes, forward-slash separated
    exclude_folders: Vec<String>,
    /// Lower-cased extensions with a leading dot
    include_extensions: Vec<String>,
}

impl FilterPolicy {
    /// Build a policy from raw user input
    ///
    /// Entries are trimmed and empty ones dropped. Folder prefixes are
    /// normalized to forward slashes; extensions are lower-cased and given a
    /// leading dot when it is missing (`go` and `.GO` both mean `.go`).
    pub fn new<I, J, S, T>(exclude_folders: I, include_extensions: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let exclude_folders = exclude_folders
            .into_iter()
            .map(|f| f.as_ref().trim().replace('\\', "/"))
            .filter(|f| !f.is_empty())
            .collect();

        let include_extensions = include_extensions
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
            .collect();

        Self {
            exclude_folders,
            include_extensions,
        }
    }

    /// Excluded folder prefixes
    pub fn exclude_folders(&self) -> &[String] {
        &self.exclude_folders
    }

    /// Allow-listed extensions; empty means the default rule applies
    pub fn include_extensions(&self) -> &[String] {
        &self.include_extensions
    }

    /// Decide whether a file at `relative_path` is left out of the output
    pub fn should_exclude(&self, relative_path: &str) -> bool {
        let normalized = relative_path.replace('\\', "/");

        if self.is_in_excluded_folder(&normalized) {
            return true;
        }

        if !self.include_extensions.is_empty() {
            let ext = extension_of(&normalized);
            return !self.include_extensions.iter().any(|e| *e == ext);
        }

        normalized.to_lowercase().ends_with(DEFAULT_EXCLUDED_EXT)
    }

    fn is_in_excluded_folder(&self, normalized: &str) -> bool {
        self.exclude_folders.iter().any(|prefix| {
            normalized == prefix
                || normalized
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Free-function form of [`FilterPolicy::should_exclude`]
pub fn should_exclude(relative_path: &str, policy: &FilterPolicy) -> bool {
    policy.should_exclude(relative_path)
}

/// Lower-cased extension of the last path component, dot included, or ""
fn extension_of(normalized: &str) -> String {
    let name = normalized.rsplit('/').next().unwrap_or(normalized);
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
