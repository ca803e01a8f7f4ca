/*!
 * Git repository operations
 */

use std::fs;
use std::path::{Path, PathBuf};

use git2::{FetchOptions, RemoteCallbacks, Repository as Git2Repository};
use tracing::{debug, info};

use super::auth::{classify, Credentials};
use super::error::{GitError, GitResult};
use super::progress::{self, ProgressReporter};
use super::url::RepoUrl;

// Remote refs tried, in order, when resetting an existing checkout
const REMOTE_HEADS: [&str; 3] = [
    "refs/remotes/origin/HEAD",
    "refs/remotes/origin/main",
    "refs/remotes/origin/master",
];

/// Local checkout of a remote repository
pub struct Repository {
    /// Inner git2 repository instance
    inner: Git2Repository,
    /// Work tree root
    path: PathBuf,
}

impl Repository {
    /// Open an existing checkout
    pub fn open(path: &Path) -> GitResult<Self> {
        let repo = Git2Repository::open(path).map_err(GitError::OpenError)?;

        Ok(Self {
            inner: repo,
            path: path.to_path_buf(),
        })
    }

    /// Check if a checkout exists at `path`
    pub fn exists(path: &Path) -> bool {
        path.join(".git").exists()
    }

    /// Clone `url` into `path`
    pub fn clone<P: ProgressReporter + ?Sized>(
        url: &RepoUrl,
        path: &Path,
        credentials: &Credentials,
        progress: Option<&P>,
    ) -> GitResult<Self> {
        fs::create_dir_all(path).map_err(GitError::IoError)?;

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_options(credentials, progress));

        info!("Cloning {} into {}", url, path.display());
        let repo = builder
            .clone(&url.url, path)
            .map_err(|e| classify(e, GitError::CloneError))?;

        Ok(Self {
            inner: repo,
            path: path.to_path_buf(),
        })
    }

    /// Fetch origin and hard-reset the work tree to its default branch
    pub fn pull<P: ProgressReporter + ?Sized>(
        &mut self,
        credentials: &Credentials,
        progress: Option<&P>,
    ) -> GitResult<()> {
        let mut fetch_options = fetch_options(credentials, progress);

        let mut remote = self
            .inner
            .find_remote("origin")
            .map_err(GitError::PullError)?;

        info!("Updating existing checkout at {}", self.path.display());
        // Empty refspecs fall back to the remote's configured ones
        remote
            .fetch::<&str>(&[], Some(&mut fetch_options), None)
            .map_err(|e| classify(e, GitError::PullError))?;

        let target = REMOTE_HEADS
            .iter()
            .find_map(|name| self.inner.revparse_single(name).ok())
            .ok_or_else(|| {
                GitError::PullError(git2::Error::from_str(
                    "no origin/HEAD, origin/main or origin/master to reset to",
                ))
            })?;
        debug!("Resetting work tree to {}", target.id());

        self.inner
            .reset(&target, git2::ResetType::Hard, None)
            .map_err(GitError::PullError)?;

        Ok(())
    }

    /// Get path to the work tree
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn fetch_options<'a, P: ProgressReporter + ?Sized>(
    credentials: &'a Credentials,
    progress: Option<&'a P>,
) -> FetchOptions<'a> {
    let mut callbacks = RemoteCallbacks::new();
    credentials.attach(&mut callbacks);
    if let Some(reporter) = progress {
        progress::attach(&mut callbacks, reporter);
    }

    let mut options = FetchOptions::new();
    options.remote_callbacks(callbacks);
    options
}

/// Clone `url` into `path`, or refresh the checkout already there
pub fn clone_or_pull<P: ProgressReporter + ?Sized>(
    url: &RepoUrl,
    path: &Path,
    credentials: &Credentials,
    progress: Option<&P>,
) -> GitResult<Repository> {
    if Repository::exists(path) {
        let mut repo = Repository::open(path)?;
        repo.pull(credentials, progress)?;
        Ok(repo)
    } else {
        Repository::clone(url, path, credentials, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::parse_git_url;
    use git2::Signature;
    use tempfile::tempdir;

    fn commit_file(repo: &Git2Repository, name: &str, body: &str) {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(name), body).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parents: Vec<_> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parents: Vec<_> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "update", &tree, &parents)
            .unwrap();
    }

    fn file_url(path: &Path) -> RepoUrl {
        parse_git_url(&format!("file://{}", path.display())).unwrap()
    }

    #[test]
    fn test_clone_then_pull() {
        let upstream_dir = tempdir().unwrap();
        let upstream = Git2Repository::init(upstream_dir.path()).unwrap();
        commit_file(&upstream, "main.go", "package main\n");

        let checkout = tempdir().unwrap();
        let target = checkout.path().join("clone");
        let url = file_url(upstream_dir.path());
        let none: Option<&dyn ProgressReporter> = None;

        let repo = clone_or_pull(&url, &target, &Credentials::None, none).unwrap();
        assert_eq!(repo.path(), target.as_path());
        assert_eq!(
            fs::read_to_string(target.join("main.go")).unwrap(),
            "package main\n"
        );

        commit_file(&upstream, "main.go", "package main\n\nfunc main() {}\n");
        clone_or_pull(&url, &target, &Credentials::None, none).unwrap();
        assert_eq!(
            fs::read_to_string(target.join("main.go")).unwrap(),
            "package main\n\nfunc main() {}\n"
        );
    }

    #[test]
    fn test_clone_missing_remote_fails() {
        let checkout = tempdir().unwrap();
        let url = file_url(&checkout.path().join("nope"));
        let none: Option<&dyn ProgressReporter> = None;

        let result = clone_or_pull(&url, &checkout.path().join("clone"), &Credentials::None, none);
        assert!(matches!(result, Err(GitError::CloneError(_))));
    }
}
