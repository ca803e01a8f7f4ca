/*!
 * Git URL parsing and handling
 */

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::{GitError, GitResult};

// scp-like SSH syntax: user@host:path
static SCP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9._-]+)@([^:/\s]+):(.+)$").unwrap());

/// Transport family of a repository URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// `http://` or `https://`
    Https,
    /// `ssh://` or `user@host:path`
    Ssh,
    /// `file://`
    Local,
}

/// A parsed repository URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    /// URL as given, passed to git unchanged
    pub url: String,
    /// Transport family
    pub kind: UrlKind,
    /// Host name, when the URL has one
    pub host: Option<String>,
    /// Repository name: last path segment without `.git`
    pub name: String,
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl FromStr for RepoUrl {
    type Err = GitError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        if let Some(captures) = SCP_REGEX.captures(url) {
            if !url.contains("://") {
                let host = captures.get(2).map(|m| m.as_str().to_string());
                let path = captures.get(3).map_or("", |m| m.as_str());
                return Ok(Self {
                    url: url.to_string(),
                    kind: UrlKind::Ssh,
                    host,
                    name: repo_name(path, url)?,
                });
            }
        }

        let parsed = Url::parse(url).map_err(|e| GitError::InvalidUrl(format!("{}: {}", url, e)))?;
        let kind = match parsed.scheme() {
            "https" | "http" => UrlKind::Https,
            "ssh" => UrlKind::Ssh,
            "file" => UrlKind::Local,
            other => {
                return Err(GitError::InvalidUrl(format!(
                    "unsupported scheme \"{}\" in {}",
                    other, url
                )))
            }
        };
        if kind != UrlKind::Local && parsed.host_str().is_none() {
            return Err(GitError::InvalidUrl(format!("missing host in {}", url)));
        }

        Ok(Self {
            url: url.to_string(),
            kind,
            host: parsed.host_str().map(str::to_string),
            name: repo_name(parsed.path(), url)?,
        })
    }
}

/// Parse a Git repository URL into components
pub fn parse_git_url(url: &str) -> GitResult<RepoUrl> {
    url.parse()
}

/// Extract the repository name from a URL path
fn repo_name(path: &str, url: &str) -> GitResult<String> {
    let trimmed = path.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let name = trimmed.rsplit('/').next().unwrap_or_default();

    if name.is_empty() {
        return Err(GitError::InvalidUrl(format!(
            "could not determine repository name from {}",
            url
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_urls() {
        let repo = parse_git_url("https://github.com/username/repo-to-txt.git").unwrap();
        assert_eq!(repo.kind, UrlKind::Https);
        assert_eq!(repo.host.as_deref(), Some("github.com"));
        assert_eq!(repo.name, "repo-to-txt");

        let repo = parse_git_url("http://git.example.com/group/sub/project/").unwrap();
        assert_eq!(repo.name, "project");
    }

    #[test]
    fn test_ssh_urls() {
        let repo = parse_git_url("git@github.com:username/repo.git").unwrap();
        assert_eq!(repo.kind, UrlKind::Ssh);
        assert_eq!(repo.host.as_deref(), Some("github.com"));
        assert_eq!(repo.name, "repo");

        let repo = parse_git_url("ssh://git@gitlab.com/team/service.git").unwrap();
        assert_eq!(repo.kind, UrlKind::Ssh);
        assert_eq!(repo.name, "service");
    }

    #[test]
    fn test_file_urls() {
        let repo = parse_git_url("file:///tmp/checkouts/demo").unwrap();
        assert_eq!(repo.kind, UrlKind::Local);
        assert_eq!(repo.host, None);
        assert_eq!(repo.name, "demo");
    }

    #[test]
    fn test_invalid_urls() {
        for url in [
            "",
            "username/repo",
            "/path/to/local/directory",
            "https://github.com",
            "https://github.com/",
            "git@github.com:",
            "ftp://example.com/repo.git",
        ] {
            assert!(parse_git_url(url).is_err(), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_display_is_url_as_given() {
        let repo = parse_git_url("git@github.com:username/repo.git").unwrap();
        assert_eq!(repo.to_string(), "git@github.com:username/repo.git");
    }
}
