/*!
 * Configuration handling for repo-to-txt
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::{RepoTxtError, Result};
use crate::filter::FilterPolicy;
use crate::git::{default_ssh_key_path, is_key_encrypted, Credentials, RepoUrl, UrlKind};
use crate::prompt::Prompt;
use crate::utils::parse_comma_separated;

/// Extension of the generated artifact
pub const DEFAULT_OUTPUT_EXT: &str = ".txt";

/// Prefix of the temporary clone directory
pub const DEFAULT_CLONE_DIR: &str = "repo-to-txt-clone";

/// How to authenticate against the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AuthMethod {
    /// Anonymous access
    #[default]
    None,
    /// Username and personal access token over HTTPS
    Https,
    /// SSH private key
    Ssh,
}

/// Command-line arguments for repo-to-txt
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "repo-to-txt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten a Git repository into a single text file",
    long_about = "Clones (or updates) a Git repository and writes the contents of its text files into one delimited text file, optionally restricted to selected files, folders or extensions."
)]
pub struct Args {
    /// Repository URL (HTTPS, SSH or file://)
    #[clap(long)]
    pub repo: Option<String>,

    /// Authentication method
    #[clap(long, value_enum)]
    pub auth: Option<AuthMethod>,

    /// Username for HTTPS authentication
    #[clap(long)]
    pub username: Option<String>,

    /// Personal access token for HTTPS authentication
    #[clap(long = "pat")]
    pub personal_access_token: Option<String>,

    /// Path to the SSH private key
    #[clap(long)]
    pub ssh_key: Option<PathBuf>,

    /// Passphrase of the SSH private key
    #[clap(long)]
    pub ssh_passphrase: Option<String>,

    /// Directory to write the generated text file to
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Comma-separated list of folders to exclude
    #[clap(long = "exclude", value_delimiter = ',')]
    pub exclude_folders: Vec<String>,

    /// Comma-separated list of extensions to include (e.g. .go,.md); when unset, .ipynb files are skipped
    #[clap(long = "include-ext", value_delimiter = ',')]
    pub include_ext: Vec<String>,

    /// Comma-separated list of exact file names to write instead of the whole tree
    #[clap(long, value_delimiter = ',')]
    pub files: Vec<String>,

    /// Copy the output to the system clipboard
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    pub copy_clipboard: Option<bool>,

    /// Keep the checkout in this directory and pull on later runs
    #[clap(long)]
    pub clone_dir: Option<PathBuf>,

    /// Never prompt; use defaults for anything not given on the command line
    #[clap(short = 'y', long)]
    pub non_interactive: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration, built once and never mutated afterwards
#[derive(Clone, Debug)]
pub struct Config {
    /// Repository to clone
    pub repo: RepoUrl,

    /// Transport credentials
    pub credentials: Credentials,

    /// Directory receiving the output file
    pub output_dir: PathBuf,

    /// Folder and extension rules for bulk mode
    pub policy: FilterPolicy,

    /// Exact file names for selected-files mode; empty means bulk mode
    pub file_names: Vec<String>,

    /// Copy output to clipboard
    pub copy_to_clipboard: bool,

    /// Persistent checkout location, if any
    pub clone_dir: Option<PathBuf>,
}

impl Config {
    /// Build the configuration from arguments, asking `prompt` for gaps
    ///
    /// With no prompt, every missing value falls back to its default and a
    /// missing repository URL is an error.
    pub fn resolve(args: Args, mut prompt: Option<&mut (dyn Prompt + '_)>) -> Result<Self> {
        let raw_url = match (args.repo.clone(), prompt.as_deref_mut()) {
            (Some(url), _) => url,
            (None, Some(p)) => p.input("Repository URL (HTTPS or SSH)", None)?,
            (None, None) => {
                crate::bail!(Config, "a repository URL is required (--repo)")
            }
        };
        let repo: RepoUrl = raw_url.trim().parse()?;

        let credentials = resolve_credentials(&args, &repo, prompt.as_deref_mut())?;

        let (output_dir, exclude_folders, include_ext) =
            match (args.output_dir.clone(), prompt.as_deref_mut()) {
                (Some(dir), _) => (dir, args.exclude_folders.clone(), args.include_ext.clone()),
                (None, Some(p)) => {
                    let default_dir = default_output_dir();
                    let dir = p.input(
                        "Output directory",
                        Some(&default_dir.display().to_string()),
                    )?;
                    let exclude = p.input(
                        "Folders to exclude (comma-separated, leave empty to include all)",
                        Some(""),
                    )?;
                    let include = p.input(
                        "File extensions to include (comma-separated, leave empty to include all)",
                        Some(""),
                    )?;
                    (
                        PathBuf::from(dir),
                        merge(&args.exclude_folders, &exclude),
                        merge(&args.include_ext, &include),
                    )
                }
                (None, None) => (
                    default_output_dir(),
                    args.exclude_folders.clone(),
                    args.include_ext.clone(),
                ),
            };

        let file_names = match (args.files.is_empty(), prompt.as_deref_mut()) {
            (true, Some(p)) => parse_comma_separated(&p.input(
                "Exact file names to copy (comma-separated, leave empty to copy all files)",
                Some(""),
            )?),
            _ => clean(&args.files),
        };

        let copy_to_clipboard = match (args.copy_clipboard, prompt.as_deref_mut()) {
            (Some(copy), _) => copy,
            (None, Some(p)) => p.confirm("Copy output to clipboard?", false)?,
            (None, None) => false,
        };

        Ok(Self {
            repo,
            credentials,
            output_dir,
            policy: FilterPolicy::new(exclude_folders, include_ext),
            file_names,
            copy_to_clipboard,
            clone_dir: args.clone_dir,
        })
    }

    /// Path of the artifact: `<output_dir>/<repository name>.txt`
    pub fn output_file(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", self.repo.name, DEFAULT_OUTPUT_EXT))
    }

    /// Validate the configuration and create the output directory
    pub fn validate(&self) -> Result<()> {
        if let Credentials::Key { path, .. } = &self.credentials {
            if !path.exists() {
                crate::bail!(Config, "SSH key file does not exist at path: {}", path.display());
            }
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            RepoTxtError::Config(format!(
                "failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        if let Some(dir) = &self.clone_dir {
            if dir.exists() && !dir.is_dir() {
                crate::bail!(Config, "clone directory is not a directory: {}", dir.display());
            }
        }

        Ok(())
    }
}

fn resolve_credentials(
    args: &Args,
    repo: &RepoUrl,
    mut prompt: Option<&mut (dyn Prompt + '_)>,
) -> Result<Credentials> {
    let method = match (args.auth, prompt.as_deref_mut()) {
        (Some(method), _) => method,
        (None, Some(p)) => {
            let options: &[AuthMethod] = match repo.kind {
                UrlKind::Https => &[AuthMethod::None, AuthMethod::Https],
                UrlKind::Ssh => &[AuthMethod::Ssh],
                UrlKind::Local => &[AuthMethod::None],
            };
            if options.len() == 1 {
                options[0]
            } else {
                let labels: Vec<String> = options.iter().map(|m| auth_label(*m).to_string()).collect();
                options[p.select("Select authentication method", &labels)?]
            }
        }
        (None, None) => infer_auth_method(args, repo),
    };

    match method {
        AuthMethod::None => Ok(Credentials::None),
        AuthMethod::Https => {
            let mut username = args.username.clone().unwrap_or_default();
            let mut secret = args.personal_access_token.clone().unwrap_or_default();
            if let Some(p) = prompt.as_deref_mut() {
                if username.trim().is_empty() {
                    username = p.input("Username", None)?;
                }
                if secret.trim().is_empty() {
                    secret = p.secret("Personal Access Token")?;
                }
            }
            Credentials::basic(username, secret)
        }
        AuthMethod::Ssh => {
            let default_key = default_ssh_key_path();
            let path = match (args.ssh_key.clone(), prompt.as_deref_mut()) {
                (Some(path), _) => path,
                (None, Some(p)) => {
                    let answer = p.input(
                        "Path to SSH private key",
                        Some(&default_key.display().to_string()),
                    )?;
                    PathBuf::from(answer)
                }
                (None, None) => default_key,
            };

            let passphrase = match (args.ssh_passphrase.clone(), prompt.as_deref_mut()) {
                (Some(passphrase), _) => Some(passphrase),
                (None, Some(p)) if is_key_encrypted(&path) => {
                    Some(p.secret("SSH key passphrase (leave empty if none)")?)
                }
                _ => None,
            };

            Ok(Credentials::key(path, passphrase))
        }
    }
}

/// Pick an auth method from what was given when nobody can be asked
fn infer_auth_method(args: &Args, repo: &RepoUrl) -> AuthMethod {
    if args.username.is_some() && args.personal_access_token.is_some() {
        AuthMethod::Https
    } else if repo.kind == UrlKind::Ssh || args.ssh_key.is_some() {
        AuthMethod::Ssh
    } else {
        AuthMethod::None
    }
}

fn auth_label(method: AuthMethod) -> &'static str {
    match method {
        AuthMethod::None => "No Authentication",
        AuthMethod::Https => "HTTPS with PAT",
        AuthMethod::Ssh => "SSH Authentication",
    }
}

fn clean(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flag values first, then whatever was typed at the prompt
fn merge(flags: &[String], typed: &str) -> Vec<String> {
    let mut items = clean(flags);
    items.extend(parse_comma_separated(typed));
    items
}

/// The user's download directory, falling back to home, then the current directory
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .filter(|d| d.is_dir())
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}
