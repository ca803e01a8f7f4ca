/*!
 * Clipboard support for repo-to-txt
 *
 * Pipes the finished output into whichever clipboard command the
 * system provides.
 */

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Available clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    /// tmux paste buffer
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard, natively or from WSL
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }

    fn copy(self, data: &[u8]) -> Result<()> {
        let (cmd, args) = self.command();
        debug!("Copying {} bytes with {}", data.len(), cmd);
        execute_clipboard_command(cmd, args, data)
    }
}

/// Copy raw bytes to the clipboard
///
/// Providers are tried in order of preference until one accepts the data.
pub fn copy_to_clipboard(data: &[u8]) -> Result<()> {
    let providers = determine_clipboard_providers();
    let mut last_error = ClipboardError::NoClipboardFound;

    for provider in providers {
        match provider.copy(data) {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!("{:?} clipboard failed: {}", provider, e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Copy the contents of a file to the clipboard
pub fn copy_file_to_clipboard(path: &Path) -> Result<()> {
    let data = fs::read(path)?;
    copy_to_clipboard(&data)
}

/// Check if a command exists on the system `PATH`
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

fn execute_clipboard_command(cmd: &str, args: &[&str], data: &[u8]) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin.write_all(data)?;
    }
    // Close stdin so the command sees EOF
    drop(child.stdin.take());

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(3);

    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }

    if cfg!(target_os = "macos") {
        providers.push(ClipboardProvider::MacOS);
    } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
        providers.push(ClipboardProvider::Windows);
    } else if cfg!(target_os = "android") {
        providers.push(ClipboardProvider::Termux);
    } else {
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            providers.push(ClipboardProvider::Wayland);
        }
        providers.push(ClipboardProvider::Xsel);
        providers.push(ClipboardProvider::Xclip);
    }

    providers.retain(|p| command_exists(p.command().0));
    providers
}
