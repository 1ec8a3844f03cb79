//! Opening workspaces in the editor and pages in the browser

use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Editor command is empty")]
    EmptyCommand,

    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to open browser: {0}")]
    Browser(std::io::Error),
}

/// Hands results to the desktop
pub trait Launcher: Send + Sync {
    fn open_workspace(&self, path: &Path) -> Result<(), LaunchError>;

    fn open_url(&self, url: &str) -> Result<(), LaunchError>;
}

/// Starts the configured editor and the default browser
pub struct SystemLauncher {
    editor_command: String,
}

impl SystemLauncher {
    /// `editor_command` may include arguments, e.g. `code --new-window`
    pub fn new(editor_command: impl Into<String>) -> Self {
        Self {
            editor_command: editor_command.into(),
        }
    }
}

impl Launcher for SystemLauncher {
    fn open_workspace(&self, path: &Path) -> Result<(), LaunchError> {
        let mut parts = self.editor_command.split_whitespace();
        let program = parts.next().ok_or(LaunchError::EmptyCommand)?;

        info!("Opening {} with {}", path.display(), program);
        Command::new(program)
            .args(parts)
            .arg(path)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: self.editor_command.clone(),
                source,
            })?;
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        info!("Opening {}", url);
        webbrowser::open(url).map_err(LaunchError::Browser)
    }
}
