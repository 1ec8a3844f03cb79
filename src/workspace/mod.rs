//! `.code-workspace` descriptor files

use crate::colors::StyleMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const WORKSPACE_EXTENSION: &str = "code-workspace";

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to write workspace file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize workspace: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceFolder {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSettings {
    #[serde(rename = "window.title")]
    pub window_title: String,

    #[serde(
        rename = "workbench.colorCustomizations",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_customizations: Option<StyleMap>,
}

/// Contents of a `.code-workspace` file
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceDescriptor {
    pub folders: Vec<WorkspaceFolder>,
    pub settings: WorkspaceSettings,
}

impl WorkspaceDescriptor {
    /// Single-folder workspace titled after the project
    pub fn new(project_name: &str, checkout: &Path, colors: Option<StyleMap>) -> Self {
        Self {
            folders: vec![WorkspaceFolder {
                path: checkout.to_path_buf(),
            }],
            settings: WorkspaceSettings {
                window_title: format!(
                    "[{}] ${{dirty}} ${{activeEditorMedium}}${{separator}}${{rootName}}",
                    project_name
                ),
                color_customizations: colors,
            },
        }
    }

    /// Write the descriptor, creating the parent directory when needed
    pub fn write(&self, path: &Path) -> Result<(), WorkspaceError> {
        let content = serde_json::to_string_pretty(self)?;
        let io_err = |source| WorkspaceError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, content).map_err(io_err)?;

        info!("Wrote workspace file {}", path.display());
        Ok(())
    }
}

/// `<dir>/<project>.code-workspace`
pub fn workspace_path(dir: &Path, project_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", project_name, WORKSPACE_EXTENSION))
}
