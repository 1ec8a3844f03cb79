//! project-workspaces - Open GitHub projects as colored editor workspaces
//!
//! Pick a repository from one or more GitHub API hosts, make sure a local
//! checkout exists (cloning it when needed) and open a per-project
//! `.code-workspace` file whose title bar carries a color derived from the
//! project name.
//!
//! ## Key Features
//!
//! - **Deterministic Colors**: Every project name hashes to a stable theme
//! - **Custom Themes**: Configured themes come first and shadow built-ins
//! - **Multiple Hosts**: github.com and Enterprise hosts side by side
//! - **Templates**: New repositories can be generated from template repos

pub mod colors;
pub mod config;
pub mod git;
pub mod github;
pub mod orchestrator;
pub mod prompt;
pub mod workspace;

pub use colors::{
    build_selection_list, default_theme, default_theme_name, hash_name, ColorError,
    ColorRegistry, CustomThemeInput, HexColor, Partition, SelectionEntry, SelectionList,
    StyleMap, ThemeApplier, ThemeRecord,
};
pub use config::{Config, ConfigBuilder, ConfigError};
pub use github::{GitHubClient, GitHubError, Repo, RepositoryHost};
pub use orchestrator::{Launcher, Orchestrator, SystemLauncher, WorkflowError};
pub use prompt::{Prompter, TerminalPrompter};
pub use workspace::WorkspaceDescriptor;
