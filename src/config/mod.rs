//! Configuration management for the projects CLI
//!
//! Supports configuration via:
//! 1. Config file (~/.config/projects/config.toml)
//! 2. Environment variables (PROJECTS_GITHUB_APIS, PROJECTS_ROOT, etc.)
//! 3. CLI arguments (override file/env settings)

use crate::colors::CustomThemeInput;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Git hosting API endpoints
    pub github: GitHubSettings,

    /// Where local checkouts live
    pub projects: ProjectSettings,

    /// Workspace descriptor settings
    pub workspace: WorkspaceSettings,

    /// Color theme settings
    pub colors: ColorSettings,
}

/// GitHub API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// API hosts, e.g. "api.github.com" or "github.example.com/api/v3"
    pub apis: Vec<String>,

    /// JSON file mapping each API host to its token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,

    /// Page size for repository listing
    pub per_page: u32,

    /// Create new repositories as private
    pub private: bool,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            apis: vec!["api.github.com".to_string()],
            credentials_file: None,
            per_page: 100,
            private: true,
        }
    }
}

/// Local checkout settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Directories searched for (and receiving) checkouts; empty means home
    pub root_locations: Vec<PathBuf>,
}

/// Workspace descriptor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Directory holding `.code-workspace` files (default ~/ws)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_location: Option<PathBuf>,

    /// Editor launched with the workspace file
    pub editor_command: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            files_location: None,
            editor_command: "code".to_string(),
        }
    }
}

/// Color theme settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Also color the activity bar
    pub activity_bar: bool,

    /// User-defined themes
    #[serde(deserialize_with = "lenient_custom")]
    pub custom: Vec<CustomThemeInput>,
}

/// Entries that are not tables become blank inputs, rejected when the
/// registry loads them instead of failing the whole file.
fn lenient_custom<'de, D>(deserializer: D) -> Result<Vec<CustomThemeInput>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Vec::<toml::Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| CustomThemeInput::deserialize(entry).unwrap_or_default())
        .collect())
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            activity_bar: true,
            custom: Vec::new(),
        }
    }
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("projects")
    }

    fn home_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load config from default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from specific path
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(apis) = std::env::var("PROJECTS_GITHUB_APIS") {
            self.github.apis = apis
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(roots) = std::env::var_os("PROJECTS_ROOT") {
            self.projects.root_locations = std::env::split_paths(&roots).collect();
        }
        if let Ok(dir) = std::env::var("PROJECTS_WORKSPACE_DIR") {
            self.workspace.files_location = Some(PathBuf::from(dir));
        }
        if let Ok(editor) = std::env::var("PROJECTS_EDITOR") {
            self.workspace.editor_command = editor;
        }

        self
    }

    /// Save config to default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to specific path
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.apis.is_empty() {
            return Err(ConfigError::MissingRequired(
                "At least one GitHub API host must be configured (github.apis)".to_string(),
            ));
        }
        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(ConfigError::Invalid(format!(
                "github.per_page must be between 1 and 100, got {}",
                self.github.per_page
            )));
        }
        if self.workspace.editor_command.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "workspace.editor_command".to_string(),
            ));
        }
        Ok(())
    }

    /// Checkout roots, falling back to the home directory
    pub fn root_locations(&self) -> Vec<PathBuf> {
        if self.projects.root_locations.is_empty() {
            vec![Self::home_dir()]
        } else {
            self.projects.root_locations.clone()
        }
    }

    /// Directory for workspace descriptors, falling back to ~/ws
    pub fn workspace_dir(&self) -> PathBuf {
        self.workspace
            .files_location
            .clone()
            .unwrap_or_else(|| Self::home_dir().join("ws"))
    }

    /// Credentials file, falling back to ~/.config/projects/credentials.json
    pub fn credentials_path(&self) -> PathBuf {
        self.github
            .credentials_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("credentials.json"))
    }

    /// Generate example config content
    pub fn example() -> String {
        let mut example = Config::default();
        example.colors.custom.push(CustomThemeInput {
            name: "My Custom Color".to_string(),
            active_background: Some("#1E1E1E".to_string()),
            active_foreground: Some("#FFFFFF".to_string()),
            border_color: Some("#007ACC".to_string()),
            inactive_background: Some("#FFFFFF".to_string()),
            inactive_foreground: Some("#000000".to_string()),
        });
        toml::to_string_pretty(&example).unwrap_or_default()
    }
}

/// Builder for creating Config programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn api(mut self, host: impl Into<String>) -> Self {
        self.config.github.apis.push(host.into());
        self
    }

    pub fn apis<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.github.apis = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.github.credentials_file = Some(path.into());
        self
    }

    pub fn root_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.projects.root_locations.push(path.into());
        self
    }

    pub fn workspace_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.workspace.files_location = Some(path.into());
        self
    }

    pub fn editor_command(mut self, command: impl Into<String>) -> Self {
        self.config.workspace.editor_command = command.into();
        self
    }

    pub fn activity_bar(mut self, enabled: bool) -> Self {
        self.config.colors.activity_bar = enabled;
        self
    }

    pub fn custom_color(mut self, theme: CustomThemeInput) -> Self {
        self.config.colors.custom.push(theme);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ColorRegistry;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.apis, vec!["api.github.com"]);
        assert_eq!(config.github.per_page, 100);
        assert_eq!(config.workspace.editor_command, "code");
        assert!(config.colors.activity_bar);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .apis(["github.example.com/api/v3"])
            .root_location("/src")
            .workspace_dir("/tmp/ws")
            .activity_bar(false)
            .build();

        assert_eq!(config.github.apis, vec!["github.example.com/api/v3"]);
        assert_eq!(config.root_locations(), vec![PathBuf::from("/src")]);
        assert_eq!(config.workspace_dir(), PathBuf::from("/tmp/ws"));
        assert!(!config.colors.activity_bar);
    }

    #[test]
    fn test_root_locations_default_to_home() {
        let config = Config::default();
        assert_eq!(config.root_locations().len(), 1);
        assert!(config.workspace_dir().ends_with("ws"));
    }

    #[test]
    fn test_example_config() {
        let example = Config::example();
        assert!(example.contains("[github]"));
        assert!(example.contains("[[colors.custom]]"));

        let parsed: Config = toml::from_str(&example).unwrap();
        assert_eq!(parsed.colors.custom.len(), 1);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
            [github]
            apis = ["api.github.com", "github.corp.example/api/v3"]

            [[colors.custom]]
            name = "Team"
            active_background = "#101010"
            active_foreground = "#FFFFFF"
            border_color = "#202020"
            inactive_background = "#FFFFFF"
            inactive_foreground = "#000000"
            "##,
        )
        .unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.github.apis.len(), 2);
        assert_eq!(config.colors.custom[0].name, "Team");
        assert_eq!(config.workspace.editor_command, "code");
    }

    #[test]
    fn test_load_skips_malformed_custom_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
            [[colors.custom]]
            name = "Team"
            active_background = "#101010"
            active_foreground = "#FFFFFF"
            border_color = "#202020"
            inactive_background = "#FFFFFF"
            inactive_foreground = "#000000"

            [[colors.custom]]
            name = "Numeric"
            active_background = 123
            active_foreground = "#FFFFFF"
            border_color = "#202020"
            inactive_background = "#FFFFFF"
            inactive_foreground = "#000000"

            [[colors.custom]]
            active_background = "#101010"
            active_foreground = "#FFFFFF"
            border_color = "#202020"
            inactive_background = "#FFFFFF"
            inactive_foreground = "#000000"
            "##,
        )
        .unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.colors.custom.len(), 3);

        let (registry, skipped) = ColorRegistry::with_custom(&config.colors.custom);
        assert_eq!(skipped.len(), 2);
        assert_eq!(
            registry.resolve("Team").unwrap().active_background.as_str(),
            "#101010"
        );
        assert!(registry.resolve("Numeric").is_err());
    }

    #[test]
    fn test_non_table_custom_entry_is_skipped() {
        let config: Config = toml::from_str(
            r##"
            [colors]
            custom = ["not a table"]
            "##,
        )
        .unwrap();

        let (registry, skipped) = ColorRegistry::with_custom(&config.colors.custom);
        assert_eq!(skipped.len(), 1);
        assert!(!registry.has_custom());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ConfigBuilder::new().editor_command("codium").build();
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.workspace.editor_command, "codium");
    }

    #[test]
    fn test_bad_custom_color_is_skipped_not_fatal() {
        let config = ConfigBuilder::new()
            .custom_color(CustomThemeInput {
                name: "Half".to_string(),
                active_background: Some("#000000".to_string()),
                ..Default::default()
            })
            .build();
        assert!(config.validate().is_ok());

        let (registry, skipped) = ColorRegistry::with_custom(&config.colors.custom);
        assert_eq!(skipped.len(), 1);
        assert!(!registry.has_custom());
    }

    #[test]
    fn test_validate_requires_api() {
        let config = ConfigBuilder::new().apis(Vec::<String>::new()).build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
