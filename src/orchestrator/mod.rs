//! Project workflows
//!
//! This module ties the pieces together:
//! - Selecting an existing repository and opening its workspace
//! - Creating a repository (optionally from a template) and opening it
//! - Opening the repository web page for a local checkout

mod launcher;

pub use launcher::{LaunchError, Launcher, SystemLauncher};

use crate::colors::{
    build_selection_list, ColorError, ColorRegistry, SelectionList, StyleMap, ThemeApplier,
};
use crate::config::{Config, ConfigError};
use crate::git::{self, GitError};
use crate::github::{list_all_repos, GitHubError, NewRepo, Repo, RepositoryHost};
use crate::prompt::{ProgressSpinner, PromptError, Prompter};
use crate::workspace::{workspace_path, WorkspaceDescriptor, WorkspaceError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Label of the entry that skips template selection
pub const NO_TEMPLATE: &str = "No template";

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("Cancelled")]
    Cancelled,

    #[error("Invalid repository name '{0}'")]
    InvalidRepoName(String),

    #[error("No GitHub API hosts configured")]
    NoHostsConfigured,

    #[error("No repositories found on the configured hosts")]
    NoRepositories,

    #[error("No project root locations configured")]
    NoRootLocations,
}

/// Trim and check a new repository name against GitHub's rules and the
/// names already taken on the host
pub fn validate_repo_name(raw: &str, existing: &[Repo]) -> Result<String, WorkflowError> {
    let name = raw.trim();
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if name.is_empty() || name == "." || name == ".." || !valid_chars {
        return Err(WorkflowError::InvalidRepoName(name.to_string()));
    }
    if existing.iter().any(|r| r.name.eq_ignore_ascii_case(name)) {
        return Err(WorkflowError::InvalidRepoName(name.to_string()));
    }
    Ok(name.to_string())
}

/// Drives the interactive project workflows
pub struct Orchestrator<H: RepositoryHost, P: Prompter, L: Launcher> {
    config: Config,
    host: H,
    prompter: P,
    launcher: L,
    registry: ColorRegistry,
    applier: ThemeApplier,
}

impl<H: RepositoryHost, P: Prompter, L: Launcher> Orchestrator<H, P, L> {
    pub fn new(config: Config, host: H, prompter: P, launcher: L) -> Self {
        // Skipped custom entries are logged by the registry
        let (registry, _) = ColorRegistry::with_custom(&config.colors.custom);
        let applier = ThemeApplier::new(config.colors.activity_bar);

        Self {
            config,
            host,
            prompter,
            launcher,
            registry,
            applier,
        }
    }

    pub fn registry(&self) -> &ColorRegistry {
        &self.registry
    }

    /// Apply a new configuration; custom colors are reloaded
    pub fn reconfigure(&mut self, config: Config) -> Result<(), WorkflowError> {
        config.validate()?;
        self.registry.reload(&config.colors.custom);
        self.applier = ThemeApplier::new(config.colors.activity_bar);
        self.config = config;
        Ok(())
    }

    fn choose(&mut self, placeholder: &str, list: &SelectionList) -> Result<String, WorkflowError> {
        self.prompter
            .select(placeholder, list)?
            .ok_or(WorkflowError::Cancelled)
    }

    /// Pick any repository from every host and open its workspace
    pub async fn select_project(&mut self) -> Result<PathBuf, WorkflowError> {
        if self.config.github.apis.is_empty() {
            return Err(WorkflowError::NoHostsConfigured);
        }

        let spinner = ProgressSpinner::start("Listing repositories...");
        let mut repos = list_all_repos(&self.host, &self.config.github.apis).await;
        spinner.finish();

        if repos.is_empty() {
            return Err(WorkflowError::NoRepositories);
        }

        let list = SelectionList::from_labels(repos.keys().cloned());
        let choice = self.choose("Select a project", &list)?;
        let repo = repos.remove(&choice).ok_or(WorkflowError::Cancelled)?;

        let path = self.obtain_code_workspace(&repo).await?;
        self.launcher.open_workspace(&path)?;
        Ok(path)
    }

    /// Create a repository, check it out and open its workspace
    pub async fn new_project(&mut self) -> Result<PathBuf, WorkflowError> {
        let hosts = self.config.github.apis.clone();
        let host = match hosts.as_slice() {
            [] => return Err(WorkflowError::NoHostsConfigured),
            [only] => only.clone(),
            _ => self.choose("Select a host", &SelectionList::from_labels(hosts.iter().cloned()))?,
        };

        let existing = self.host.list_repos(&host).await?;

        let raw = self
            .prompter
            .input("New repository name")?
            .ok_or(WorkflowError::Cancelled)?;
        let name = validate_repo_name(&raw, &existing)?;
        let template = self.choose_template(&existing)?;

        let request = NewRepo {
            name,
            private: self.config.github.private,
            template,
        };
        info!("Creating {} on {}", request.name, host);
        let repo = self.host.create_repo(&host, &request).await?;
        info!("Created {}", repo.full_name);

        let path = self.obtain_code_workspace(&repo).await?;
        self.launcher.open_workspace(&path)?;
        Ok(path)
    }

    /// Offer the host's template repositories; cancelling means no template
    fn choose_template(&mut self, repos: &[Repo]) -> Result<Option<Repo>, WorkflowError> {
        let mut templates: Vec<&Repo> = repos.iter().filter(|r| r.is_template).collect();
        if templates.is_empty() {
            return Ok(None);
        }
        templates.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        let labels = std::iter::once(NO_TEMPLATE.to_string())
            .chain(templates.iter().map(|r| r.full_name.clone()));
        let choice = self
            .prompter
            .select("Select a template", &SelectionList::from_labels(labels))?;

        Ok(choice.and_then(|label| {
            templates
                .into_iter()
                .find(|r| r.full_name == label)
                .cloned()
        }))
    }

    /// Reuse the repository's workspace file or build a new one
    pub async fn obtain_code_workspace(&mut self, repo: &Repo) -> Result<PathBuf, WorkflowError> {
        let path = workspace_path(&self.config.workspace_dir(), &repo.name);
        if path.exists() {
            info!("Existing code workspace: {}", path.display());
            return Ok(path);
        }

        debug!("Will create new code workspace {}", path.display());
        let checkout = self.obtain_local_checkout(repo).await?;
        let colors = self.choose_colors(&repo.name)?;

        WorkspaceDescriptor::new(&repo.name, &checkout, colors).write(&path)?;
        Ok(path)
    }

    /// Find an existing checkout under the project roots, or clone one
    pub async fn obtain_local_checkout(&mut self, repo: &Repo) -> Result<PathBuf, WorkflowError> {
        let roots = self.config.root_locations();

        if let Some(checkout) = git::find_in_roots(&roots, repo) {
            info!("Found local checkout of {} at {}", repo.full_name, checkout.display());
            return Ok(checkout);
        }

        info!("No local checkout of {} found, cloning...", repo.full_name);
        let root = self.choose_root(&roots)?;

        let spinner = ProgressSpinner::start(format!("Cloning {} ...", repo.ssh_url));
        let result = git::clone(repo, &root).await;
        spinner.finish();

        Ok(result?)
    }

    fn choose_root(&mut self, roots: &[PathBuf]) -> Result<PathBuf, WorkflowError> {
        match roots {
            [] => Err(WorkflowError::NoRootLocations),
            [only] => Ok(only.clone()),
            _ => {
                let labels = roots.iter().map(|r| r.display().to_string());
                let choice = self.choose("Select a location", &SelectionList::from_labels(labels))?;
                roots
                    .iter()
                    .find(|r| r.display().to_string() == choice)
                    .cloned()
                    .ok_or(WorkflowError::Cancelled)
            }
        }
    }

    /// Ask for the project's theme, preselecting its default.
    ///
    /// Returns `None` when no theme is available at all.
    pub fn choose_colors(&mut self, project_name: &str) -> Result<Option<StyleMap>, WorkflowError> {
        let list = build_selection_list(project_name, &self.registry);
        if list.is_empty() {
            warn!("No color themes available, workspace will not be colored");
            return Ok(None);
        }

        let choice = self.choose("Select a color", &list)?;
        let theme = self.registry.resolve(&choice)?;
        info!("Using color '{}' for {}", choice, project_name);

        Ok(Some(self.applier.to_style_map(&theme)))
    }

    /// Open the web page of the repository checked out at `dir`.
    ///
    /// With `file`, links to that file on the current branch, at `line`
    /// when given.
    pub async fn open_web_page(
        &mut self,
        dir: &Path,
        file: Option<&Path>,
        line: Option<u32>,
    ) -> Result<String, WorkflowError> {
        let remote = git::remote_url(dir).await?;
        let web = git::web_url(&remote)?;

        let url = match file {
            Some(file) => {
                let top = git::toplevel(dir).await?;
                let relative = relative_to(&top, &dir.join(file))?;
                let branch = git::current_branch(dir).await?;
                git::deep_link(&web, &branch, &relative, line)
            }
            None => web,
        };

        self.launcher.open_url(&url)?;
        Ok(url)
    }
}

/// `path` relative to `top`, resolving symlinks where possible
fn relative_to(top: &Path, path: &Path) -> Result<PathBuf, GitError> {
    let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    canonical(path)
        .strip_prefix(canonical(top))
        .map(Path::to_path_buf)
        .map_err(|_| GitError::OutsideRepository(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{default_theme_name, CustomThemeInput};
    use crate::config::ConfigBuilder;
    use crate::github::Owner;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn repo(full_name: &str, is_template: bool) -> Repo {
        let (owner, name) = full_name.split_once('/').unwrap();
        Repo {
            name: name.to_string(),
            full_name: full_name.to_string(),
            ssh_url: format!("git@github.com:{}.git", full_name),
            clone_url: None,
            html_url: None,
            default_branch: None,
            is_template,
            owner: Owner {
                login: owner.to_string(),
                kind: "User".to_string(),
            },
        }
    }

    #[derive(Default)]
    struct FakeHost {
        repos: Vec<Repo>,
        created: Arc<Mutex<Vec<NewRepo>>>,
    }

    #[async_trait]
    impl RepositoryHost for FakeHost {
        async fn list_repos(&self, _host: &str) -> Result<Vec<Repo>, GitHubError> {
            Ok(self.repos.clone())
        }

        async fn create_repo(&self, _host: &str, request: &NewRepo) -> Result<Repo, GitHubError> {
            self.created.lock().unwrap().push(request.clone());
            Ok(repo(&format!("me/{}", request.name), false))
        }
    }

    enum Answer {
        Pick(&'static str),
        Default,
        Cancel,
        Text(&'static str),
    }

    struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        asked: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedPrompter {
        fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: answers.into(),
                asked: Arc::default(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(
            &mut self,
            placeholder: &str,
            list: &SelectionList,
        ) -> Result<Option<String>, PromptError> {
            self.asked.lock().unwrap().push(placeholder.to_string());
            Ok(match self.answers.pop_front() {
                Some(Answer::Pick(label)) => {
                    assert!(list.contains(label), "{} not offered", label);
                    Some(label.to_string())
                }
                Some(Answer::Default) => list.default_label().map(str::to_string),
                _ => None,
            })
        }

        fn input(&mut self, placeholder: &str) -> Result<Option<String>, PromptError> {
            self.asked.lock().unwrap().push(placeholder.to_string());
            Ok(match self.answers.pop_front() {
                Some(Answer::Text(text)) => Some(text.to_string()),
                _ => None,
            })
        }
    }

    #[derive(Default, Clone)]
    struct RecordingLauncher {
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl Launcher for RecordingLauncher {
        fn open_workspace(&self, path: &Path) -> Result<(), LaunchError> {
            self.opened.lock().unwrap().push(path.display().to_string());
            Ok(())
        }

        fn open_url(&self, url: &str) -> Result<(), LaunchError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn fake_checkout(root: &Path, repo: &Repo) -> PathBuf {
        let dir = root.join(&repo.name);
        std::fs::create_dir_all(dir.join(".git")).unwrap();
        std::fs::write(
            dir.join(".git").join("config"),
            format!("[remote \"origin\"]\n\turl = {}\n", repo.ssh_url),
        )
        .unwrap();
        dir
    }

    fn config(root: &Path) -> Config {
        ConfigBuilder::new()
            .apis(["api.github.com"])
            .root_location(root.join("src"))
            .workspace_dir(root.join("ws"))
            .build()
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_select_project_with_existing_checkout() {
        let tmp = tempfile::tempdir().unwrap();
        let widgets = repo("acme/widgets", false);
        let checkout = fake_checkout(&tmp.path().join("src"), &widgets);

        let host = FakeHost {
            repos: vec![repo("acme/gadgets", false), widgets],
            ..Default::default()
        };
        let launcher = RecordingLauncher::default();
        let prompter = ScriptedPrompter::new(vec![Answer::Pick("acme/widgets"), Answer::Default]);
        let mut orchestrator =
            Orchestrator::new(config(tmp.path()), host, prompter, launcher.clone());

        let path = orchestrator.select_project().await.unwrap();
        assert_eq!(path, tmp.path().join("ws").join("widgets.code-workspace"));
        assert_eq!(*launcher.opened.lock().unwrap(), vec![path.display().to_string()]);

        let expected_theme = default_theme_name("widgets", orchestrator.registry());
        let expected = orchestrator.registry().resolve(&expected_theme).unwrap();
        let json = read_json(&path);
        assert_eq!(json["folders"][0]["path"], checkout.display().to_string());
        assert_eq!(
            json["settings"]["workbench.colorCustomizations"]["titleBar.activeBackground"],
            expected.active_background.as_str()
        );
        assert_eq!(
            json["settings"]["workbench.colorCustomizations"]["activityBar.background"],
            expected.active_background.as_str()
        );
    }

    #[tokio::test]
    async fn test_existing_workspace_file_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let widgets = repo("acme/widgets", false);
        let path = workspace_path(&tmp.path().join("ws"), "widgets");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{}").unwrap();

        let prompter = ScriptedPrompter::new(vec![]);
        let asked = Arc::clone(&prompter.asked);
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            FakeHost::default(),
            prompter,
            RecordingLauncher::default(),
        );

        assert_eq!(orchestrator.obtain_code_workspace(&widgets).await.unwrap(), path);
        assert!(asked.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_color_cancel_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let widgets = repo("acme/widgets", false);
        fake_checkout(&tmp.path().join("src"), &widgets);

        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            FakeHost::default(),
            ScriptedPrompter::new(vec![Answer::Cancel]),
            RecordingLauncher::default(),
        );

        let err = orchestrator.obtain_code_workspace(&widgets).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Cancelled));
        assert!(!workspace_path(&tmp.path().join("ws"), "widgets").exists());
    }

    #[tokio::test]
    async fn test_custom_color_is_offered_and_applied() {
        let tmp = tempfile::tempdir().unwrap();
        let widgets = repo("acme/widgets", false);
        fake_checkout(&tmp.path().join("src"), &widgets);

        let mut cfg = config(tmp.path());
        cfg.colors.activity_bar = false;
        cfg.colors.custom.push(CustomThemeInput {
            name: "My Custom Color".to_string(),
            active_background: Some("#ABCDEF".to_string()),
            active_foreground: Some("#FFFFFF".to_string()),
            border_color: Some("#123456".to_string()),
            inactive_background: Some("#FFFFFF".to_string()),
            inactive_foreground: Some("#000000".to_string()),
        });

        let mut orchestrator = Orchestrator::new(
            cfg,
            FakeHost::default(),
            ScriptedPrompter::new(vec![Answer::Pick("My Custom Color")]),
            RecordingLauncher::default(),
        );

        let path = orchestrator.obtain_code_workspace(&widgets).await.unwrap();
        let colors = &read_json(&path)["settings"]["workbench.colorCustomizations"];
        assert_eq!(colors["titleBar.activeBackground"], "#ABCDEF");
        assert!(colors.get("activityBar.background").is_none());
    }

    #[tokio::test]
    async fn test_new_project_from_template() {
        let tmp = tempfile::tempdir().unwrap();
        fake_checkout(&tmp.path().join("src"), &repo("me/fresh", false));

        let host = FakeHost {
            repos: vec![repo("me/old", false), repo("me/starter", true)],
            ..Default::default()
        };
        let created = Arc::clone(&host.created);
        let prompter = ScriptedPrompter::new(vec![
            Answer::Text("  fresh "),
            Answer::Pick("me/starter"),
            Answer::Default,
        ]);
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            host,
            prompter,
            RecordingLauncher::default(),
        );

        let path = orchestrator.new_project().await.unwrap();
        assert_eq!(path, tmp.path().join("ws").join("fresh.code-workspace"));

        let created = created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "fresh");
        assert!(created[0].private);
        assert_eq!(
            created[0].template.as_ref().map(|t| t.full_name.as_str()),
            Some("me/starter")
        );
    }

    #[tokio::test]
    async fn test_new_project_template_cancel_means_none() {
        let tmp = tempfile::tempdir().unwrap();
        fake_checkout(&tmp.path().join("src"), &repo("me/fresh", false));

        let host = FakeHost {
            repos: vec![repo("me/starter", true)],
            ..Default::default()
        };
        let created = Arc::clone(&host.created);
        let prompter =
            ScriptedPrompter::new(vec![Answer::Text("fresh"), Answer::Cancel, Answer::Default]);
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            host,
            prompter,
            RecordingLauncher::default(),
        );

        orchestrator.new_project().await.unwrap();
        assert!(created.lock().unwrap()[0].template.is_none());
    }

    #[tokio::test]
    async fn test_new_project_rejects_existing_name() {
        let tmp = tempfile::tempdir().unwrap();
        let host = FakeHost {
            repos: vec![repo("me/taken", false)],
            ..Default::default()
        };
        let created = Arc::clone(&host.created);
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            host,
            ScriptedPrompter::new(vec![Answer::Text("Taken")]),
            RecordingLauncher::default(),
        );

        let err = orchestrator.new_project().await.unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidRepoName(name) if name == "Taken"));
        assert!(created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_select_project_without_repositories() {
        let tmp = tempfile::tempdir().unwrap();
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            FakeHost::default(),
            ScriptedPrompter::new(vec![]),
            RecordingLauncher::default(),
        );

        assert!(matches!(
            orchestrator.select_project().await,
            Err(WorkflowError::NoRepositories)
        ));
    }

    #[test]
    fn test_choose_root_prompts_only_with_several() {
        let tmp = tempfile::tempdir().unwrap();
        let prompter = ScriptedPrompter::new(vec![Answer::Pick("/b")]);
        let asked = Arc::clone(&prompter.asked);
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            FakeHost::default(),
            prompter,
            RecordingLauncher::default(),
        );

        let one = vec![PathBuf::from("/a")];
        assert_eq!(orchestrator.choose_root(&one).unwrap(), PathBuf::from("/a"));
        assert!(asked.lock().unwrap().is_empty());

        let several = vec![PathBuf::from("/a"), PathBuf::from("/b")];
        assert_eq!(orchestrator.choose_root(&several).unwrap(), PathBuf::from("/b"));
        assert_eq!(asked.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_reconfigure_reloads_custom_colors() {
        let tmp = tempfile::tempdir().unwrap();
        let mut orchestrator = Orchestrator::new(
            config(tmp.path()),
            FakeHost::default(),
            ScriptedPrompter::new(vec![]),
            RecordingLauncher::default(),
        );
        assert!(!orchestrator.registry().has_custom());

        let mut cfg = config(tmp.path());
        cfg.colors.custom.push(CustomThemeInput {
            name: "Team".to_string(),
            active_background: Some("#010101".to_string()),
            active_foreground: Some("#FFFFFF".to_string()),
            border_color: Some("#020202".to_string()),
            inactive_background: Some("#FFFFFF".to_string()),
            inactive_foreground: Some("#000000".to_string()),
        });
        orchestrator.reconfigure(cfg).unwrap();

        assert!(orchestrator.registry().resolve("Team").is_ok());
    }

    #[test]
    fn test_validate_repo_name() {
        let existing = vec![repo("me/widgets", false)];
        assert_eq!(validate_repo_name(" new.repo_1 ", &existing).unwrap(), "new.repo_1");
        assert!(validate_repo_name("", &existing).is_err());
        assert!(validate_repo_name("..", &existing).is_err());
        assert!(validate_repo_name("has space", &existing).is_err());
        assert!(validate_repo_name("WIDGETS", &existing).is_err());
    }

    #[test]
    fn test_relative_to() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src").join("lib.rs");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, "").unwrap();

        assert_eq!(
            relative_to(tmp.path(), &file).unwrap(),
            PathBuf::from("src").join("lib.rs")
        );
        assert!(relative_to(&tmp.path().join("src"), tmp.path()).is_err());
    }
}
