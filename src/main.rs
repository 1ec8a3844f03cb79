//! projects CLI - Open GitHub projects as colored editor workspaces

use anyhow::Result;
use clap::{Parser, Subcommand};
use project_workspaces::{
    colors::{
        build_selection_list, default_theme, ColorRegistry, Partition, SelectionEntry,
        ThemeApplier,
    },
    config::Config,
    github::{Credentials, GitHubClient},
    orchestrator::{Orchestrator, SystemLauncher, WorkflowError},
    prompt::TerminalPrompter,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

type CliOrchestrator = Orchestrator<GitHubClient, TerminalPrompter, SystemLauncher>;

#[derive(Parser)]
#[command(name = "projects")]
#[command(about = "Open GitHub projects as colored editor workspaces")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a repository and open its workspace
    Select,

    /// Create a repository and open its workspace
    New,

    /// Open the repository web page for a checkout
    OpenPage {
        /// Directory inside the checkout (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// File to link to, relative to --dir
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Line to link to (requires --file)
        #[arg(short, long, requires = "file")]
        line: Option<u32>,
    },

    /// Inspect color themes
    #[command(subcommand)]
    Colors(ColorCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ColorCommands {
    /// List theme names, or the selection list offered for a project
    List {
        /// Project name
        project: Option<String>,
    },

    /// Show the default theme of a project
    Default {
        /// Project name
        project: String,
    },

    /// Print the editor color customizations of a theme as JSON
    Show {
        /// Theme name
        theme: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize configuration file with an example
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show {
        /// Show only specific section (github, projects, workspace, colors)
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., github.apis, workspace.editor_command)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Prompts own stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Select => {
            let mut orchestrator = build_orchestrator()?;
            report(orchestrator.select_project().await)?;
        }
        Commands::New => {
            let mut orchestrator = build_orchestrator()?;
            report(orchestrator.new_project().await)?;
        }
        Commands::OpenPage { dir, file, line } => {
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let mut orchestrator = build_orchestrator()?;
            let url = orchestrator
                .open_web_page(&dir, file.as_deref(), line)
                .await?;
            println!("{}", url);
        }
        Commands::Colors(cmd) => {
            run_colors_command(cmd)?;
        }
        Commands::Config(cmd) => {
            run_config_command(cmd)?;
        }
    }

    Ok(())
}

fn build_orchestrator() -> Result<CliOrchestrator> {
    let config = Config::load()?;
    config.validate()?;

    let credentials = Credentials::load(&config.credentials_path())?;
    let client = GitHubClient::new(credentials, config.github.per_page);
    let launcher = SystemLauncher::new(config.workspace.editor_command.clone());

    Ok(Orchestrator::new(
        config,
        client,
        TerminalPrompter::new(),
        launcher,
    ))
}

fn report(result: Result<PathBuf, WorkflowError>) -> Result<()> {
    match result {
        Ok(path) => {
            println!("Opened {}", path.display());
            Ok(())
        }
        Err(WorkflowError::Cancelled) => {
            info!("Cancelled");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_colors_command(cmd: ColorCommands) -> Result<()> {
    let config = Config::load()?;
    let (registry, _) = ColorRegistry::with_custom(&config.colors.custom);

    match cmd {
        ColorCommands::List { project: None } => {
            for name in registry.names(Partition::All).iter() {
                println!("{}", name);
            }
        }
        ColorCommands::List {
            project: Some(project),
        } => {
            let list = build_selection_list(&project, &registry);
            for entry in list.entries() {
                match entry {
                    SelectionEntry::Separator(label) => println!("-- {} --", label),
                    SelectionEntry::Item { label, .. } => match entry.description() {
                        Some(description) => println!("  {} {}", label, description),
                        None => println!("  {}", label),
                    },
                }
            }
        }
        ColorCommands::Default { project } => match default_theme(&project, &registry) {
            Some(name) => println!("{}", name),
            None => println!("No color themes available"),
        },
        ColorCommands::Show { theme } => {
            let record = registry.resolve(&theme)?;
            let styles = ThemeApplier::new(config.colors.activity_bar).to_style_map(&record);
            println!("{}", serde_json::to_string_pretty(&styles)?);
        }
    }
    Ok(())
}

fn run_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            config_init(force)?;
        }
        ConfigCommands::Show { section } => {
            config_show(section)?;
        }
        ConfigCommands::Set { key, value } => {
            config_set(&key, &value)?;
        }
        ConfigCommands::Path => {
            config_path();
        }
        ConfigCommands::Validate => {
            config_validate()?;
        }
    }
    Ok(())
}

fn config_init(force: bool) -> Result<()> {
    let path = Config::default_path();

    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::example())?;

    println!("Configuration file created at: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Add GitHub tokens to {}", Config::default().credentials_path().display());
    println!("     as a JSON object of host -> token, or");
    println!("  2. Set the environment variable:");
    println!("     export GITHUB_TOKEN=your_token");

    Ok(())
}

fn config_show(section: Option<String>) -> Result<()> {
    let config = Config::load()?;

    let display = if let Some(sec) = section {
        match sec.to_lowercase().as_str() {
            "github" => toml::to_string_pretty(&config.github)?,
            "projects" => toml::to_string_pretty(&config.projects)?,
            "workspace" => toml::to_string_pretty(&config.workspace)?,
            "colors" => toml::to_string_pretty(&config.colors)?,
            _ => {
                println!("Unknown section: {}", sec);
                println!("Available: github, projects, workspace, colors");
                return Ok(());
            }
        }
    } else {
        toml::to_string_pretty(&config)?
    };

    println!("{}", display);

    println!("\n--- Environment Variables ---");
    for name in [
        "PROJECTS_GITHUB_APIS",
        "PROJECTS_ROOT",
        "PROJECTS_WORKSPACE_DIR",
        "PROJECTS_EDITOR",
    ] {
        println!(
            "{}: {}",
            name,
            std::env::var(name).unwrap_or_else(|_| "not set".to_string())
        );
    }
    println!(
        "GITHUB_TOKEN: {}",
        if std::env::var("GITHUB_TOKEN").is_ok() { "set" } else { "not set" }
    );

    Ok(())
}

fn config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    let Some((section, field)) = key.split_once('.') else {
        println!("Invalid key format. Use: section.key (e.g., workspace.editor_command)");
        return Ok(());
    };

    match section {
        "github" => match field {
            "apis" => {
                config.github.apis = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "credentials_file" => config.github.credentials_file = Some(PathBuf::from(value)),
            "per_page" => config.github.per_page = value.parse()?,
            "private" => config.github.private = value.parse()?,
            _ => {
                println!("Unknown github field: {}", field);
                println!("Available: apis, credentials_file, per_page, private");
                return Ok(());
            }
        },
        "projects" => match field {
            "root_locations" => {
                config.projects.root_locations = std::env::split_paths(value).collect()
            }
            _ => {
                println!("Unknown projects field: {}", field);
                println!("Available: root_locations");
                return Ok(());
            }
        },
        "workspace" => match field {
            "files_location" => config.workspace.files_location = Some(PathBuf::from(value)),
            "editor_command" => config.workspace.editor_command = value.to_string(),
            _ => {
                println!("Unknown workspace field: {}", field);
                println!("Available: files_location, editor_command");
                return Ok(());
            }
        },
        "colors" => match field {
            "activity_bar" => config.colors.activity_bar = value.parse()?,
            _ => {
                println!("Unknown colors field: {}", field);
                println!("Available: activity_bar (custom themes are edited in the file)");
                return Ok(());
            }
        },
        _ => {
            println!("Unknown section: {}", section);
            println!("Available: github, projects, workspace, colors");
            return Ok(());
        }
    }

    config.validate()?;
    config.save()?;
    println!("Set {} = {}", key, value);

    Ok(())
}

fn config_path() {
    let path = Config::default_path();
    println!("{}", path.display());

    if path.exists() {
        println!("(file exists)");
    } else {
        println!("(file does not exist - run 'config init' to create)");
    }
}

fn config_validate() -> Result<()> {
    let config = Config::load()?;

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid!");
            println!();

            println!("GitHub hosts:");
            for api in &config.github.apis {
                println!("  {}", api);
            }

            println!("Project roots:");
            for root in config.root_locations() {
                println!("  {}", root.display());
            }

            println!("Workspace files: {}", config.workspace_dir().display());
            println!("Editor: {}", config.workspace.editor_command);

            let (registry, skipped) = ColorRegistry::with_custom(&config.colors.custom);
            println!(
                "Custom colors: {} loaded, {} skipped",
                registry.names(Partition::Custom).len(),
                skipped.len()
            );
            for e in skipped {
                println!("  {}", e);
            }
        }
        Err(e) => {
            println!("Configuration validation failed:");
            println!("  {}", e);
            println!();
            println!("To fix, edit {} or run:", Config::default_path().display());
            println!("  projects config set github.apis api.github.com");
        }
    }

    Ok(())
}
