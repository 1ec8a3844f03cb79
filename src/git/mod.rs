//! Local checkouts: discovery, cloning and remote URL handling

use crate::github::Repo;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Unrecognized remote URL: {0}")]
    UnsupportedRemote(String),

    #[error("{0} is not inside the repository")]
    OutsideRepository(PathBuf),
}

async fn run(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    debug!("git {} (in {})", args.join(" "), dir.display());
    let output = Command::new("git").args(args).current_dir(dir).output().await?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Whether a `.git/config` body has a remote pointing at `repo`
fn config_mentions(config: &str, repo: &Repo) -> bool {
    let clone_url = repo.clone_url.as_deref();
    let clone_url_bare = clone_url.and_then(|u| u.strip_suffix(".git"));

    config
        .lines()
        .filter_map(|line| line.trim().strip_prefix("url"))
        .filter_map(|rest| rest.trim_start().strip_prefix('='))
        .map(str::trim)
        .any(|url| {
            url == repo.ssh_url || Some(url) == clone_url || Some(url) == clone_url_bare
        })
}

/// Find a checkout of `repo` among the non-hidden directories of `root`
pub fn find_local_checkout(root: &Path, repo: &Repo) -> Option<PathBuf> {
    debug!("Checking {} for a checkout of {}", root.display(), repo.full_name);

    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot scan {}: {}", root.display(), e);
            return None;
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .find(|dir| {
            std::fs::read_to_string(dir.join(".git").join("config"))
                .map(|config| config_mentions(&config, repo))
                .unwrap_or(false)
        })
}

/// Search every root in order
pub fn find_in_roots(roots: &[PathBuf], repo: &Repo) -> Option<PathBuf> {
    roots
        .iter()
        .find_map(|root| find_local_checkout(root, repo))
}

/// Clone `repo` over SSH into `<root>/<name>`
pub async fn clone(repo: &Repo, root: &Path) -> Result<PathBuf, GitError> {
    let checkout = root.join(&repo.name);
    info!("Cloning {} to {} ...", repo.ssh_url, checkout.display());

    tokio::fs::create_dir_all(root).await?;
    let target = checkout.to_string_lossy();
    run(root, &["clone", repo.ssh_url.as_str(), &*target]).await?;

    Ok(checkout)
}

/// URL of the `origin` remote
pub async fn remote_url(dir: &Path) -> Result<String, GitError> {
    run(dir, &["remote", "get-url", "origin"]).await
}

pub async fn current_branch(dir: &Path) -> Result<String, GitError> {
    run(dir, &["rev-parse", "--abbrev-ref", "HEAD"]).await
}

/// Top level directory of the repository containing `dir`
pub async fn toplevel(dir: &Path) -> Result<PathBuf, GitError> {
    run(dir, &["rev-parse", "--show-toplevel"])
        .await
        .map(PathBuf::from)
}

/// Browser URL for a clone URL.
///
/// Accepts scp-like (`git@host:owner/repo.git`), `ssh://` and `http(s)://`
/// remotes.
pub fn web_url(remote: &str) -> Result<String, GitError> {
    let remote = remote.trim();
    let unsupported = || GitError::UnsupportedRemote(remote.to_string());

    let (host, path) = if remote.contains("://") {
        let url = Url::parse(remote).map_err(|_| unsupported())?;
        let host = url.host_str().ok_or_else(unsupported)?;
        let host = match (url.scheme(), url.port()) {
            ("http" | "https", Some(port)) => format!("{}:{}", host, port),
            ("http" | "https" | "ssh" | "git", _) => host.to_string(),
            _ => return Err(unsupported()),
        };
        (host, url.path().to_string())
    } else {
        let (user_host, path) = remote.split_once(':').ok_or_else(unsupported)?;
        let host = user_host.rsplit('@').next().unwrap_or(user_host);
        (host.to_string(), path.to_string())
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if host.is_empty() || path.is_empty() {
        return Err(unsupported());
    }

    Ok(format!("https://{}/{}", host, path))
}

/// Link to a file on a branch, optionally anchored at a line
pub fn deep_link(web: &str, branch: &str, relative: &Path, line: Option<u32>) -> String {
    let path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let mut link = format!("{}/blob/{}/{}", web.trim_end_matches('/'), branch, path);
    if let Some(line) = line {
        link.push_str(&format!("#L{}", line));
    }
    link
}
