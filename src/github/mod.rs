//! Remote repository access for GitHub-compatible hosting APIs

mod client;
mod credentials;

pub use client::GitHubClient;
pub use credentials::Credentials;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API host '{0}'")]
    InvalidHost(String),

    #[error("Authentication failed for {host}: {message}")]
    Auth { host: String, message: String },

    #[error("{host} returned {status}: {body}")]
    Status {
        host: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {host}: {message}")]
    UnexpectedResponse { host: String, message: String },

    #[error("Failed to read credentials: {0}")]
    Credentials(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A remote repository as reported by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub full_name: String,
    pub ssh_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    pub owner: Owner,
}

/// Parameters for creating a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepo {
    pub name: String,
    pub private: bool,
    /// Repository whose contents seed the new one
    pub template: Option<Repo>,
}

/// A hosting service that can list and create repositories
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Every repository visible to the authenticated user on `host`
    async fn list_repos(&self, host: &str) -> Result<Vec<Repo>, GitHubError>;

    async fn create_repo(&self, host: &str, repo: &NewRepo) -> Result<Repo, GitHubError>;
}

/// List repositories from every host concurrently, keyed by `full_name`.
///
/// A host that fails is logged and left out.
pub async fn list_all_repos<H: RepositoryHost + ?Sized>(
    host_client: &H,
    hosts: &[String],
) -> BTreeMap<String, Repo> {
    let results = join_all(hosts.iter().map(|host| host_client.list_repos(host))).await;

    let mut repos = BTreeMap::new();
    for (host, result) in hosts.iter().zip(results) {
        match result {
            Ok(list) => {
                info!("{} repositories from {}", list.len(), host);
                repos.extend(list.into_iter().map(|r| (r.full_name.clone(), r)));
            }
            Err(e) => warn!("Skipping {}: {}", host, e),
        }
    }
    repos
}
