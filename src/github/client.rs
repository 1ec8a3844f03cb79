//! HTTP client for the GitHub REST API (github.com and Enterprise hosts)

use super::{Credentials, GitHubError, NewRepo, Repo, RepositoryHost};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

const AGENT: &str = concat!("projects-cli/", env!("CARGO_PKG_VERSION"));

/// GitHub API client authenticating with per-host tokens
pub struct GitHubClient {
    client: Client,
    credentials: Credentials,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(credentials: Credentials, per_page: u32) -> Self {
        Self {
            client: Client::new(),
            credentials,
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Build an API URL from a configured host.
    ///
    /// The host may carry a path prefix (`github.example.com/api/v3`) and
    /// defaults to HTTPS when no scheme is given.
    pub fn api_url(host: &str, path: &str) -> Result<Url, GitHubError> {
        let (scheme, rest) = match host.split_once("://") {
            Some((scheme, rest)) => (scheme, rest),
            None => ("https", host),
        };
        let (hostname, prefix) = match rest.split_once('/') {
            Some((hostname, prefix)) => (hostname, prefix.trim_matches('/')),
            None => (rest, ""),
        };
        if hostname.is_empty() {
            return Err(GitHubError::InvalidHost(host.to_string()));
        }

        let base = if prefix.is_empty() {
            format!("{}://{}", scheme, hostname)
        } else {
            format!("{}://{}/{}", scheme, hostname, prefix)
        };
        Url::parse(&format!("{}{}", base, path))
            .map_err(|_| GitHubError::InvalidHost(host.to_string()))
    }

    fn request(&self, method: Method, host: &str, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = self.credentials.token(host) {
            builder = builder.header(AUTHORIZATION, format!("token {}", token));
        }
        builder
    }

    async fn check(host: &str, response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GitHubError::Auth {
                host: host.to_string(),
                message: body,
            });
        }
        Err(GitHubError::Status {
            host: host.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    fn page_url(&self, host: &str, page: u32) -> Result<Url, GitHubError> {
        let mut url = Self::api_url(host, "/user/repos")?;
        url.query_pairs_mut()
            .append_pair("visibility", "all")
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn list_repos(&self, host: &str) -> Result<Vec<Repo>, GitHubError> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let url = self.page_url(host, page)?;
            debug!("GET {}", url);

            let response = self.request(Method::GET, host, url).send().await?;
            let batch: Vec<Repo> = Self::check(host, response).await?.json().await?;

            let last_page = batch.len() < self.per_page as usize;
            repos.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }

    async fn create_repo(&self, host: &str, repo: &NewRepo) -> Result<Repo, GitHubError> {
        let path = match &repo.template {
            Some(template) => format!("/repos/{}/generate", template.full_name),
            None => "/user/repos".to_string(),
        };
        let url = Self::api_url(host, &path)?;
        let body = json!({
            "name": repo.name,
            "private": repo.private,
        });
        debug!("POST {}", url);

        let response = self
            .request(Method::POST, host, url)
            .json(&body)
            .send()
            .await?;
        let value: Value = Self::check(host, response).await?.json().await?;

        if value.get("ssh_url").and_then(Value::as_str).is_none() {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("missing ssh_url")
                .to_string();
            return Err(GitHubError::UnexpectedResponse {
                host: host.to_string(),
                message,
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}
