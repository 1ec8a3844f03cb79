//! Per-host API tokens

use super::GitHubError;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Tokens keyed by API host, read from a JSON object file
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    tokens: HashMap<String, String>,
    fallback: Option<String>,
}

impl Credentials {
    /// Read the credentials file; a missing file yields no tokens.
    ///
    /// `GITHUB_TOKEN` is used for hosts without an entry.
    pub fn load(path: &Path) -> Result<Self, GitHubError> {
        let tokens = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| GitHubError::Credentials(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str(&content)
                .map_err(|e| GitHubError::Credentials(format!("{}: {}", path.display(), e)))?
        } else {
            debug!("No credentials file at {}", path.display());
            HashMap::new()
        };

        Ok(Self {
            tokens,
            fallback: std::env::var("GITHUB_TOKEN").ok(),
        })
    }

    pub fn from_tokens(tokens: HashMap<String, String>) -> Self {
        Self {
            tokens,
            fallback: None,
        }
    }

    pub fn token(&self, host: &str) -> Option<&str> {
        self.tokens
            .get(host)
            .or(self.fallback.as_ref())
            .map(String::as_str)
    }
}
