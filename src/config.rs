use anyhow::{Context, Result};

/// Runtime configuration for the snackpub service.
///
/// Everything is read once at startup and injected into the server state;
/// business logic never touches process environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret expected in the webhook `secret` query parameter.
    pub secret: String,
    pub github: GitHubConfig,
}

/// Target repository coordinates and credential for publishing.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Path of the homepage index fragment the new list item is prepended to.
    pub index_path: String,
}

const DEFAULT_BRANCH: &str = "master";
const DEFAULT_INDEX_PATH: &str = "_imports/reviews.html";

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = get("SNACKPUB_SECRET").context("SNACKPUB_SECRET must be set")?;
        let token = get("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?;
        let owner = get("SNACKPUB_OWNER").context("SNACKPUB_OWNER must be set")?;
        let repo = get("SNACKPUB_REPO").context("SNACKPUB_REPO must be set")?;
        let branch = get("SNACKPUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let index_path = get("SNACKPUB_INDEX_PATH").unwrap_or_else(|| DEFAULT_INDEX_PATH.to_string());

        Ok(Self {
            secret,
            github: GitHubConfig {
                token,
                owner,
                repo,
                branch,
                index_path,
            },
        })
    }
}
