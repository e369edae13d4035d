use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

const GITHUB_API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = "snackpub";
const ACCEPT: &str = "application/vnd.github+json";

/// Minimal client for the GitHub Contents and Git Data endpoints, scoped to
/// one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    owner: String,
    repo: String,
}

// ── Response types (subset of fields we care about) ──────────────────

/// Response from `GET /repos/{owner}/{repo}/git/ref/{ref}`.
#[derive(Debug, Deserialize)]
pub struct GitRef {
    pub object: GitRefObject,
}

#[derive(Debug, Deserialize)]
pub struct GitRefObject {
    pub sha: String,
}

/// Response from the contents endpoint. `content` is base64 with embedded
/// newlines, exactly as GitHub returns it.
#[derive(Debug, Deserialize)]
pub struct ContentFile {
    pub content: String,
    pub encoding: String,
}

impl ContentFile {
    /// Decode the base64 payload into UTF-8 text.
    pub fn decoded(&self) -> Result<String> {
        let compact: String = self.content.split_whitespace().collect();
        let bytes = BASE64
            .decode(compact.as_bytes())
            .context("Failed to decode file content as base64")?;
        String::from_utf8(bytes).context("File content is not valid UTF-8")
    }
}

#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitResponse {
    pub sha: String,
}

// ── Request types ────────────────────────────────────────────────────

/// One file in a tree creation request.
#[derive(Debug, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
}

impl TreeEntry {
    /// A regular (non-executable) file blob with inline content.
    pub fn blob(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644",
            kind: "blob",
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateTreeRequest {
    base_tree: String,
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Serialize)]
struct CreateCommitRequest {
    message: String,
    tree: String,
    parents: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UpdateRefRequest {
    sha: String,
    force: bool,
}

// ── Client ───────────────────────────────────────────────────────────

impl GitHubClient {
    pub fn new(token: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            GITHUB_API_ROOT, self.owner, self.repo, tail
        )
    }

    /// Resolve the current tip of a branch.
    pub async fn get_ref(&self, branch: &str) -> Result<GitRef> {
        self.http
            .get(self.url(&format!("git/ref/heads/{}", branch)))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .send()
            .await
            .context("Failed to send ref request to GitHub")?
            .error_for_status()
            .context("GitHub ref endpoint returned error status")?
            .json()
            .await
            .context("Failed to parse ref response from GitHub")
    }

    /// Fetch the current contents of a file on the default ref.
    pub async fn get_contents(&self, path: &str) -> Result<ContentFile> {
        self.http
            .get(self.url(&format!("contents/{}", path)))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .send()
            .await
            .context("Failed to send contents request to GitHub")?
            .error_for_status()
            .context("GitHub contents endpoint returned error status")?
            .json()
            .await
            .context("Failed to parse contents response from GitHub")
    }

    /// Create a tree on top of `base_tree` containing `entries`.
    pub async fn create_tree(&self, base_tree: &str, entries: Vec<TreeEntry>) -> Result<TreeResponse> {
        self.http
            .post(self.url("git/trees"))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .json(&CreateTreeRequest {
                base_tree: base_tree.to_string(),
                tree: entries,
            })
            .send()
            .await
            .context("Failed to send tree request to GitHub")?
            .error_for_status()
            .context("GitHub tree endpoint returned error status")?
            .json()
            .await
            .context("Failed to parse tree response from GitHub")
    }

    /// Create a commit pointing at `tree` with a single parent.
    pub async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parent: &str,
    ) -> Result<CommitResponse> {
        self.http
            .post(self.url("git/commits"))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .json(&CreateCommitRequest {
                message: message.to_string(),
                tree: tree.to_string(),
                parents: vec![parent.to_string()],
            })
            .send()
            .await
            .context("Failed to send commit request to GitHub")?
            .error_for_status()
            .context("GitHub commit endpoint returned error status")?
            .json()
            .await
            .context("Failed to parse commit response from GitHub")
    }

    /// Force-move a branch ref to `sha`. Last write wins.
    pub async fn update_ref(&self, branch: &str, sha: &str) -> Result<()> {
        self.http
            .patch(self.url(&format!("git/refs/heads/{}", branch)))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .json(&UpdateRefRequest {
                sha: sha.to_string(),
                force: true,
            })
            .send()
            .await
            .context("Failed to send ref update to GitHub")?
            .error_for_status()
            .context("GitHub ref update returned error status")?;
        Ok(())
    }
}
