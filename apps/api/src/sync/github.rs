//! GitHub repository listing client.
//!
//! Paginates `/users/{username}/repos` (100 per page) until an empty page.
//! Any transport or status failure aborts the whole fetch.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::sync::SyncError;

const GITHUB_API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: u32 = 100;

/// The subset of the GitHub repository payload the snapshot needs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub fork: bool,
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
    username: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(username: String, token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: GITHUB_API_BASE.to_string(),
            username,
            token,
        }
    }

    /// Points the client at another API host (GitHub Enterprise, local servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn repos_url(&self) -> String {
        format!("{}/users/{}/repos", self.base_url, self.username)
    }

    /// Fetches every repository of the user, one page at a time.
    pub async fn fetch_repos(&self) -> Result<Vec<RawRepo>, SyncError> {
        info!("Connecting to GitHub API for user: {}", self.username);
        let url = self.repos_url();
        let mut repos = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut request = self
                .client
                .get(&url)
                .header("Accept", "application/vnd.github+json")
                .query(&[
                    ("per_page", PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                    ("sort", "updated".to_string()),
                ]);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(SyncError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let batch: Vec<RawRepo> = response.json().await?;
            debug!("Page {page}: {} repositories", batch.len());
            if batch.is_empty() {
                break;
            }
            repos.extend(batch);
            page += 1;
        }

        info!("Fetched {} raw repositories", repos.len());
        Ok(repos)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test support
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;
    use serde_json::{json, Value};

    /// Serves `app` on an ephemeral local port and returns its base URL.
    pub async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A repository payload shaped like the GitHub listing API.
    pub fn repo_json(name: &str, stars: u32, updated: &str) -> Value {
        json!({
            "name": name,
            "description": format!("{name} description"),
            "html_url": format!("https://github.com/vero-code/{name}"),
            "stargazers_count": stars,
            "language": "Rust",
            "topics": [],
            "updated_at": format!("{updated}T10:00:00Z"),
            "created_at": "2024-01-01T00:00:00Z",
            "fork": false
        })
    }
}
