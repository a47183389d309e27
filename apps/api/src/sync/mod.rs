//! Portfolio synchronization job (`persona-api sync`).
//!
//! Flow: fetch all repositories → keep those created or updated on/after the cutoff →
//!       map to `Project` → sort by (stars, last update) descending → write snapshot.
//!
//! Manually triggered batch job; never on the request path.

use std::path::Path;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::models::profile::{ProfileSnapshot, Project};
use crate::profile::save_snapshot;

pub mod github;

pub use github::{GitHubClient, RawRepo};

/// Repositories neither created nor updated since this date are dropped.
pub const CUTOFF_DATE: (i32, u32, u32) = (2025, 1, 1);
const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to write snapshot: {0}")]
    Write(#[from] anyhow::Error),
}

pub fn cutoff_date() -> NaiveDate {
    let (y, m, d) = CUTOFF_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// True when the repository was created or updated on/after `cutoff`.
pub fn qualifies(repo: &RawRepo, cutoff: NaiveDate) -> bool {
    repo.updated_at.date_naive() >= cutoff || repo.created_at.date_naive() >= cutoff
}

pub fn to_project(repo: RawRepo) -> Project {
    Project {
        name: repo.name,
        description: repo
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        url: repo.html_url,
        stars: repo.stargazers_count,
        language: repo.language,
        topics: repo.topics,
        last_update: repo.updated_at.date_naive(),
        is_fork: repo.fork,
    }
}

/// Filters, maps and orders raw repositories into a snapshot.
/// Ordering is descending by (stars, last_update); ties keep upstream order.
pub fn process(raw: Vec<RawRepo>, cutoff: NaiveDate, generated_at: String) -> ProfileSnapshot {
    let mut projects: Vec<Project> = raw
        .into_iter()
        .filter(|repo| qualifies(repo, cutoff))
        .map(to_project)
        .collect();

    projects.sort_by(|a, b| (b.stars, b.last_update).cmp(&(a.stars, a.last_update)));

    ProfileSnapshot::new(generated_at, projects)
}

/// Runs the full job and writes the snapshot to `path`.
/// On any fetch failure nothing is written and the existing snapshot is kept.
pub async fn run(client: &GitHubClient, path: &Path) -> Result<ProfileSnapshot, SyncError> {
    let raw = client.fetch_repos().await.map_err(|e| {
        error!("Error fetching repositories, snapshot left untouched: {e}");
        e
    })?;

    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();
    let snapshot = process(raw, cutoff_date(), generated_at);
    info!(
        "{} projects qualify since {}",
        snapshot.total_projects,
        cutoff_date()
    );

    save_snapshot(path, &snapshot).await?;
    Ok(snapshot)
}

/// Entry point for the `sync` subcommand.
pub async fn run_from_config(config: &Config) -> Result<ProfileSnapshot, SyncError> {
    let client = GitHubClient::new(config.github_username.clone(), config.github_token.clone());
    run(&client, &config.snapshot_path()).await
}
