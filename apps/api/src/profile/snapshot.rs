use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::profile::ProfileSnapshot;

/// Reads the portfolio snapshot. Never fails: a missing or malformed file
/// degrades to `ProfileSnapshot::empty()` so the persona always has data to render.
pub async fn load_snapshot(path: &Path) -> ProfileSnapshot {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Profile data not found at {}. Run `persona-api sync` first.",
                path.display()
            );
            return ProfileSnapshot::empty();
        }
        Err(e) => {
            warn!("Failed to read profile data {}: {e}", path.display());
            return ProfileSnapshot::empty();
        }
    };

    match serde_json::from_str::<ProfileSnapshot>(&raw) {
        Ok(snapshot) => {
            info!(
                "Loaded {} portfolio projects from {}",
                snapshot.projects.len(),
                path.display()
            );
            snapshot
        }
        Err(e) => {
            warn!("Profile data at {} is malformed: {e}", path.display());
            ProfileSnapshot::empty()
        }
    }
}

/// Writes the snapshot as pretty JSON, creating parent directories as needed.
pub async fn save_snapshot(path: &Path, snapshot: &ProfileSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        "Profile saved to {} ({} projects)",
        path.display(),
        snapshot.total_projects
    );
    Ok(())
}
