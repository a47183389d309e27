use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How many project names the per-turn hint lists before summarising the rest.
pub const PROJECT_HINT_LIMIT: usize = 10;

/// One repository that passed the sync cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: String,
    pub stars: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Serialized as `YYYY-MM-DD`.
    pub last_update: NaiveDate,
    pub is_fork: bool,
}

/// The portfolio snapshot written by `sync` and read at startup.
/// Overwritten wholesale on every sync run; read-only while serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub generated_at: String,
    #[serde(rename = "total_projects_2025_2026", alias = "total_projects", default)]
    pub total_projects: usize,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ProfileSnapshot {
    pub fn new(generated_at: String, projects: Vec<Project>) -> Self {
        Self {
            generated_at,
            total_projects: projects.len(),
            projects,
        }
    }

    /// Placeholder used when no snapshot is available.
    pub fn empty() -> Self {
        Self::new(String::new(), Vec::new())
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    /// "Verified Projects in Portfolio: a, b... (and N more)."
    pub fn project_hint(&self, limit: usize) -> String {
        let names = self.project_names();
        let shown = names.iter().take(limit).copied().collect::<Vec<_>>().join(", ");
        let remaining = names.len().saturating_sub(limit);
        format!("Verified Projects in Portfolio: {shown}... (and {remaining} more).")
    }
}

impl Default for ProfileSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> Project {
        Project {
            name: name.to_string(),
            description: "No description provided.".to_string(),
            url: format!("https://github.com/example/{name}"),
            stars: 0,
            language: None,
            topics: vec![],
            last_update: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            is_fork: false,
        }
    }

    #[test]
    fn test_count_key_matches_snapshot_file() {
        let snapshot = ProfileSnapshot::new("now".to_string(), vec![project("a")]);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total_projects_2025_2026"], 1);
        assert_eq!(json["projects"][0]["last_update"], "2025-03-01");
    }

    #[test]
    fn test_minimal_placeholder_deserializes() {
        let snapshot: ProfileSnapshot = serde_json::from_str(r#"{"projects": []}"#).unwrap();
        assert_eq!(snapshot, ProfileSnapshot::empty());
    }

    #[test]
    fn test_project_hint_truncates_and_counts_rest() {
        let projects = (0..12).map(|i| project(&format!("p{i}"))).collect();
        let snapshot = ProfileSnapshot::new(String::new(), projects);
        let hint = snapshot.project_hint(PROJECT_HINT_LIMIT);
        assert!(hint.starts_with("Verified Projects in Portfolio: p0, p1"));
        assert!(hint.contains("p9..."));
        assert!(!hint.contains("p10"));
        assert!(hint.ends_with("(and 2 more)."));
    }

    #[test]
    fn test_project_hint_never_negative() {
        let snapshot = ProfileSnapshot::new(String::new(), vec![project("solo")]);
        assert!(snapshot
            .project_hint(PROJECT_HINT_LIMIT)
            .ends_with("(and 0 more)."));
    }
}
