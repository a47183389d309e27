use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::persona::CandidateProfile;

const SNAPSHOT_FILE: &str = "dynamic_profile.json";
const RESUME_FILE: &str = "resume.pdf";

/// Application configuration loaded from environment variables.
/// Credentials are optional: a missing one disables the matching feature, not startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub github_username: String,
    pub github_token: Option<String>,
    pub tts_api_key: Option<String>,
    pub data_dir: PathBuf,
    pub frontend_dir: PathBuf,
    pub candidate: CandidateProfile,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = CandidateProfile::default();

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            github_username: env_or("GITHUB_USERNAME", "vero-code"),
            github_token: optional_env("GITHUB_TOKEN"),
            tts_api_key: optional_env("GOOGLE_TTS_API_KEY"),
            data_dir: PathBuf::from(env_or("DATA_DIR", "backend/data")),
            frontend_dir: PathBuf::from(env_or("FRONTEND_DIR", "frontend")),
            candidate: CandidateProfile {
                name: env_or("CANDIDATE_NAME", &defaults.name),
                title: env_or("CANDIDATE_TITLE", &defaults.title),
                location: env_or("CANDIDATE_LOCATION", &defaults.location),
                contact: env_or("CANDIDATE_CONTACT", &defaults.contact),
                availability: env_or("CANDIDATE_AVAILABILITY", &defaults.availability),
                pronoun: optional_env("CANDIDATE_PRONOUN"),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    pub fn resume_path(&self) -> PathBuf {
        self.data_dir.join(RESUME_FILE)
    }
}

/// Unset and blank values both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_join_data_dir() {
        let config = Config {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            github_username: "vero-code".to_string(),
            github_token: None,
            tts_api_key: None,
            data_dir: PathBuf::from("backend/data"),
            frontend_dir: PathBuf::from("frontend"),
            candidate: CandidateProfile::default(),
            port: 8000,
            rust_log: "info".to_string(),
        };
        assert_eq!(
            config.snapshot_path(),
            PathBuf::from("backend/data/dynamic_profile.json")
        );
        assert_eq!(config.resume_path(), PathBuf::from("backend/data/resume.pdf"));
    }

    #[test]
    fn test_blank_env_counts_as_absent() {
        std::env::set_var("PERSONA_TEST_BLANK_VAR", "   ");
        assert_eq!(optional_env("PERSONA_TEST_BLANK_VAR"), None);
        assert_eq!(env_or("PERSONA_TEST_BLANK_VAR", "fallback"), "fallback");
        std::env::remove_var("PERSONA_TEST_BLANK_VAR");
    }
}
