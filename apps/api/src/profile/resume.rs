use std::fmt;
use std::path::Path;

use tracing::{info, warn};

/// Returned when the resume PDF does not exist.
pub const RESUME_NOT_FOUND: &str = "Resume not found.";
/// Returned when the resume PDF exists but cannot be read or extracted.
pub const RESUME_UNREADABLE: &str = "Error reading resume.";

/// Flattened resume text. Immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText(String);

impl ResumeText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters, cut on a char boundary.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ResumeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the resume text from a PDF. Never fails: every error degrades to a sentinel.
pub async fn load_resume_text(path: &Path) -> ResumeText {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Resume not found at {}", path.display());
            return ResumeText::new(RESUME_NOT_FOUND);
        }
        Err(e) => {
            warn!("Failed to read resume {}: {e}", path.display());
            return ResumeText::new(RESUME_UNREADABLE);
        }
    };

    // pdf-extract panics on some malformed documents; keep that inside the boundary.
    let extracted = tokio::task::spawn_blocking(move || {
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
    })
    .await;

    match extracted {
        Ok(Ok(Ok(text))) => {
            info!("Loaded resume text ({} chars)", text.chars().count());
            ResumeText::new(text)
        }
        Ok(Ok(Err(e))) => {
            warn!("Failed to extract resume text: {e}");
            ResumeText::new(RESUME_UNREADABLE)
        }
        Ok(Err(_)) | Err(_) => {
            warn!("Resume extraction aborted on a malformed document");
            ResumeText::new(RESUME_UNREADABLE)
        }
    }
}
