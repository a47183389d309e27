//! Conversation agent — the explicitly constructed service object behind `/api/chat`.
//!
//! Construction without a model credential yields `Agent::Unavailable`; every call on it
//! short-circuits without touching the network.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::ModelBackend;
use crate::models::conversation::Turn;
use crate::models::profile::ProfileSnapshot;
use crate::persona::{compile_system_instruction, CandidateProfile, Mode, Seniority};
use crate::profile::ResumeText;

pub mod handlers;
pub mod session;

pub use session::ChatSession;

/// Fixed reply when no model credential is configured.
pub const NOT_INITIALIZED: &str = "Agent is not initialized.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("{}", NOT_INITIALIZED)]
    Unavailable,

    /// Provider or transport failure; carries the underlying message.
    #[error("AI Error: {0}")]
    Transport(String),
}

impl AgentError {
    /// The string shown to the end user in place of a model reply.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub enum Agent {
    Unavailable,
    Ready(ChatSession),
}

impl Agent {
    /// Compiles the system instruction and opens the session, or records that the
    /// agent is unavailable when no backend was configured.
    pub fn new(
        backend: Option<Arc<dyn ModelBackend>>,
        candidate: CandidateProfile,
        resume: &ResumeText,
        snapshot: Arc<ProfileSnapshot>,
    ) -> Self {
        let Some(backend) = backend else {
            warn!("GEMINI_API_KEY is missing; chat agent is unavailable");
            return Agent::Unavailable;
        };

        let system_instruction = compile_system_instruction(&candidate, resume, &snapshot);
        info!(
            "Chat session created (system instruction: {} chars, {} projects)",
            system_instruction.chars().count(),
            snapshot.projects.len()
        );
        Agent::Ready(ChatSession::new(
            backend,
            system_instruction,
            candidate,
            snapshot,
        ))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Agent::Ready(_))
    }

    pub async fn ask(
        &self,
        message: &str,
        mode: Mode,
        seniority: Seniority,
    ) -> Result<String, AgentError> {
        match self {
            Agent::Unavailable => Err(AgentError::Unavailable),
            Agent::Ready(session) => session.ask(message, mode, seniority).await,
        }
    }

    pub async fn transcript(&self) -> Vec<Turn> {
        match self {
            Agent::Unavailable => Vec::new(),
            Agent::Ready(session) => session.transcript().await,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test support
// ────────────────────────────────────────────────────────────────────────────
