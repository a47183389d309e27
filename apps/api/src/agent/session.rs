use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::agent::AgentError;
use crate::llm_client::{GenerationRequest, ModelBackend};
use crate::models::conversation::Turn;
use crate::models::profile::ProfileSnapshot;
use crate::persona::{compile_turn_directive, compose_turn_prompt, CandidateProfile, Mode, Seniority};

/// The single conversation handle of the process.
///
/// The system instruction is fixed at construction; mode, seniority and temperature
/// are applied per turn. The transcript keeps the plain user messages so per-turn
/// directives never pile up in the context.
pub struct ChatSession {
    backend: Arc<dyn ModelBackend>,
    system_instruction: String,
    candidate: CandidateProfile,
    snapshot: Arc<ProfileSnapshot>,
    history: Mutex<Vec<Turn>>,
}

impl ChatSession {
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        system_instruction: String,
        candidate: CandidateProfile,
        snapshot: Arc<ProfileSnapshot>,
    ) -> Self {
        Self {
            backend,
            system_instruction,
            candidate,
            snapshot,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Sends one turn. The history lock is held for the whole call so concurrent
    /// callers are serialised instead of interleaving half-written turns.
    pub async fn ask(
        &self,
        message: &str,
        mode: Mode,
        seniority: Seniority,
    ) -> Result<String, AgentError> {
        let directive = compile_turn_directive(&self.candidate, &self.snapshot, mode, seniority);
        let prompt = compose_turn_prompt(&directive, message);

        let mut history = self.history.lock().await;

        let mut contents = history.clone();
        contents.push(Turn::user(prompt));

        let request = GenerationRequest {
            system_instruction: Some(self.system_instruction.clone()),
            contents,
            temperature: seniority.temperature(),
            json_output: false,
        };

        match self.backend.generate(&request).await {
            Ok(reply) => {
                history.push(Turn::user(message));
                history.push(Turn::model(reply.clone()));
                info!(
                    "Chat turn completed (mode={:?}, seniority={}, turns={})",
                    mode,
                    seniority.level(),
                    history.len()
                );
                Ok(reply)
            }
            Err(e) => {
                warn!("Chat turn failed: {e}");
                Err(AgentError::Transport(e.to_string()))
            }
        }
    }

    pub async fn transcript(&self) -> Vec<Turn> {
        self.history.lock().await.clone()
    }
}
