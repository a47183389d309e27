//! Axum route handler for the chat endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::persona::{Mode, Seniority};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub seniority: Seniority,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat
///
/// Always answers 200 with `{response}`. When the agent is unavailable or the
/// provider fails, the response carries the user-facing error string instead of
/// a model reply so the chat widget can render it inline.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let response = match state
        .agent
        .ask(&request.message, request.mode, request.seniority)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Chat turn failed: {e}");
            e.user_message()
        }
    };

    Json(ChatResponse { response })
}
