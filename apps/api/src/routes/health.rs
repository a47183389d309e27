use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which optional integrations are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "persona-api",
        "agent_ready": state.agent.is_ready(),
        "reports_ready": state.reports.is_ready(),
        "speech_ready": state.speech.is_ready(),
    }))
}
