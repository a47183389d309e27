//! Axum route handler for hiring report generation.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::conversation::Turn;
use crate::state::AppState;

pub const REPORT_FILENAME: &str = "hiring_report.pdf";

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub chat_history: Vec<Turn>,
}

/// POST /api/generate-report
///
/// Renders the supplied transcript, or the server-side session transcript when
/// the request carries none. Returns the PDF as an attachment; failures are JSON
/// errors, never a partial document.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Response, AppError> {
    let transcript = if request.chat_history.is_empty() {
        state.agent.transcript().await
    } else {
        request.chat_history
    };

    if transcript.is_empty() {
        return Err(AppError::Validation(
            "chat_history cannot be empty".to_string(),
        ));
    }

    info!("Generating hiring report from {} turns", transcript.len());
    let pdf = state.reports.generate_hiring_report(&transcript).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
