use std::sync::Arc;

use crate::agent::Agent;
use crate::config::Config;
use crate::report::ReportCompiler;
use crate::speech::SpeechClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single process-wide chat session. Turns are serialised inside.
    pub agent: Arc<Agent>,
    pub reports: Arc<ReportCompiler>,
    pub speech: SpeechClient,
    pub config: Config,
}
