pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::agent::handlers::handle_chat;
use crate::report::handlers::handle_generate_report;
use crate::speech::handlers::handle_tts;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let frontend = ServeDir::new(&state.config.frontend_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/chat", post(handle_chat))
        .route("/api/generate-report", post(handle_generate_report))
        .route("/api/tts", post(handle_tts))
        // Static chat frontend; API routes take precedence.
        .fallback_service(frontend)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::agent::testing::StubBackend;
    use crate::agent::{Agent, NOT_INITIALIZED};
    use crate::config::Config;
    use crate::llm_client::{ModelBackend, DEFAULT_MODEL};
    use crate::models::profile::ProfileSnapshot;
    use crate::persona::CandidateProfile;
    use crate::profile::ResumeText;
    use crate::report::ReportCompiler;
    use crate::speech::SpeechClient;

    const REPORT_JSON: &str = r#"{
        "candidate_name": "Veronika Kashtanova",
        "role": "Senior AI Engineer & Founder",
        "session_id": "AUTO-GEN-101010",
        "executive_summary": "Solid.",
        "top_skills": [{"name": "Rust", "evidence": "Shipped a service"}],
        "communication_style": "Clear.",
        "verdict": "HIRE"
    }"#;

    fn test_config(frontend_dir: PathBuf) -> Config {
        Config {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            github_username: "vero-code".to_string(),
            github_token: None,
            tts_api_key: None,
            data_dir: PathBuf::from("backend/data"),
            frontend_dir,
            candidate: CandidateProfile::default(),
            port: 8000,
            rust_log: "info".to_string(),
        }
    }

    fn state(backend: Option<Arc<dyn ModelBackend>>) -> AppState {
        let resume = ResumeText::new("resume text");
        AppState {
            agent: Arc::new(Agent::new(
                backend.clone(),
                CandidateProfile::default(),
                &resume,
                Arc::new(ProfileSnapshot::empty()),
            )),
            reports: Arc::new(ReportCompiler::new(
                backend,
                CandidateProfile::default(),
                resume,
            )),
            speech: SpeechClient::new(None),
            config: test_config(PathBuf::from("frontend-does-not-exist")),
        }
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(state(None));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "persona-api");
        assert_eq!(body["agent_ready"], false);
    }

    #[tokio::test]
    async fn test_chat_without_credential_returns_placeholder_with_200() {
        let app = build_router(state(None));
        let response = app
            .oneshot(post_json("/api/chat", json!({"message": "Hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["response"], NOT_INITIALIZED);
    }

    #[tokio::test]
    async fn test_chat_returns_model_reply_and_clamps_seniority() {
        let stub = Arc::new(StubBackend::with_replies(vec![Ok("Hello from the persona")]));
        let app = build_router(state(Some(stub.clone() as Arc<dyn ModelBackend>)));

        let response = app
            .oneshot(post_json(
                "/api/chat",
                json!({"message": "Hi", "mode": "tech_lead", "seniority": 9}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["response"], "Hello from the persona");

        let request = stub.last_request().unwrap();
        assert!((request.temperature - 0.25).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_chat_provider_failure_is_embedded_in_response() {
        let stub = Arc::new(StubBackend::with_replies(vec![Err("boom")]));
        let app = build_router(state(Some(stub as Arc<dyn ModelBackend>)));
        let response = app
            .oneshot(post_json("/api/chat", json!({"message": "Hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["response"].as_str().unwrap().starts_with("AI Error: "));
    }

    #[tokio::test]
    async fn test_report_with_empty_history_and_no_session_is_400() {
        let app = build_router(state(None));
        let response = app
            .oneshot(post_json("/api/generate-report", json!({"chat_history": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_without_credential_is_503() {
        let app = build_router(state(None));
        let response = app
            .oneshot(post_json(
                "/api/generate-report",
                json!({"chat_history": [{"role": "user", "content": "hi"}]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_report_returns_pdf_attachment() {
        let stub = Arc::new(StubBackend::with_replies(vec![Ok(REPORT_JSON)]));
        let app = build_router(state(Some(stub as Arc<dyn ModelBackend>)));
        let response = app
            .oneshot(post_json(
                "/api/generate-report",
                json!({"chat_history": [
                    {"role": "user", "content": "I know Rust"},
                    {"role": "model", "content": "Prove it"}
                ]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"hiring_report.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_report_malformed_output_is_502() {
        let stub = Arc::new(StubBackend::with_replies(vec![Ok("not json")]));
        let app = build_router(state(Some(stub as Arc<dyn ModelBackend>)));
        let response = app
            .oneshot(post_json(
                "/api/generate-report",
                json!({"chat_history": [{"role": "user", "content": "hi"}]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "MALFORMED_OUTPUT");
    }

    #[tokio::test]
    async fn test_tts_empty_text_is_400() {
        let app = build_router(state(None));
        let response = app
            .oneshot(post_json("/api/tts", json!({"text": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tts_without_credential_is_503() {
        let app = build_router(state(None));
        let response = app
            .oneshot(post_json("/api/tts", json!({"text": "Hello"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_static_frontend_is_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>persona</h1>").unwrap();

        let mut state = state(None);
        state.config = test_config(dir.path().to_path_buf());
        let app = build_router(state);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>persona</h1>");
    }
}
