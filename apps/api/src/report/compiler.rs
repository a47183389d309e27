//! Report compiler — turns a chat transcript into a `HiringReport` and renders it.
//!
//! Flow: format transcript → build prompt (resume excerpt + JSON schema) →
//!       single non-conversational JSON call → parse → PDF.
//!
//! Never returns a partial document: every failure is a typed `ReportError`.

use std::sync::Arc;

use chrono::{Local, NaiveTime};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{parse_json_output, GenerationRequest, LlmError, ModelBackend};
use crate::models::conversation::Turn;
use crate::persona::CandidateProfile;
use crate::profile::ResumeText;
use crate::report::models::HiringReport;
use crate::report::pdf::PdfRenderer;
use crate::report::prompts::REPORT_PROMPT_TEMPLATE;

/// How much of the resume is embedded in the report prompt.
pub const RESUME_EXCERPT_CHARS: usize = 2000;
const REPORT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report generation is unavailable: no model credential configured")]
    Unavailable,

    #[error("Model call failed: {0}")]
    Transport(String),

    #[error("Model returned a malformed report: {0}")]
    Parse(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

impl From<LlmError> for ReportError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Parse(_) | LlmError::EmptyContent => ReportError::Parse(e.to_string()),
            other => ReportError::Transport(other.to_string()),
        }
    }
}

/// Everything a ready compiler needs besides the transcript.
pub struct ReportContext {
    pub backend: Arc<dyn ModelBackend>,
    pub candidate: CandidateProfile,
    pub resume: ResumeText,
    pub renderer: PdfRenderer,
}

pub enum ReportCompiler {
    Unavailable,
    Ready(ReportContext),
}

impl ReportCompiler {
    pub fn new(
        backend: Option<Arc<dyn ModelBackend>>,
        candidate: CandidateProfile,
        resume: ResumeText,
    ) -> Self {
        match backend {
            Some(backend) => ReportCompiler::Ready(ReportContext {
                backend,
                candidate,
                resume,
                renderer: PdfRenderer::new(),
            }),
            None => ReportCompiler::Unavailable,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ReportCompiler::Ready(_))
    }

    /// Asks the model for a structured evaluation of the transcript.
    pub async fn compile_report(&self, transcript: &[Turn]) -> Result<HiringReport, ReportError> {
        let ReportCompiler::Ready(ctx) = self else {
            return Err(ReportError::Unavailable);
        };

        let session_id = session_id(Local::now().time());
        let prompt = build_report_prompt(
            &ctx.candidate,
            ctx.resume.excerpt(RESUME_EXCERPT_CHARS),
            &format_transcript(transcript),
            &session_id,
        );

        let request = GenerationRequest {
            json_output: true,
            ..GenerationRequest::single(prompt, REPORT_TEMPERATURE)
        };

        let text = ctx.backend.generate(&request).await.map_err(|e| {
            warn!("Report generation call failed: {e}");
            ReportError::from(e)
        })?;

        let mut report: HiringReport = parse_json_output(&text).map_err(|e| {
            warn!("Report JSON could not be parsed: {e}");
            ReportError::from(e)
        })?;

        if report.session_id.trim().is_empty() {
            report.session_id = session_id;
        }
        if report.candidate_name.trim().is_empty() {
            report.candidate_name = ctx.candidate.name.clone();
        }
        if report.role.trim().is_empty() {
            report.role = ctx.candidate.title.clone();
        }

        info!(
            "Hiring report compiled: session={}, verdict={}, skills={}",
            report.session_id,
            report.verdict,
            report.top_skills.len()
        );
        Ok(report)
    }

    /// Compiles the report and renders it to PDF bytes.
    pub async fn generate_hiring_report(&self, transcript: &[Turn]) -> Result<Vec<u8>, ReportError> {
        let ReportCompiler::Ready(ctx) = self else {
            return Err(ReportError::Unavailable);
        };
        let report = self.compile_report(transcript).await?;

        let renderer = ctx.renderer.clone();
        let bytes =
            tokio::task::spawn_blocking(move || renderer.render(&report).map_err(|e| e.to_string()))
                .await
                .map_err(|e| ReportError::Render(e.to_string()))?
                .map_err(ReportError::Render)?;

        info!("Hiring report rendered ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

/// `USER: ...` / `MODEL: ...`, one turn per line.
pub fn format_transcript(transcript: &[Turn]) -> String {
    transcript
        .iter()
        .map(|turn| format!("{}: {}", turn.role.as_str().to_uppercase(), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `AUTO-GEN-HHMMSS` from the local wall clock.
pub fn session_id(time: NaiveTime) -> String {
    format!("AUTO-GEN-{}", time.format("%H%M%S"))
}

pub fn build_report_prompt(
    candidate: &CandidateProfile,
    resume_excerpt: &str,
    transcript: &str,
    session_id: &str,
) -> String {
    fill(
        REPORT_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("candidate_name", candidate.name.as_str()),
            ("role", candidate.title.as_str()),
            ("session_id", session_id),
            ("resume_excerpt", resume_excerpt),
            ("transcript", transcript),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::StubBackend;
    use crate::report::models::Verdict;

    const VALID_REPORT: &str = r#"{
        "candidate_name": "Veronika Kashtanova",
        "role": "Senior AI Engineer / Founder",
        "session_id": "AUTO-GEN-120000",
        "executive_summary": "Strong depth in ML systems.",
        "top_skills": [
            {"name": "PyTorch", "evidence": "Built a transformer from scratch"}
        ],
        "communication_style": "Direct and confident.",
        "verdict": "STRONG HIRE"
    }"#;

    fn transcript() -> Vec<Turn> {
        vec![
            Turn::user("Hi, I am an expert in Python and AI."),
            Turn::model("That is great. Can you prove it?"),
            Turn::user("I built a transformer from scratch using PyTorch."),
        ]
    }

    fn compiler(stub: Arc<StubBackend>, resume: &str) -> ReportCompiler {
        ReportCompiler::new(
            Some(stub as Arc<dyn ModelBackend>),
            CandidateProfile::default(),
            ResumeText::new(resume),
        )
    }

    #[test]
    fn test_format_transcript_uppercases_roles() {
        let formatted = format_transcript(&transcript());
        assert_eq!(
            formatted,
            "USER: Hi, I am an expert in Python and AI.\n\
             MODEL: That is great. Can you prove it?\n\
             USER: I built a transformer from scratch using PyTorch."
        );
    }

    #[test]
    fn test_session_id_format() {
        let time = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        assert_eq!(session_id(time), "AUTO-GEN-090507");
    }

    #[test]
    fn test_prompt_embeds_excerpt_transcript_and_schema() {
        let prompt = build_report_prompt(
            &CandidateProfile::default(),
            "RESUME-EXCERPT",
            "USER: hi",
            "AUTO-GEN-000000",
        );
        assert!(prompt.contains("RESUME-EXCERPT... (truncated)"));
        assert!(prompt.contains("INTERVIEW TRANSCRIPT:\nUSER: hi"));
        assert!(prompt.contains("\"session_id\": \"AUTO-GEN-000000\""));
        assert!(prompt.contains("\"role\": \"Senior AI Engineer & Founder\""));
        assert!(prompt.contains("JSON ONLY"));
        assert!(!prompt.contains("{transcript}"));
    }

    #[test]
    fn test_prompt_keeps_placeholder_text_from_resume() {
        let prompt = build_report_prompt(
            &CandidateProfile::default(),
            "see {transcript} and {session_id}",
            "USER: real transcript",
            "AUTO-GEN-000000",
        );
        assert!(prompt.contains("see {transcript} and {session_id}... (truncated)"));
        assert_eq!(prompt.matches("USER: real transcript").count(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_without_credential() {
        let compiler = ReportCompiler::new(None, CandidateProfile::default(), ResumeText::new(""));
        let result = compiler.generate_hiring_report(&transcript()).await;
        assert!(matches!(result, Err(ReportError::Unavailable)));
    }

    #[tokio::test]
    async fn test_generates_pdf_from_valid_json() {
        let stub = Arc::new(StubBackend::with_replies(vec![Ok(VALID_REPORT)]));
        let compiler = compiler(stub.clone(), "resume");

        let bytes = compiler.generate_hiring_report(&transcript()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let request = stub.last_request().unwrap();
        assert!(request.json_output);
        assert!(request.system_instruction.is_none());
        assert!((request.temperature - 0.3).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_resume_is_truncated_to_excerpt() {
        let stub = Arc::new(StubBackend::with_replies(vec![Ok(VALID_REPORT)]));
        let resume = format!("{}{}", "a".repeat(RESUME_EXCERPT_CHARS), "TAIL-MARKER");
        let compiler = compiler(stub.clone(), &resume);

        let report = compiler.compile_report(&transcript()).await.unwrap();
        assert_eq!(report.verdict, Verdict::StrongHire);

        let prompt = &stub.last_request().unwrap().contents[0].content;
        assert!(!prompt.contains("TAIL-MARKER"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let stub = Arc::new(StubBackend::with_replies(vec![Ok("Sure! Here is the report:")]));
        let result = compiler(stub, "").generate_hiring_report(&transcript()).await;
        assert!(matches!(result, Err(ReportError::Parse(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_is_transport_error() {
        let stub = Arc::new(StubBackend::with_replies(vec![Err("quota exceeded")]));
        let result = compiler(stub, "").generate_hiring_report(&transcript()).await;
        match result {
            Err(ReportError::Transport(detail)) => assert!(detail.contains("quota exceeded")),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_identity_fields_are_backfilled() {
        let reply = r#"{
            "executive_summary": "Solid.",
            "verdict": "HIRE"
        }"#;
        let stub = Arc::new(StubBackend::with_replies(vec![Ok(reply)]));
        let report = compiler(stub, "").compile_report(&transcript()).await.unwrap();
        let candidate = CandidateProfile::default();
        assert_eq!(report.candidate_name, candidate.name);
        assert_eq!(report.role, candidate.title);
        assert!(report.session_id.starts_with("AUTO-GEN-"));
        assert_eq!(report.verdict, Verdict::Hire);
    }

    #[tokio::test]
    async fn test_fenced_json_is_accepted_and_blank_session_filled() {
        let fenced = format!(
            "```json\n{}\n```",
            VALID_REPORT.replace("AUTO-GEN-120000", "")
        );
        let stub = Arc::new(StubBackend::with_replies(vec![Ok(fenced.as_str())]));
        let report = compiler(stub, "").compile_report(&transcript()).await.unwrap();
        assert!(report.session_id.starts_with("AUTO-GEN-"));
        assert_eq!(report.session_id.len(), "AUTO-GEN-".len() + 6);
    }
}
