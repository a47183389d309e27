// Hiring report generation: transcript → structured evaluation → PDF bytes.
// All LLM calls go through the ModelBackend seam.

pub mod compiler;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod prompts;

pub use compiler::{ReportCompiler, ReportError};
