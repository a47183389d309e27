// Profile loading: the portfolio snapshot (JSON) and the resume (PDF).
// Both loaders degrade to placeholders instead of failing startup.

pub mod resume;
pub mod snapshot;

pub use resume::{load_resume_text, ResumeText};
pub use snapshot::{load_snapshot, save_snapshot};
