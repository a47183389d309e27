// Persona compilation: turns the candidate identity, the resume and the portfolio
// snapshot into model instructions. Pure string assembly, no model calls here.

pub mod builder;
pub mod candidate;
pub mod directives;
pub mod prompts;

pub use builder::{compile_system_instruction, compile_turn_directive, compose_turn_prompt};
pub use candidate::CandidateProfile;
pub use directives::{Mode, Seniority};
