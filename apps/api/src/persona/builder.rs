//! Persona compiler — composes the system instruction and the per-turn directive
//! from named sections, so the composition can be tested without calling the model.
//!
//! Two layers:
//! - `compile_system_instruction`: built once when the session is created
//!   (role, tone, both data sources, numbered rulebook).
//! - `compile_turn_directive`: rebuilt on every `ask` (identity, portfolio hint,
//!   mode preset, seniority directive, security override).

use crate::llm_client::prompts::{fill, NO_RECORD_ANSWER, SECURITY_CANARY};
use crate::models::profile::{ProfileSnapshot, PROJECT_HINT_LIMIT};
use crate::persona::candidate::CandidateProfile;
use crate::persona::directives::{Mode, Seniority};
use crate::persona::prompts::*;
use crate::profile::ResumeText;

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// How a section heading is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `ROLE:`
    Label,
    /// `[MODE: HR / COLLEAGUE]`
    Bracket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// A numbered rule. Each body line renders as a bullet under the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct PersonaBuilder {
    style: HeadingStyle,
    sections: Vec<Section>,
    rules: Vec<Rule>,
}

impl PersonaBuilder {
    pub fn new(style: HeadingStyle) -> Self {
        Self {
            style,
            sections: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: heading.into(),
            body: body.into(),
        });
        self
    }

    pub fn rule(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.rules.push(Rule {
            title: title.into(),
            body: body.into(),
        });
        self
    }

    #[cfg(test)]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn render(&self) -> String {
        let mut blocks: Vec<String> = self
            .sections
            .iter()
            .map(|s| format!("{}\n{}", self.render_heading(&s.heading), s.body.trim_end()))
            .collect();

        if !self.rules.is_empty() {
            let rules = self
                .rules
                .iter()
                .enumerate()
                .map(|(i, rule)| {
                    let bullets = rule
                        .body
                        .lines()
                        .filter(|l| !l.trim().is_empty())
                        .map(|l| format!("   - {}", l.trim()))
                        .collect::<Vec<_>>()
                        .join("\n");
                    format!("{}. {}:\n{}", i + 1, rule.title, bullets)
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            blocks.push(format!("{}\n{}", self.render_heading("INSTRUCTIONS"), rules));
        }

        blocks.join("\n\n")
    }

    fn render_heading(&self, heading: &str) -> String {
        match self.style {
            HeadingStyle::Label => format!("{heading}:"),
            HeadingStyle::Bracket => format!("[{heading}]"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compilers
// ────────────────────────────────────────────────────────────────────────────

/// Serialized portfolio block injected verbatim into the instruction.
fn portfolio_json(snapshot: &ProfileSnapshot) -> String {
    serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{\"projects\": []}".to_string())
}

/// Builds the layered system instruction set once at session creation.
pub fn system_instruction_builder(
    candidate: &CandidateProfile,
    resume: &ResumeText,
    snapshot: &ProfileSnapshot,
) -> PersonaBuilder {
    let name = candidate.name.as_str();
    let top = snapshot.projects.first();
    let example_project = top.map(|p| p.name.as_str()).unwrap_or("Stream Refinery");
    let example_language = top
        .and_then(|p| p.language.as_deref())
        .unwrap_or("Python");
    let project_count = snapshot.projects.len().to_string();

    PersonaBuilder::new(HeadingStyle::Label)
        .section(
            "ROLE",
            fill(
                ROLE_TEMPLATE,
                &[
                    ("name", name),
                    ("title", candidate.title.as_str()),
                    ("location", candidate.location.as_str()),
                ],
            ),
        )
        .section("TONE", fill(TONE, &[("name", name)]))
        .section(RESUME_HEADING, resume.as_str())
        .section(PORTFOLIO_HEADING, portfolio_json(snapshot))
        .rule(
            "PROOF OVER PROMISES (Skill Verification)",
            fill(
                RULE_PROOF,
                &[
                    ("example_project", example_project),
                    ("example_language", example_language),
                ],
            ),
        )
        .rule(
            "DATA SYNTHESIS (The \"Tell me about yourself\" Logic)",
            fill(RULE_SYNTHESIS, &[("project_count", project_count.as_str())]),
        )
        .rule(
            "REVERSE INTERVIEW STRATEGY (THE \"SENIOR\" TRAP)",
            fill(RULE_REVERSE_INTERVIEW, &[("name", name)]),
        )
        .rule("VISUALIZATION PROTOCOL (Mermaid.js)", RULE_VISUALIZATION)
        .rule(
            "PROMPT INJECTION DEFENSE",
            fill(RULE_INJECTION_DEFENSE, &[("canary", SECURITY_CANARY)]),
        )
        .rule(
            "SPECIFIC ANSWERS (Hardcoded Personal Details)",
            fill(
                RULE_SPECIFIC_ANSWERS,
                &[
                    ("contact", candidate.contact.as_str()),
                    ("availability", candidate.availability.as_str()),
                ],
            ),
        )
        .rule(
            "HONESTY PROTOCOL",
            fill(RULE_HONESTY, &[("no_record", NO_RECORD_ANSWER)]),
        )
}

pub fn compile_system_instruction(
    candidate: &CandidateProfile,
    resume: &ResumeText,
    snapshot: &ProfileSnapshot,
) -> String {
    system_instruction_builder(candidate, resume, snapshot).render()
}

/// Builds the per-turn identity block for the given mode and seniority.
pub fn turn_directive_builder(
    candidate: &CandidateProfile,
    snapshot: &ProfileSnapshot,
    mode: Mode,
    seniority: Seniority,
) -> PersonaBuilder {
    let name = candidate.name.as_str();
    let (mode_heading, mode_body) = match mode {
        Mode::TechLead => ("MODE: TECH LEAD / PRINCIPAL ENGINEER", MODE_TECH_LEAD),
        Mode::Hr => ("MODE: HR / COLLEAGUE", MODE_HR),
    };
    let reference = candidate.third_person_reference();
    let project_hint = snapshot.project_hint(PROJECT_HINT_LIMIT);

    PersonaBuilder::new(HeadingStyle::Bracket)
        .section(
            "SYSTEM: IDENTITY REINFORCEMENT",
            fill(
                IDENTITY_REINFORCEMENT,
                &[
                    ("agent_name", AGENT_NAME),
                    ("name", name),
                    ("reference", reference.as_str()),
                ],
            ),
        )
        .section(
            "CONTEXT: PORTFOLIO",
            fill(
                PORTFOLIO_CONTEXT,
                &[("project_hint", project_hint.as_str()), ("name", name)],
            ),
        )
        .section(
            mode_heading,
            format!("{mode_body}\n- Current Context: {}", seniority.directive()),
        )
        .section(
            "IMPORTANT SECURITY RULE",
            fill(SECURITY_OVERRIDE, &[("canary", SECURITY_CANARY)]),
        )
}

pub fn compile_turn_directive(
    candidate: &CandidateProfile,
    snapshot: &ProfileSnapshot,
    mode: Mode,
    seniority: Seniority,
) -> String {
    turn_directive_builder(candidate, snapshot, mode, seniority).render()
}

/// The message actually sent for a chat turn.
pub fn compose_turn_prompt(directive: &str, message: &str) -> String {
    format!("{directive}\n\nUser Message: {message}")
}
