use std::fmt;

use serde::{Deserialize, Serialize};

/// Final hiring recommendation. Parsing tolerates case, `_` and `-` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Verdict {
    #[serde(rename = "STRONG HIRE")]
    StrongHire,
    #[serde(rename = "HIRE")]
    Hire,
    #[serde(rename = "NO HIRE")]
    NoHire,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::StrongHire => "STRONG HIRE",
            Verdict::Hire => "HIRE",
            Verdict::NoHire => "NO HIRE",
        }
    }
}

impl TryFrom<String> for Verdict {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        match normalized.as_str() {
            "STRONG HIRE" => Ok(Verdict::StrongHire),
            "HIRE" => Ok(Verdict::Hire),
            "NO HIRE" => Ok(Verdict::NoHire),
            _ => Err(format!(
                "unknown verdict '{value}' (expected STRONG HIRE, HIRE or NO HIRE)"
            )),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skill the interviewer saw demonstrated, with the supporting evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEvidence {
    pub name: String,
    pub evidence: String,
}

/// Structured evaluation produced from a chat transcript. Lives only until it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringReport {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub session_id: String,
    pub executive_summary: String,
    #[serde(default)]
    pub top_skills: Vec<SkillEvidence>,
    #[serde(default)]
    pub communication_style: String,
    pub verdict: Verdict,
}
