//! Conversation mode and seniority calibration.
//!
//! Mode selects the tone preset of the per-turn directive; seniority indexes a fixed
//! directive table and lowers the sampling temperature as it increases.
//! Out-of-range seniority is clamped into [0, 3], never an index panic.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Tone preset for a chat turn. Unknown strings fall back to `Hr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Hr,
    TechLead,
}

impl Mode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tech_lead" | "techlead" | "tech-lead" => Mode::TechLead,
            _ => Mode::Hr,
        }
    }
}

/// `null` and unknown strings both land on the default mode.
impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| Mode::parse(&r)).unwrap_or_default())
    }
}

/// Candidate seniority level the conversation is calibrated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Seniority(u8);

const SENIORITY_DIRECTIVES: [&str; 4] = [
    "LEVEL: JUNIOR. Focus on learning, basic Java syntax, and enthusiasm.",
    "LEVEL: MIDDLE. Focus on implementation, SOLID principles, and clean code.",
    "LEVEL: SENIOR. Focus on system design, performance, and architecture.",
    "LEVEL: CTO. Focus on ROI, scalability, and strategy.",
];

const BASE_TEMPERATURE: f32 = 0.7;
const TEMPERATURE_STEP: f32 = 0.15;

impl Seniority {
    #[cfg(test)]
    pub const JUNIOR: Seniority = Seniority(0);
    #[cfg(test)]
    pub const MIDDLE: Seniority = Seniority(1);
    pub const SENIOR: Seniority = Seniority(2);
    pub const CTO: Seniority = Seniority(3);

    /// Clamps any integer into the supported range, logging when it had to.
    pub fn clamped(level: i64) -> Self {
        let max = i64::from(Self::CTO.0);
        let clamped = level.clamp(0, max);
        if clamped != level {
            warn!("Seniority {level} out of range, clamped to {clamped}");
        }
        // clamp guarantees 0..=3
        Seniority(clamped as u8)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn directive(&self) -> &'static str {
        SENIORITY_DIRECTIVES[usize::from(self.0)]
    }

    /// 0.7 − level × 0.15: 0.7, 0.55, 0.4, 0.25.
    pub fn temperature(&self) -> f32 {
        BASE_TEMPERATURE - f32::from(self.0) * TEMPERATURE_STEP
    }
}

impl Default for Seniority {
    fn default() -> Self {
        Seniority::SENIOR
    }
}

/// Any integer is clamped; `null` (a failed `parseInt` on the client) means the default.
impl<'de> Deserialize<'de> for Seniority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.map(Seniority::clamped).unwrap_or_default())
    }
}
