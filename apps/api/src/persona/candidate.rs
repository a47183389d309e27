/// Identity of the person the agent represents, plus the answers it must give verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub name: String,
    pub title: String,
    pub location: String,
    /// Hardcoded answer for contact questions.
    pub contact: String,
    /// Hardcoded answer for availability questions.
    pub availability: String,
    /// How the agent refers to the candidate in the third person, if configured.
    pub pronoun: Option<String>,
}

impl CandidateProfile {
    /// `"She" or "The Candidate"` when a pronoun is configured, else `"The Candidate"`.
    pub fn third_person_reference(&self) -> String {
        match &self.pronoun {
            Some(pronoun) => format!("\"{pronoun}\" or \"The Candidate\""),
            None => "\"The Candidate\"".to_string(),
        }
    }
}

impl Default for CandidateProfile {
    fn default() -> Self {
        Self {
            name: "Veronika Kashtanova".to_string(),
            title: "Senior AI Engineer & Founder".to_string(),
            location: "Ukraine".to_string(),
            contact: "You can reach me via X (@veron_code) or check my code on GitHub (https://github.com/vero-code).".to_string(),
            availability: "Open to Lead/Founder roles in Big Tech and Grant opportunities.".to_string(),
            pronoun: None,
        }
    }
}
