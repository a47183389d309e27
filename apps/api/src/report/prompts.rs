// Prompt constants for the report compiler.
// Replace: {resume_excerpt}, {transcript}, {json_only}, {candidate_name}, {role}, {session_id}

pub const REPORT_PROMPT_TEMPLATE: &str = r#"ROLE: Senior Technical Recruiter & Hiring Manager.
TASK: Perform a "Technical Due Diligence" on the candidate based on the interaction.

INPUT DATA:
---
RESUME SUMMARY:
{resume_excerpt}... (truncated)
---
INTERVIEW TRANSCRIPT:
{transcript}
---

{json_only}
{
    "candidate_name": "{candidate_name}",
    "role": "{role}",
    "session_id": "{session_id}",
    "executive_summary": "2-3 sentences evaluating the candidate's technical depth and soft skills shown in the chat.",
    "top_skills": [
        {"name": "Skill 1", "evidence": "Mentioned using X in project Y..."},
        {"name": "Skill 2", "evidence": "..."},
        {"name": "Skill 3", "evidence": "..."}
    ],
    "communication_style": "Metaphors used, clarity, confidence level...",
    "verdict": "exactly one of: STRONG HIRE | HIRE | NO HIRE"
}"#;
