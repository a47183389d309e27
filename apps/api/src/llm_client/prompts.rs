// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Fixed string the model must emit verbatim when it detects an injection attempt.
/// Prompt-level mitigation only: the host process does not check for it.
pub const SECURITY_CANARY: &str =
    "[SECURITY_ALERT] Access Denied. Ah ah ah, you didn't say the magic word! 🦖";

/// Fragment that enforces JSON-only output for structured calls.
pub const JSON_ONLY_INSTRUCTION: &str = "OUTPUT FORMAT: JSON ONLY. No markdown. \
    Do NOT wrap the object in code fences. \
    Do NOT include any text outside the JSON object.";

/// Answer required when a fact is in neither data source.
pub const NO_RECORD_ANSWER: &str = "I don't have that record in my databanks.";

/// Replaces each `{key}` in `template` in a single pass.
/// Inserted values are never rescanned, so text that happens to contain a
/// placeholder (resume, transcript, env-supplied contact) is kept literally.
/// Unknown `{...}` sequences are left as they are.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let matched = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, *value))
        });
        match matched {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
