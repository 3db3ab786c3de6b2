// Shared prompt fragments and prompt-building utilities.
// Each advisory module defines its own prompts.rs alongside it; this file holds
// the cross-cutting pieces.

use super::OutputConstraint;

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Plain-language guidance shared by every farmer-facing prompt.
pub const FARMER_FRIENDLY_INSTRUCTION: &str = "\
If some information is missing, make reasonable assumptions and clearly state them. \
Always keep the answer short, simple, and practical so that farmers can easily understand and apply it.";

const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("mr", "Marathi"),
    ("bn", "Bengali"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("gu", "Gujarati"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("pa", "Punjabi"),
];

/// Maps a language code to its English name. Unknown values pass through, so
/// callers may also send a full language name.
pub fn language_name(code: &str) -> &str {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

pub fn language_instruction(code: &str) -> String {
    format!(
        "CRITICAL: Generate the entire response in the requested language: {}.",
        language_name(code)
    )
}

/// Builds the system prompt sent with a structured request: the flow's own
/// persona, the JSON-only rule, and the output schema the answer must match.
pub fn structured_system_prompt(persona: &str, constraint: &OutputConstraint) -> String {
    let schema = serde_json::to_string_pretty(&constraint.schema)
        .unwrap_or_else(|_| constraint.schema.to_string());
    format!(
        "{persona}\n\n{JSON_ONLY_SYSTEM}\n\nOUTPUT SCHEMA ({name}), return exactly this structure:\n{schema}",
        name = constraint.name
    )
}

/// Fills `{key}` placeholders in a single pass. Substituted values are never
/// re-scanned, so user text containing braces is inserted verbatim. Unknown
/// placeholders are left in place.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => {
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
