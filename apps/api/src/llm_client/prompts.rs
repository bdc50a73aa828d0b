// Shared prompt fragments.
// Each handler that calls the provider defines its own prompts.rs alongside it.

/// Appended to system prompts whose output must parse as a single JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose output is split line by line.
pub const ONE_PER_LINE_INSTRUCTION: &str =
    "Output one item per line, without numbering, bullets, or blank lines.";
