// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps extraction prompts from filling gaps with invented data.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Copy facts only from the provided document. Do NOT infer, embellish, \
    or invent names, employers, dates, links or skills. \
    If the document does not contain a field, return an empty string or empty array for it.";
