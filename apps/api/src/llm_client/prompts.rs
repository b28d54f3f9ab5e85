#![allow(dead_code)]

// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to critique prompts: feedback must cite the transcript.
pub const EVIDENCE_INSTRUCTION: &str = "\
    CRITICAL: Every strength and improvement you list must point at something \
    the speaker actually said. Quote or closely paraphrase the transcript. \
    Do NOT invent quotes, do NOT critique delivery aspects (pace, volume) \
    that a transcript cannot show.";

/// Instruction appended to generation prompts: stay inside the supplied brief.
pub const BRIEF_SCOPE_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY facts from the company profile provided. \
    Do NOT invent customer names, revenue figures, or product capabilities. \
    If the profile does not support a claim, leave it out.";
