// LLM prompt constants for the CRM's rebuttal suggestions.

/// System prompt for rebuttal suggestion — enforces JSON-only output.
pub const REBUTTAL_SYSTEM: &str = "You are an experienced sales coach helping a \
    rep handle a real objection they heard from a prospect. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Rebuttal prompt template. Replace `{objection_text}` and `{lead_context}` before sending.
pub const REBUTTAL_PROMPT_TEMPLATE: &str = r#"A prospect raised this objection:

"{objection_text}"

Lead context (may be empty):
{lead_context}

Suggest how the rep should respond. Return a JSON object:
{
  "rebuttal": "The suggested spoken response, 2-4 sentences. Acknowledge, reframe, then advance.",
  "follow_up_question": "One open question that moves the conversation forward."
}

RULES:
1. Acknowledge the objection before countering it — never argue
2. Do NOT invent product claims, discounts, or customer names
3. Keep the rebuttal speakable in under 20 seconds"#;
