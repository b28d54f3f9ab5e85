// All LLM prompt constants for the Pitch module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for brief parsing — enforces JSON-only output.
pub const BRIEF_PARSE_SYSTEM: &str =
    "You are an expert sales researcher. \
    Analyze a prospect company's public copy and extract structured signals. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Brief parsing prompt template. Replace `{brief_text}` before sending.
pub const BRIEF_PARSE_PROMPT_TEMPLATE: &str = r#"Analyze the following company brief (website copy, about page, or press material) and extract structured information for a sales pitch.

Return a JSON object with this EXACT schema (no extra fields):
{
  "company_name": "Acme Logistics",
  "industry": "freight brokerage",
  "pain_points": [
    {"text": "manual load matching eats dispatcher hours", "is_explicit": true}
  ],
  "buying_signals": [
    "hiring 4 ops roles"
  ],
  "keyword_inventory": [
    {
      "keyword": "load matching",
      "frequency": 3,
      "position_weight": 1.0,
      "weighted_score": 3.0
    }
  ],
  "detected_tone": "FastMovingStartup"
}

Rules for parsing:

POSITION WEIGHTS for keyword scoring:
- Headline / hero copy: 1.0
- Product or feature sections: 0.7
- About Us / boilerplate: 0.4
weighted_score = frequency * position_weight

TONE OPTIONS (pick exactly one):
- "FastMovingStartup": speed language — "ship", "iterate", "move fast", small team signals
- "EstablishedEnterprise": process language — "compliance", "at scale", "trusted by", legacy signals
- "TechnicalBuyer": engineering-led copy — API docs up front, benchmarks, architecture talk
- "MissionDriven": impact language — "access", "community", "sustainability", beneficiaries named

PAIN POINTS: mark `is_explicit` true only when the brief states the problem outright; inferred pains are false.
BUYING SIGNALS: timing markers only — funding, hiring, launches, expansion. No product opinions.

Extract ALL meaningful domain keywords and score them.

COMPANY BRIEF:
{brief_text}"#;

/// System prompt for pitch generation — enforces JSON-only output.
pub const PITCH_SYSTEM: &str = "You are an expert sales copywriter generating a \
    cold-pitch script grounded in a researched company profile. \
    You MUST respond with valid JSON only — a JSON array of section objects. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the company profile.";

/// Pitch generation prompt template.
/// Replace: {brief_scope_instruction}, {voice_json}, {profile_json}, {seller_context}
pub const PITCH_PROMPT_TEMPLATE: &str = r#"{brief_scope_instruction}

VOICE CALIBRATION for this prospect:
{voice_json}

COMPANY PROFILE (source of truth — ONLY use facts from this):
{profile_json}

WHAT THE SELLER OFFERS:
{seller_context}

Generate a pitch script as a JSON ARRAY of sections, in delivery order:
[
  {
    "kind": "opener",
    "text": "The spoken script for this section, 2-4 sentences.",
    "talking_points": ["one-line cue card bullet", "another"]
  }
]

HARD RULES:
1. `kind` must be exactly one of: "opener", "value_proposition", "proof_point", "call_to_action"
2. Include an "opener" and a "call_to_action" — a pitch without an ask is rejected
3. Each section's `text` must be speakable in under 30 seconds
4. Anchor the opener in a pain point or buying signal from the profile — never open with the product
5. Use the calibrated verbs; never use the avoid-phrases
6. 2 to 4 talking_points per section, each under 10 words"#;
