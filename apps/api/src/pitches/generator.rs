//! Pitch generation — orchestrates the full generation pipeline.
//!
//! Flow: parse_brief → voice calibration → LLM generate sections →
//! validate section kinds → persist pitch + sections → return response.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::BRIEF_SCOPE_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::pitches::company_brief::{parse_brief, CompanyProfile};
use crate::pitches::prompts::{PITCH_PROMPT_TEMPLATE, PITCH_SYSTEM};
use crate::pitches::tone::{voice_for_tone, PitchVoice};

/// Max LLM retries when the returned sections fail validation.
const MAX_GENERATION_RETRIES: u32 = 2;

/// The section kinds a pitch script is built from, in canonical delivery order.
pub const SECTION_KINDS: &[&str] = &[
    "opener",
    "value_proposition",
    "proof_point",
    "call_to_action",
];

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One section of a generated pitch script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSection {
    pub kind: String,
    pub text: String,
    pub talking_points: Vec<String>,
}

/// Request body for pitch generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePitchRequest {
    pub brief_text: String,
    pub lead_id: Option<Uuid>,
    /// One-paragraph description of what the seller offers. Optional — the
    /// prompt degrades gracefully without it.
    pub seller_context: Option<String>,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePitchResponse {
    pub pitch_id: Uuid,
    pub profile: CompanyProfile,
    pub sections: Vec<DraftSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full pitch generation pipeline and persists results to the DB.
pub async fn generate_pitch(
    pool: &PgPool,
    llm: &LlmClient,
    user_id: Uuid,
    request: GeneratePitchRequest,
) -> Result<GeneratePitchResponse, AppError> {
    // Step 1: Parse the company brief
    info!("Parsing company brief for user {user_id}");
    let profile = parse_brief(&request.brief_text, llm).await?;
    info!(
        "Brief parsed: {} ({:?})",
        profile.company_name, profile.detected_tone
    );

    // Step 2: Voice calibration
    let voice = voice_for_tone(&profile.detected_tone);

    // Step 3: LLM generation with retry on invalid sections
    let sections = call_llm_with_retry(
        llm,
        &profile,
        &voice,
        request.seller_context.as_deref(),
    )
    .await?;

    // Step 4: Persist pitch row + sections
    let pitch_id = Uuid::new_v4();
    let profile_value = serde_json::to_value(&profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO pitches (id, user_id, lead_id, company_name, brief_text, company_profile, source)
        VALUES ($1, $2, $3, $4, $5, $6, 'generated')
        "#,
    )
    .bind(pitch_id)
    .bind(user_id)
    .bind(request.lead_id)
    .bind(&profile.company_name)
    .bind(&request.brief_text)
    .bind(&profile_value)
    .execute(pool)
    .await?;

    for (position, section) in sections.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO pitch_sections (id, pitch_id, kind, content, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(pitch_id)
        .bind(&section.kind)
        .bind(&section.text)
        .bind(position as i16)
        .execute(pool)
        .await?;
    }

    info!(
        "Generated pitch {} with {} sections for user {}",
        pitch_id,
        sections.len(),
        user_id
    );

    Ok(GeneratePitchResponse {
        pitch_id,
        profile,
        sections,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// LLM call with retry
// ────────────────────────────────────────────────────────────────────────────

/// Calls the LLM to generate sections. Retries up to MAX_GENERATION_RETRIES
/// times if the output fails `validate_sections`.
async fn call_llm_with_retry(
    llm: &LlmClient,
    profile: &CompanyProfile,
    voice: &PitchVoice,
    seller_context: Option<&str>,
) -> Result<Vec<DraftSection>, AppError> {
    let prompt = build_pitch_prompt(profile, voice, seller_context)?;

    for attempt in 0..=MAX_GENERATION_RETRIES {
        let sections: Vec<DraftSection> = llm
            .call_json(&prompt, PITCH_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Pitch generation LLM call failed: {e}")))?;

        match validate_sections(&sections) {
            Ok(()) => return Ok(sections),
            Err(reason) => warn!(
                "Generation attempt {}/{}: {reason} — retrying",
                attempt + 1,
                MAX_GENERATION_RETRIES + 1
            ),
        }
    }

    Err(AppError::Llm(format!(
        "Pitch generation failed after {} attempts: sections consistently failed validation",
        MAX_GENERATION_RETRIES + 1
    )))
}

/// Checks the structural rules the prompt demands of the LLM output.
pub fn validate_sections(sections: &[DraftSection]) -> Result<(), String> {
    if sections.is_empty() {
        return Err("no sections returned".to_string());
    }
    for section in sections {
        if !SECTION_KINDS.contains(&section.kind.as_str()) {
            return Err(format!("unknown section kind '{}'", section.kind));
        }
        if section.text.trim().is_empty() {
            return Err(format!("section '{}' has empty text", section.kind));
        }
    }
    for required in ["opener", "call_to_action"] {
        if !sections.iter().any(|s| s.kind == required) {
            return Err(format!("missing required section '{required}'"));
        }
    }
    Ok(())
}

/// Builds the generation prompt by filling the template with serialized context.
fn build_pitch_prompt(
    profile: &CompanyProfile,
    voice: &PitchVoice,
    seller_context: Option<&str>,
) -> Result<String, AppError> {
    let profile_json = serde_json::to_string_pretty(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    let voice_json = serde_json::to_string(&serde_json::json!({
        "strong_verbs": voice.strong_verbs,
        "opener_style": voice.opener_style,
        "avoid_phrases": voice.avoid_phrases,
    }))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize voice: {e}")))?;

    Ok(PITCH_PROMPT_TEMPLATE
        .replace("{brief_scope_instruction}", BRIEF_SCOPE_INSTRUCTION)
        .replace("{voice_json}", &voice_json)
        .replace("{profile_json}", &profile_json)
        .replace(
            "{seller_context}",
            seller_context.unwrap_or("(not provided — keep the value proposition generic)"),
        ))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: &str, text: &str) -> DraftSection {
        DraftSection {
            kind: kind.to_string(),
            text: text.to_string(),
            talking_points: vec!["cue".to_string()],
        }
    }

    #[test]
    fn test_valid_full_script_passes() {
        let sections = vec![
            section("opener", "You mentioned dispatcher hours..."),
            section("value_proposition", "We automate load matching..."),
            section("proof_point", "Two brokers your size cut intake 40%..."),
            section("call_to_action", "Worth 20 minutes Thursday?"),
        ];
        assert!(validate_sections(&sections).is_ok());
    }

    #[test]
    fn test_opener_and_cta_alone_pass() {
        let sections = vec![
            section("opener", "Saw the Series B news."),
            section("call_to_action", "Can I show you Thursday?"),
        ];
        assert!(validate_sections(&sections).is_ok());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let sections = vec![
            section("opener", "Hi."),
            section("pricing_slide", "It costs money."),
            section("call_to_action", "Buy it?"),
        ];
        let err = validate_sections(&sections).unwrap_err();
        assert!(err.contains("pricing_slide"));
    }

    #[test]
    fn test_missing_call_to_action_rejected() {
        let sections = vec![
            section("opener", "Hi."),
            section("value_proposition", "We do things."),
        ];
        let err = validate_sections(&sections).unwrap_err();
        assert!(err.contains("call_to_action"));
    }

    #[test]
    fn test_empty_text_rejected() {
        let sections = vec![
            section("opener", "   "),
            section("call_to_action", "Buy?"),
        ];
        assert!(validate_sections(&sections).is_err());
    }

    #[test]
    fn test_empty_output_rejected() {
        assert!(validate_sections(&[]).is_err());
    }

    #[test]
    fn test_draft_section_serializes_and_deserializes() {
        let s = section("proof_point", "Acme cut churn 12% in one quarter");
        let json = serde_json::to_string(&s).unwrap();
        let recovered: DraftSection = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.kind, "proof_point");
        assert_eq!(recovered.text, s.text);
    }

    #[test]
    fn test_generate_request_deserialization() {
        let json = serde_json::json!({
            "brief_text": "Acme Logistics moves freight and hates manual dispatch.",
            "lead_id": null,
            "seller_context": "We sell dispatch automation."
        });
        let request: GeneratePitchRequest = serde_json::from_value(json).unwrap();
        assert!(!request.brief_text.is_empty());
        assert!(request.lead_id.is_none());
    }
}
