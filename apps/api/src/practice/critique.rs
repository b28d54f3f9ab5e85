//! Pitch critique — pluggable, trait-based backend scoring a practice delivery.
//!
//! Default: `LlmPitchCritic` (Claude via the shared `LlmClient`).
//! `AppState` holds an `Arc<dyn PitchCritic>`, so handlers and their tests
//! never depend on the LLM directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::EVIDENCE_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::practice::prompts::{CRITIQUE_PROMPT_TEMPLATE, CRITIQUE_SYSTEM};

pub const MAX_SCORE: u8 = 100;

/// Critique of one practice delivery, as produced by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Critique {
    /// 0–100. Sanitized after deserialization — the LLM occasionally returns
    /// scores above 100 despite the prompt.
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

/// The critique backend trait. Implement this to swap backends without
/// touching the session-completion handler.
#[async_trait]
pub trait PitchCritic: Send + Sync {
    /// Critiques a delivery transcript. `pitch_text` is the script the user
    /// was practicing against, when one is on file.
    async fn critique(
        &self,
        transcript: &str,
        pitch_text: Option<&str>,
    ) -> Result<Critique, AppError>;
}

/// LLM-backed critique via Claude.
pub struct LlmPitchCritic {
    llm: LlmClient,
}

impl LlmPitchCritic {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PitchCritic for LlmPitchCritic {
    async fn critique(
        &self,
        transcript: &str,
        pitch_text: Option<&str>,
    ) -> Result<Critique, AppError> {
        let prompt = CRITIQUE_PROMPT_TEMPLATE
            .replace("{evidence_instruction}", EVIDENCE_INSTRUCTION)
            .replace("{transcript}", transcript)
            .replace(
                "{pitch_text}",
                pitch_text.unwrap_or("(no script on file — freestyle delivery)"),
            );

        let critique: Critique = self
            .llm
            .call_json(&prompt, CRITIQUE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Critique failed: {e}")))?;

        Ok(sanitize(critique))
    }
}

/// Clamps the score into range and trims empty feedback lines.
fn sanitize(mut critique: Critique) -> Critique {
    critique.score = critique.score.min(MAX_SCORE);
    critique.strengths.retain(|s| !s.trim().is_empty());
    critique.improvements.retain(|s| !s.trim().is_empty());
    critique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critique_deserializes_from_llm_shape() {
        let json = r#"{
            "score": 74,
            "strengths": ["Clear opener naming the prospect's industry"],
            "improvements": ["Call to action never asks for a meeting"],
            "summary": "Solid structure, weak close."
        }"#;
        let critique: Critique = serde_json::from_str(json).unwrap();
        assert_eq!(critique.score, 74);
        assert_eq!(critique.strengths.len(), 1);
        assert_eq!(critique.improvements.len(), 1);
    }

    #[test]
    fn test_sanitize_clamps_overshoot_score() {
        let critique = sanitize(Critique {
            score: 110,
            strengths: vec![],
            improvements: vec![],
            summary: String::new(),
        });
        assert_eq!(critique.score, 100);
    }

    #[test]
    fn test_sanitize_drops_blank_feedback_lines() {
        let critique = sanitize(Critique {
            score: 50,
            strengths: vec!["  ".to_string(), "Good pacing cue".to_string()],
            improvements: vec!["".to_string()],
            summary: "ok".to_string(),
        });
        assert_eq!(critique.strengths, vec!["Good pacing cue".to_string()]);
        assert!(critique.improvements.is_empty());
    }

    #[test]
    fn test_critique_missing_score_fails_deserialization() {
        let json = r#"{"strengths": [], "improvements": [], "summary": "x"}"#;
        let result: Result<Critique, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
