//! Company brief parser — extracts a structured profile from a pasted company
//! brief (site copy, about page, press blurb). Scraping itself happens
//! client-side; this module only sees text.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::pitches::prompts::{BRIEF_PARSE_PROMPT_TEMPLATE, BRIEF_PARSE_SYSTEM};

/// Detected voice of the target company. Drives phrasing in pitch generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CompanyTone {
    FastMovingStartup,
    #[default]
    EstablishedEnterprise,
    TechnicalBuyer,
    MissionDriven,
}

/// A pain point the brief surfaces, explicitly or between the lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainPoint {
    pub text: String,
    /// true when the brief states it outright, false when inferred.
    pub is_explicit: bool,
}

/// A keyword from the brief, weighted by where it appeared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u32,
    /// headline=1.0, products=0.7, about/boilerplate=0.4
    pub position_weight: f32,
    /// frequency * position_weight
    pub weighted_score: f32,
}

/// Full structured output of brief parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: String,
    pub industry: String,
    pub pain_points: Vec<PainPoint>,
    /// Timing/urgency markers — hiring sprees, new funding, product launches.
    pub buying_signals: Vec<String>,
    pub keyword_inventory: Vec<KeywordEntry>,
    pub detected_tone: CompanyTone,
}

/// Parses a company brief using the LLM and returns a structured profile.
pub async fn parse_brief(brief_text: &str, llm: &LlmClient) -> Result<CompanyProfile, AppError> {
    let prompt = BRIEF_PARSE_PROMPT_TEMPLATE.replace("{brief_text}", brief_text);
    llm.call_json::<CompanyProfile>(&prompt, BRIEF_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Brief parsing failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_tone_serde_variants() {
        for (json, expected) in [
            (r#""FastMovingStartup""#, CompanyTone::FastMovingStartup),
            (
                r#""EstablishedEnterprise""#,
                CompanyTone::EstablishedEnterprise,
            ),
            (r#""TechnicalBuyer""#, CompanyTone::TechnicalBuyer),
            (r#""MissionDriven""#, CompanyTone::MissionDriven),
        ] {
            let tone: CompanyTone = serde_json::from_str(json).unwrap();
            assert_eq!(tone, expected);
        }
    }

    #[test]
    fn test_company_tone_default_is_enterprise() {
        assert_eq!(CompanyTone::default(), CompanyTone::EstablishedEnterprise);
    }

    #[test]
    fn test_company_profile_full_deserializes_correctly() {
        let json = r#"{
            "company_name": "Acme Logistics",
            "industry": "freight brokerage",
            "pain_points": [
                {"text": "manual load matching eats dispatcher hours", "is_explicit": true},
                {"text": "likely struggling with carrier churn", "is_explicit": false}
            ],
            "buying_signals": ["hiring 4 ops roles", "Series B announced last month"],
            "keyword_inventory": [
                {
                    "keyword": "load matching",
                    "frequency": 3,
                    "position_weight": 1.0,
                    "weighted_score": 3.0
                }
            ],
            "detected_tone": "FastMovingStartup"
        }"#;

        let profile: CompanyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.company_name, "Acme Logistics");
        assert_eq!(profile.detected_tone, CompanyTone::FastMovingStartup);
        assert_eq!(profile.pain_points.len(), 2);
        assert!(profile.pain_points[0].is_explicit);
        assert!(!profile.pain_points[1].is_explicit);
        assert_eq!(profile.buying_signals.len(), 2);
        assert!(
            (profile.keyword_inventory[0].weighted_score - 3.0).abs() < f32::EPSILON
        );
    }

    #[test]
    fn test_keyword_weighted_score_is_freq_times_weight() {
        let entry = KeywordEntry {
            keyword: "fleet telematics".to_string(),
            frequency: 4,
            position_weight: 0.7,
            weighted_score: 2.8,
        };
        let expected = entry.frequency as f32 * entry.position_weight;
        assert!((entry.weighted_score - expected).abs() < f32::EPSILON);
    }

    #[test]
    fn test_profile_missing_tone_fails_deserialization() {
        let json = r#"{
            "company_name": "Acme",
            "industry": "x",
            "pain_points": [],
            "buying_signals": [],
            "keyword_inventory": []
        }"#;
        let result: Result<CompanyProfile, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
