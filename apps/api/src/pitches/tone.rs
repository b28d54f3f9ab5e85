//! Tone calibration — maps the detected company tone to the voice the
//! generated pitch should use.
//!
//! A TechnicalBuyer profile never gets hype language no matter how exciting
//! the product is; an EstablishedEnterprise profile never gets "disrupt".

use crate::pitches::company_brief::CompanyTone;

/// Voice guidance for one company tone.
#[derive(Debug, Clone)]
pub struct PitchVoice {
    pub strong_verbs: Vec<&'static str>,
    pub opener_style: &'static str,
    pub avoid_phrases: Vec<&'static str>,
}

/// Returns the calibrated voice for the detected company tone.
pub fn voice_for_tone(tone: &CompanyTone) -> PitchVoice {
    match tone {
        CompanyTone::FastMovingStartup => PitchVoice {
            strong_verbs: vec!["cut", "ship", "unblock", "automate", "scale"],
            opener_style: "lead with the speed win — what they stop waiting on",
            avoid_phrases: vec![
                "enterprise-grade",
                "synergy",
                "best-in-class",
                "end-to-end solution",
            ],
        },
        CompanyTone::EstablishedEnterprise => PitchVoice {
            strong_verbs: vec!["standardize", "de-risk", "consolidate", "comply", "audit"],
            opener_style: "lead with risk reduction and a peer reference point",
            avoid_phrases: vec!["disrupt", "move fast", "hack", "10x"],
        },
        CompanyTone::TechnicalBuyer => PitchVoice {
            strong_verbs: vec!["integrate", "measure", "benchmark", "instrument", "migrate"],
            opener_style: "lead with a concrete number or mechanism, skip the warm-up",
            avoid_phrases: vec![
                "revolutionary",
                "game-changing",
                "seamless",
                "magic",
            ],
        },
        CompanyTone::MissionDriven => PitchVoice {
            strong_verbs: vec!["serve", "reach", "sustain", "amplify", "extend"],
            opener_style: "lead with who benefits, then how the numbers prove it",
            avoid_phrases: vec!["monetize", "exploit", "capture value", "land and expand"],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_voice_leads_with_speed() {
        let v = voice_for_tone(&CompanyTone::FastMovingStartup);
        assert!(v.strong_verbs.contains(&"ship"));
        assert!(v.avoid_phrases.contains(&"enterprise-grade"));
    }

    #[test]
    fn test_enterprise_voice_avoids_disrupt() {
        let v = voice_for_tone(&CompanyTone::EstablishedEnterprise);
        assert!(v.avoid_phrases.contains(&"disrupt"));
        assert!(v.strong_verbs.contains(&"de-risk"));
    }

    #[test]
    fn test_technical_voice_avoids_hype() {
        let v = voice_for_tone(&CompanyTone::TechnicalBuyer);
        assert!(v.avoid_phrases.contains(&"revolutionary"));
        assert!(v.avoid_phrases.contains(&"game-changing"));
    }

    #[test]
    fn test_mission_voice_avoids_extractive_language() {
        let v = voice_for_tone(&CompanyTone::MissionDriven);
        assert!(v.avoid_phrases.contains(&"monetize"));
    }

    /// No tone's strong verbs may appear in its own avoid list.
    #[test]
    fn test_voices_are_internally_consistent() {
        for tone in [
            CompanyTone::FastMovingStartup,
            CompanyTone::EstablishedEnterprise,
            CompanyTone::TechnicalBuyer,
            CompanyTone::MissionDriven,
        ] {
            let v = voice_for_tone(&tone);
            for verb in &v.strong_verbs {
                assert!(
                    !v.avoid_phrases.contains(verb),
                    "{verb} is both encouraged and avoided for {tone:?}"
                );
            }
        }
    }
}
