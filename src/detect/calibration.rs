//! Fixed calibration constants per category.
//!
//! These are reproduced calibration values, not derived coefficients: the
//! damp/amp factors differ per category (harassment dampens hardest under
//! sarcasm, playfulness only softens toxicity/profanity, aggression only
//! amplifies toxicity). Detection thresholds are deliberately lower than any
//! caller-side blocking threshold, and sensitivity thresholds apply only to
//! the external-classifier path.

use crate::report::Category;

/// Per-category scoring constants. `None` means the adjustment does not
/// apply to that category.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    /// Multiplier under sarcastic/ironic framing.
    pub sarcasm_damp: f32,
    /// Multiplier under educational/historical framing (stronger).
    pub educational_damp: f32,
    /// Multiplier under playful/friendly framing (toxicity/profanity only).
    pub playful_damp: Option<f32>,
    /// Multiplier under threatening intent.
    pub threat_amp: f32,
    /// Multiplier under aggressive/hostile intent (toxicity only).
    pub aggression_amp: Option<f32>,
    /// Final score above this marks the category as detected.
    pub detection_threshold: u8,
    /// External score above this marks detected even without a tier match.
    pub sensitivity_threshold: u8,
}

pub fn for_category(category: Category) -> Calibration {
    match category {
        Category::HateSpeech => Calibration {
            sarcasm_damp: 0.3,
            educational_damp: 0.2,
            playful_damp: None,
            threat_amp: 1.4,
            aggression_amp: None,
            detection_threshold: 40,
            sensitivity_threshold: 60,
        },
        Category::Toxicity => Calibration {
            sarcasm_damp: 0.4,
            educational_damp: 0.3,
            playful_damp: Some(0.3),
            threat_amp: 1.3,
            aggression_amp: Some(1.3),
            detection_threshold: 45,
            sensitivity_threshold: 65,
        },
        Category::Harassment => Calibration {
            sarcasm_damp: 0.2,
            educational_damp: 0.1,
            playful_damp: None,
            threat_amp: 1.5,
            aggression_amp: None,
            detection_threshold: 40,
            sensitivity_threshold: 60,
        },
        Category::Profanity => Calibration {
            sarcasm_damp: 0.4,
            educational_damp: 0.3,
            playful_damp: Some(0.4),
            threat_amp: 1.3,
            aggression_amp: None,
            detection_threshold: 40,
            sensitivity_threshold: 70,
        },
        // Sentiment has no tiers, external path or context adjustment; the
        // word-list scorer only uses the detection threshold.
        Category::Sentiment => Calibration {
            sarcasm_damp: 1.0,
            educational_damp: 1.0,
            playful_damp: None,
            threat_amp: 1.0,
            aggression_amp: None,
            detection_threshold: 60,
            sensitivity_threshold: 100,
        },
    }
}

/// Sentiment word-list scoring: points added per negative word.
pub const NEGATIVE_WORD_POINTS: f32 = 15.0;
/// Points subtracted per positive word.
pub const POSITIVE_WORD_POINTS: f32 = 10.0;
/// Bonus once the exclamation-mark count reaches `EXCLAMATION_MIN`.
pub const EXCLAMATION_BONUS: f32 = 10.0;
pub const EXCLAMATION_MIN: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harassment_dampens_hardest_under_sarcasm() {
        let h = for_category(Category::Harassment);
        for c in [Category::HateSpeech, Category::Toxicity, Category::Profanity] {
            assert!(h.sarcasm_damp <= for_category(c).sarcasm_damp);
        }
    }

    #[test]
    fn educational_damp_is_stronger_than_sarcasm_damp() {
        for c in Category::ALL {
            let cal = for_category(c);
            assert!(cal.educational_damp <= cal.sarcasm_damp);
        }
    }

    #[test]
    fn detection_is_more_sensitive_than_external_sensitivity() {
        for c in Category::ALL {
            let cal = for_category(c);
            assert!(cal.detection_threshold <= cal.sensitivity_threshold);
        }
    }
}
