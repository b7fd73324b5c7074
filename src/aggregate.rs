//! # Risk Aggregator
//! Pure, testable logic that maps `(category scores, context, intent)` →
//! `(overall risk, confidence)`. No I/O, suitable for unit tests and offline
//! evaluation.
//!
//! Policy: a fixed severity weighting (hate speech and harassment dominate),
//! sequential context multipliers on the weighted sum, and a confidence that
//! drops with detector disagreement and ambiguous context.

use crate::report::{CategoryScores, ContextSignals, IntentSignals, RiskLevel};

/// Fixed category weights; the ordering encodes harm severity.
pub const WEIGHT_HATE_SPEECH: f32 = 0.35;
pub const WEIGHT_HARASSMENT: f32 = 0.25;
pub const WEIGHT_TOXICITY: f32 = 0.20;
pub const WEIGHT_PROFANITY: f32 = 0.15;
pub const WEIGHT_SENTIMENT: f32 = 0.05;

/// Sequential multipliers applied to the weighted sum.
const SARCASM_RISK_DAMP: f32 = 0.4;
const EDUCATIONAL_RISK_DAMP: f32 = 0.3;
const THREAT_RISK_AMP: f32 = 1.3;

/// Fixed verdict breakpoints on the adjusted weighted sum.
const RISK_CRITICAL_MIN: f32 = 70.0;
const RISK_DANGER_MIN: f32 = 50.0;
const RISK_WARNING_MIN: f32 = 30.0;

/// Confidence adjustments.
const CONFIDENCE_SARCASM_DAMP: f32 = 0.7;
const CONFIDENCE_EDUCATIONAL_DAMP: f32 = 0.8;
const CONFIDENCE_CLARITY_BONUS: f32 = 1.1;

/// Aggregated verdict for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskVerdict {
    pub overall_risk: RiskLevel,
    /// Agreement among detectors, 0..=100.
    pub confidence: u8,
}

/// Combine the five category scores into an overall verdict + confidence.
pub fn aggregate(
    scores: &CategoryScores,
    context: &ContextSignals,
    intent: &IntentSignals,
) -> RiskVerdict {
    let mut weighted = scores.hate_speech.score as f32 * WEIGHT_HATE_SPEECH
        + scores.harassment.score as f32 * WEIGHT_HARASSMENT
        + scores.toxicity.score as f32 * WEIGHT_TOXICITY
        + scores.profanity.score as f32 * WEIGHT_PROFANITY
        + scores.sentiment.score as f32 * WEIGHT_SENTIMENT;

    // Sequential adjustment, mirroring the per-detector damp/amp order.
    if context.is_sarcastic || context.is_ironic {
        weighted *= SARCASM_RISK_DAMP;
    }
    if context.is_educational || context.is_historical {
        weighted *= EDUCATIONAL_RISK_DAMP;
    }
    if intent.is_threatening || intent.is_aggressive {
        weighted *= THREAT_RISK_AMP;
    }

    let overall_risk = if weighted >= RISK_CRITICAL_MIN {
        RiskLevel::Critical
    } else if weighted >= RISK_DANGER_MIN {
        RiskLevel::Danger
    } else if weighted >= RISK_WARNING_MIN {
        RiskLevel::Warning
    } else {
        RiskLevel::Safe
    };

    RiskVerdict {
        overall_risk,
        confidence: confidence(scores, context, intent),
    }
}

/// High disagreement among detectors means ambiguous content; ambiguous
/// context independently reduces trust in the verdict.
fn confidence(scores: &CategoryScores, context: &ContextSignals, intent: &IntentSignals) -> u8 {
    let raw = scores.raw();
    let mean = raw.iter().map(|s| *s as f32).sum::<f32>() / raw.len() as f32;
    let variance = raw
        .iter()
        .map(|s| {
            let d = *s as f32 - mean;
            d * d
        })
        .sum::<f32>()
        / raw.len() as f32;
    let std_dev = variance.sqrt();

    let mut conf = (100.0 - std_dev * 2.0).max(0.0);
    if context.is_sarcastic || context.is_ironic {
        conf *= CONFIDENCE_SARCASM_DAMP;
    }
    if context.is_educational || context.is_historical {
        conf *= CONFIDENCE_EDUCATIONAL_DAMP;
    }
    if intent.is_clear {
        conf *= CONFIDENCE_CLARITY_BONUS;
    }
    conf.round().clamp(0.0, 100.0) as u8
}
