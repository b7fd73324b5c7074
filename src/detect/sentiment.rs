//! Sentiment scorer: closed word lists, no tiers, no external boost.
//!
//! Per-word penalties for negative words, bonuses for positive words, plus a
//! one-off bump for excessive exclamation marks; the sum is clamped to
//! 0..=100. Higher means more negative. Context/intent adjustments do not
//! apply here — sentiment carries the lowest aggregation weight anyway.

use crate::detect::calibration::{
    self, EXCLAMATION_BONUS, EXCLAMATION_MIN, NEGATIVE_WORD_POINTS, POSITIVE_WORD_POINTS,
};
use crate::preprocess::Preprocessed;
use crate::report::{Category, CategoryScore};
use crate::rules::RuleBook;

pub fn score_sentiment(rules: &RuleBook, pre: &Preprocessed) -> CategoryScore {
    let mut negatives = 0usize;
    let mut positives = 0usize;
    for tok in &pre.tokens {
        if rules.sentiment.is_negative(tok) {
            negatives += 1;
        } else if rules.sentiment.is_positive(tok) {
            positives += 1;
        }
    }

    let mut raw = 0.0f32;
    let mut reasoning = Vec::new();

    if negatives > 0 {
        raw += negatives as f32 * NEGATIVE_WORD_POINTS;
        reasoning.push(format!(
            "sentiment: {negatives} negative word(s) (+{:.0} each)",
            NEGATIVE_WORD_POINTS
        ));
    }
    if positives > 0 {
        raw -= positives as f32 * POSITIVE_WORD_POINTS;
        reasoning.push(format!(
            "sentiment: {positives} positive word(s) (-{:.0} each)",
            POSITIVE_WORD_POINTS
        ));
    }

    let exclamations = pre.raw.chars().filter(|c| *c == '!').count();
    if exclamations >= EXCLAMATION_MIN {
        raw += EXCLAMATION_BONUS;
        reasoning.push(format!(
            "sentiment: excessive exclamation ({exclamations} marks, +{EXCLAMATION_BONUS:.0})"
        ));
    }

    let cal = calibration::for_category(Category::Sentiment);
    let clamped = raw.clamp(0.0, 100.0);
    let detected = clamped > cal.detection_threshold as f32;
    CategoryScore::from_raw(clamped, detected, reasoning)
}
