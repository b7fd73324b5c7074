// src/detect/mod.rs
//! Category detectors: the six-step scoring pipeline.
//!
//! Order is fixed and the effects compound multiplicatively:
//! 1. start at zero
//! 2. tier accumulation (one add per matched tier, one reasoning line each)
//! 3. external blend (adopt a strictly greater external score)
//! 4. context dampening (sarcasm/irony, educational/historical, playful)
//! 5. intent amplification (threat; aggression for toxicity)
//! 6. clamp, derive level, decide `detected`
//!
//! A failed or timed-out external call degrades that one detector to its
//! rule-based score; it never fails the analysis or touches siblings.

pub mod calibration;
pub mod sentiment;

use std::sync::Arc;
use std::time::Duration;

use crate::external::{self, DynProvider};
use crate::preprocess::Preprocessed;
use crate::report::{Category, CategoryScore, ContextSignals, IntentSignals};
use crate::rules::RuleBook;

pub use calibration::Calibration;
pub use sentiment::score_sentiment;

/// One tier-and-pattern detector for a single category.
pub struct CategoryDetector {
    category: Category,
    rules: Arc<RuleBook>,
    calibration: Calibration,
    provider: Option<DynProvider>,
    call_timeout: Duration,
}

impl CategoryDetector {
    pub fn new(category: Category, rules: Arc<RuleBook>) -> Self {
        Self {
            category,
            rules,
            calibration: calibration::for_category(category),
            provider: None,
            call_timeout: external::DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Inject an optional external classifier for this category.
    pub fn with_provider(mut self, provider: DynProvider, timeout: Duration) -> Self {
        self.provider = Some(provider);
        self.call_timeout = timeout;
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Run the full pipeline for one preprocessed input.
    pub async fn detect(
        &self,
        pre: &Preprocessed,
        context: &ContextSignals,
        intent: &IntentSignals,
    ) -> CategoryScore {
        let name = self.category.as_str();
        let mut raw = 0.0f32;
        let mut reasoning: Vec<String> = Vec::new();
        let mut tier_hit = false;

        // (2) Tier accumulation.
        for tier in self.rules.tiers(self.category) {
            if tier.matches(&pre.normalized) {
                raw += tier.points;
                tier_hit = true;
                reasoning.push(format!(
                    "{name}: `{}` tier matched (+{:.0})",
                    tier.id, tier.points
                ));
            }
        }
        let mut detected = tier_hit;

        // (3) External blend: adopt a strictly greater score.
        if let Some(provider) = &self.provider {
            if let Some(ext) = external::classify_with_timeout(
                provider.as_ref(),
                self.category,
                &pre.raw,
                self.call_timeout,
            )
            .await
            {
                if ext > raw {
                    reasoning.push(format!(
                        "{name}: external classifier raised score {:.0} -> {:.0}",
                        raw, ext
                    ));
                    raw = ext;
                    if ext > self.calibration.sensitivity_threshold as f32 {
                        detected = true;
                    }
                }
            }
        }

        // (4) Context dampening.
        if context.is_sarcastic || context.is_ironic {
            raw *= self.calibration.sarcasm_damp;
            reasoning.push(format!(
                "{name}: sarcastic/ironic framing (x{:.1})",
                self.calibration.sarcasm_damp
            ));
        }
        if context.is_educational || context.is_historical {
            raw *= self.calibration.educational_damp;
            reasoning.push(format!(
                "{name}: educational/historical framing (x{:.1})",
                self.calibration.educational_damp
            ));
        }
        if context.is_playful || context.is_friendly {
            if let Some(f) = self.calibration.playful_damp {
                raw *= f;
                reasoning.push(format!("{name}: playful/friendly framing (x{f:.1})"));
            }
        }

        // (5) Intent amplification.
        if intent.is_threatening {
            raw *= self.calibration.threat_amp;
            reasoning.push(format!(
                "{name}: threatening intent (x{:.1})",
                self.calibration.threat_amp
            ));
        }
        if intent.is_aggressive || intent.is_hostile {
            if let Some(a) = self.calibration.aggression_amp {
                raw *= a;
                reasoning.push(format!("{name}: aggressive/hostile intent (x{a:.1})"));
            }
        }

        // (6) Clamp and finalize.
        let clamped = raw.clamp(0.0, 100.0);
        if clamped > self.calibration.detection_threshold as f32 {
            detected = true;
        }
        CategoryScore::from_raw(clamped, detected, reasoning)
    }
}
