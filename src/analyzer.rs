// src/analyzer.rs
//! Analysis orchestrator: preprocess once, classify context and intent, fan
//! the five detectors out over the same input, aggregate, and assemble the
//! final report (flagged words, suggestions, deduplicated reasoning).
//!
//! Detectors have no dependency on each other, so they run concurrently and
//! join before aggregation. Unexpected faults here are fatal to the single
//! request; only external-classifier degradation inside a detector is
//! recovered silently.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::info;

use crate::aggregate;
use crate::context::classify_context;
use crate::detect::{score_sentiment, CategoryDetector};
use crate::external::{DynProvider, DEFAULT_CALL_TIMEOUT};
use crate::intent::classify_intent;
use crate::preprocess::Preprocessed;
use crate::report::{
    AnalysisReport, Category, CategoryScores, ContentType, ContextSignals, IntentSignals,
    ReportMetadata, RequestMetadata, RiskLevel,
};
use crate::rules::RuleBook;

/// Fixed suggestion bank keyed by overall risk.
fn base_suggestion(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Safe => "Content looks safe to publish.",
        RiskLevel::Warning => "Consider softening the highlighted wording before publishing.",
        RiskLevel::Danger => "Content is likely to be hurtful; a rewrite is recommended.",
        RiskLevel::Critical => "Content violates community guidelines; do not publish as is.",
    }
}

/// The engine facade. Holds the immutable rule book and one detector per
/// tiered category; cheap to share behind an `Arc`.
pub struct ContentRiskAnalyzer {
    rules: Arc<RuleBook>,
    hate_speech: CategoryDetector,
    toxicity: CategoryDetector,
    harassment: CategoryDetector,
    profanity: CategoryDetector,
}

impl ContentRiskAnalyzer {
    /// Analyzer over the embedded default rule book, no external providers.
    pub fn new() -> Self {
        Self::with_rules(RuleBook::shared_default())
    }

    pub fn with_rules(rules: Arc<RuleBook>) -> Self {
        Self {
            hate_speech: CategoryDetector::new(Category::HateSpeech, rules.clone()),
            toxicity: CategoryDetector::new(Category::Toxicity, rules.clone()),
            harassment: CategoryDetector::new(Category::Harassment, rules.clone()),
            profanity: CategoryDetector::new(Category::Profanity, rules.clone()),
            rules,
        }
    }

    /// Inject an external classifier for one category (builder style).
    /// Sentiment has no external path and ignores this.
    pub fn with_provider(self, category: Category, provider: DynProvider) -> Self {
        self.with_provider_timeout(category, provider, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_provider_timeout(
        mut self,
        category: Category,
        provider: DynProvider,
        timeout: Duration,
    ) -> Self {
        match category {
            Category::HateSpeech => {
                self.hate_speech = self.hate_speech.with_provider(provider, timeout)
            }
            Category::Toxicity => self.toxicity = self.toxicity.with_provider(provider, timeout),
            Category::Harassment => {
                self.harassment = self.harassment.with_provider(provider, timeout)
            }
            Category::Profanity => self.profanity = self.profanity.with_provider(provider, timeout),
            Category::Sentiment => {}
        }
        self
    }

    /// Analyze one piece of text.
    ///
    /// Precondition (enforced by callers, not here): input length within
    /// 1..=10000 chars. Identical input with no external-classifier variance
    /// yields identical scores, verdict and flagged words.
    pub async fn analyze(
        &self,
        text: &str,
        metadata: RequestMetadata,
    ) -> anyhow::Result<AnalysisReport> {
        let started = Instant::now();

        let pre = Preprocessed::new(text);
        let context = classify_context(&self.rules, &pre.normalized);
        let intent = classify_intent(&self.rules, &pre.normalized);

        // Fan-out: the detectors are independent given the same input.
        let (hate_speech, toxicity, harassment, profanity) = tokio::join!(
            self.hate_speech.detect(&pre, &context, &intent),
            self.toxicity.detect(&pre, &context, &intent),
            self.harassment.detect(&pre, &context, &intent),
            self.profanity.detect(&pre, &context, &intent),
        );
        let sentiment = score_sentiment(&self.rules, &pre);

        let categories = CategoryScores {
            hate_speech,
            toxicity,
            harassment,
            profanity,
            sentiment,
        };

        let verdict = aggregate::aggregate(&categories, &context, &intent);

        let flagged_words = pre
            .tokens
            .iter()
            .filter(|t| self.rules.is_flagged_word(t))
            .cloned()
            .collect();

        let mut reasoning: Vec<String> = Vec::new();
        for (_, score) in categories.iter() {
            for line in &score.reasoning {
                if !reasoning.contains(line) {
                    reasoning.push(line.clone());
                }
            }
        }

        let suggestions = build_suggestions(verdict.overall_risk, &context, &intent);

        let report = AnalysisReport {
            id: anon_hash(text),
            content: text.to_string(),
            content_type: ContentType::Text,
            categories,
            context,
            intent,
            overall_risk: verdict.overall_risk,
            confidence: verdict.confidence,
            flagged_words,
            suggestions,
            reasoning,
            metadata: ReportMetadata {
                user_id: metadata.user_id,
                platform: metadata.platform,
                timestamp: Utc::now(),
                processing_time_ms: started.elapsed().as_millis() as u64,
            },
        };

        dev_log_report(&report);
        Ok(report)
    }
}

impl Default for ContentRiskAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_suggestions(
    risk: RiskLevel,
    context: &ContextSignals,
    intent: &IntentSignals,
) -> Vec<String> {
    let mut out = vec![base_suggestion(risk).to_string()];
    if context.is_sarcastic || context.is_ironic {
        out.push(
            "Sarcasm detected; automated scores were dampened and human review may help."
                .to_string(),
        );
    }
    if context.is_educational || context.is_historical {
        out.push(
            "Educational or historical framing detected; flagged terms may be quoted rather than endorsed."
                .to_string(),
        );
    }
    if intent.is_threatening {
        out.push("Threatening language detected; consider escalating to a moderator.".to_string());
    }
    out
}

/// Anonymized content id: first 6 bytes of the SHA-256 digest, hex-encoded.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

// Dev logging gate: RISK_DEV_LOG=1 AND dev env (debug build or RISK_ENV in
// {local, development, dev}).
fn dev_logging_enabled() -> bool {
    let on = std::env::var("RISK_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("RISK_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Minimal, anonymized dev logger. Never logs raw text, only the hashed id
/// and score summary.
fn dev_log_report(report: &AnalysisReport) {
    if !dev_logging_enabled() {
        return;
    }
    info!(
        target: "risk",
        id = %report.id,
        risk = ?report.overall_risk,
        confidence = report.confidence,
        hate_speech = report.categories.hate_speech.score,
        toxicity = report.categories.toxicity.score,
        harassment = report.categories.harassment.score,
        profanity = report.categories.profanity.score,
        sentiment = report.categories.sentiment.score,
        elapsed_ms = report.metadata.processing_time_ms,
        "analysis finished"
    );
}
