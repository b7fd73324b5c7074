// tests/external_signals.rs
//
// Blending and degradation of optional external classifier signals through
// the public analyzer, using deterministic test doubles.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use content_risk_engine::external::{ExternalScore, ExternalSignalProvider, MockProvider};
use content_risk_engine::{Category, ContentRiskAnalyzer, RequestMetadata};

struct SlowProvider;

#[async_trait]
impl ExternalSignalProvider for SlowProvider {
    async fn classify(&self, _text: &str) -> Option<ExternalScore> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Some(ExternalScore { score: 100.0 })
    }
    fn provider_name(&self) -> &'static str {
        "slow"
    }
}

#[tokio::test]
async fn external_score_boosts_a_quiet_category() {
    let analyzer = ContentRiskAnalyzer::new().with_provider(
        Category::HateSpeech,
        Arc::new(MockProvider { fixed: 72.0 }),
    );
    let report = analyzer
        .analyze("a perfectly bland sentence", RequestMetadata::default())
        .await
        .unwrap();
    let hs = &report.categories.hate_speech;
    assert_eq!(hs.score, 72);
    // 72 exceeds the hate-speech sensitivity threshold.
    assert!(hs.detected);
    assert!(hs.reasoning.iter().any(|r| r.contains("external")));
}

#[tokio::test]
async fn weaker_external_score_is_ignored() {
    let analyzer = ContentRiskAnalyzer::new().with_provider(
        Category::Toxicity,
        Arc::new(MockProvider { fixed: 20.0 }),
    );
    let report = analyzer
        .analyze("You are so stupid and annoying", RequestMetadata::default())
        .await
        .unwrap();
    // Rule-based 55 wins over the external 20.
    assert_eq!(report.categories.toxicity.score, 55);
}

#[tokio::test]
async fn provider_timeout_degrades_only_that_detector() {
    let analyzer = ContentRiskAnalyzer::new()
        .with_provider_timeout(
            Category::HateSpeech,
            Arc::new(SlowProvider),
            Duration::from_millis(20),
        )
        .with_provider(Category::Toxicity, Arc::new(MockProvider { fixed: 70.0 }));

    let report = analyzer
        .analyze("a perfectly bland sentence", RequestMetadata::default())
        .await
        .unwrap();

    // Hate speech fell back to its rule-based zero...
    assert_eq!(report.categories.hate_speech.score, 0);
    assert!(!report.categories.hate_speech.detected);
    // ...while the sibling toxicity detector still got its boost.
    assert_eq!(report.categories.toxicity.score, 70);
}

#[tokio::test]
async fn sentiment_ignores_providers() {
    let analyzer = ContentRiskAnalyzer::new().with_provider(
        Category::Sentiment,
        Arc::new(MockProvider { fixed: 100.0 }),
    );
    let report = analyzer
        .analyze("a perfectly bland sentence", RequestMetadata::default())
        .await
        .unwrap();
    assert_eq!(report.categories.sentiment.score, 0);
}
