//! report.rs — Output shapes for a single analysis: per-category scores,
//! context/intent signals, the overall verdict and the final report.
//!
//! Everything here is plain data. A report is built once by the analyzer and
//! never mutated afterwards; the caller owns it (and may persist it).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Severity level derived from a 0–100 score via fixed breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
    Critical,
}

impl Level {
    /// Pure function of the score: >=80 critical, >=60 high, >=40 medium, else low.
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Level::Critical,
            60..=79 => Level::High,
            40..=59 => Level::Medium,
            _ => Level::Low,
        }
    }
}

/// Overall qualitative verdict for one piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
    Critical,
}

/// The five independently scored categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    HateSpeech,
    Toxicity,
    Harassment,
    Profanity,
    Sentiment,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::HateSpeech,
        Category::Toxicity,
        Category::Harassment,
        Category::Profanity,
        Category::Sentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HateSpeech => "hateSpeech",
            Category::Toxicity => "toxicity",
            Category::Harassment => "harassment",
            Category::Profanity => "profanity",
            Category::Sentiment => "sentiment",
        }
    }
}

/// Result of one category detector. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Final clamped score in 0..=100.
    pub score: u8,
    /// Derived solely from `score` via the fixed breakpoints.
    pub level: Level,
    pub detected: bool,
    /// Human-readable contributing factors, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasoning: Vec<String>,
}

impl CategoryScore {
    /// Clamp a raw running score into 0..=100 and derive the level.
    pub fn from_raw(raw: f32, detected: bool, reasoning: Vec<String>) -> Self {
        let score = raw.round().clamp(0.0, 100.0) as u8;
        Self {
            score,
            level: Level::for_score(score),
            detected,
            reasoning,
        }
    }

    /// An all-zero score with no findings.
    pub fn clean() -> Self {
        Self::from_raw(0.0, false, Vec::new())
    }
}

/// Tonal/contextual markers, computed once per input. Read-only for detectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSignals {
    pub is_sarcastic: bool,
    pub is_ironic: bool,
    pub is_playful: bool,
    pub is_friendly: bool,
    pub is_educational: bool,
    pub is_historical: bool,
    pub is_formal: bool,
}

/// Behavioral intent markers; same lifecycle as `ContextSignals`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSignals {
    pub is_threatening: bool,
    pub is_aggressive: bool,
    pub is_hostile: bool,
    pub is_clear: bool,
    pub is_constructive: bool,
}

/// All five category results with named access (serializes as the
/// `{"hateSpeech": ..., "toxicity": ...}` mapping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub hate_speech: CategoryScore,
    pub toxicity: CategoryScore,
    pub harassment: CategoryScore,
    pub profanity: CategoryScore,
    pub sentiment: CategoryScore,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> &CategoryScore {
        match category {
            Category::HateSpeech => &self.hate_speech,
            Category::Toxicity => &self.toxicity,
            Category::Harassment => &self.harassment,
            Category::Profanity => &self.profanity,
            Category::Sentiment => &self.sentiment,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryScore)> {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Raw scores in the fixed category order.
    pub fn raw(&self) -> [u8; 5] {
        [
            self.hate_speech.score,
            self.toxicity.score,
            self.harassment.score,
            self.profanity.score,
            self.sentiment.score,
        ]
    }
}

/// What kind of content was analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
}

/// Caller-supplied request metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Metadata stamped onto a finished report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: u64,
}

/// The complete result of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Anonymized content hash, stable for identical input.
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    pub categories: CategoryScores,
    pub context: ContextSignals,
    pub intent: IntentSignals,
    pub overall_risk: RiskLevel,
    /// Agreement among detectors, 0..=100.
    pub confidence: u8,
    pub flagged_words: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Deduplicated union of all category reasoning, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasoning: Vec<String>,
    pub metadata: ReportMetadata,
}

/// Where a report came from. Text and image sub-reports are merged into a
/// `Combined` report with an explicit rule rather than ad hoc field mixing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "report", rename_all = "camelCase")]
pub enum AnalysisSource {
    TextOnly(AnalysisReport),
    ImageOnly(AnalysisReport),
    Combined(AnalysisReport),
}

impl AnalysisSource {
    pub fn report(&self) -> &AnalysisReport {
        match self {
            AnalysisSource::TextOnly(r)
            | AnalysisSource::ImageOnly(r)
            | AnalysisSource::Combined(r) => r,
        }
    }
}

/// Merge rule for paired text+image analyses: per category take the maximum
/// score (with its reasoning), average the confidences, keep the stricter
/// overall verdict, union flagged words and deduplicate reasoning.
pub fn merge_sources(text: AnalysisReport, image: AnalysisReport) -> AnalysisSource {
    fn pick(a: &CategoryScore, b: &CategoryScore) -> CategoryScore {
        let mut out = if b.score > a.score { b.clone() } else { a.clone() };
        out.detected = a.detected || b.detected;
        out
    }

    let categories = CategoryScores {
        hate_speech: pick(&text.categories.hate_speech, &image.categories.hate_speech),
        toxicity: pick(&text.categories.toxicity, &image.categories.toxicity),
        harassment: pick(&text.categories.harassment, &image.categories.harassment),
        profanity: pick(&text.categories.profanity, &image.categories.profanity),
        sentiment: pick(&text.categories.sentiment, &image.categories.sentiment),
    };

    let confidence =
        (((text.confidence as u16) + (image.confidence as u16)) / 2).min(100) as u8;
    let overall_risk = text.overall_risk.max(image.overall_risk);

    let mut flagged_words = text.flagged_words.clone();
    flagged_words.extend(image.flagged_words.iter().cloned());

    let mut reasoning = text.reasoning.clone();
    for r in &image.reasoning {
        if !reasoning.contains(r) {
            reasoning.push(r.clone());
        }
    }

    let suggestions = if image.overall_risk > text.overall_risk {
        image.suggestions.clone()
    } else {
        text.suggestions.clone()
    };

    AnalysisSource::Combined(AnalysisReport {
        id: text.id.clone(),
        content: text.content.clone(),
        content_type: ContentType::Text,
        categories,
        // Context/intent come from the text side; vision results carry none.
        context: text.context,
        intent: text.intent,
        overall_risk,
        confidence,
        flagged_words,
        suggestions,
        reasoning,
        metadata: ReportMetadata {
            user_id: text.metadata.user_id.clone(),
            platform: text.metadata.platform.clone(),
            timestamp: text.metadata.timestamp,
            processing_time_ms: text
                .metadata
                .processing_time_ms
                .max(image.metadata.processing_time_ms),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_breakpoints_are_fixed() {
        assert_eq!(Level::for_score(0), Level::Low);
        assert_eq!(Level::for_score(39), Level::Low);
        assert_eq!(Level::for_score(40), Level::Medium);
        assert_eq!(Level::for_score(59), Level::Medium);
        assert_eq!(Level::for_score(60), Level::High);
        assert_eq!(Level::for_score(79), Level::High);
        assert_eq!(Level::for_score(80), Level::Critical);
        assert_eq!(Level::for_score(100), Level::Critical);
    }

    #[test]
    fn level_is_monotonic() {
        for s in 0..100u8 {
            assert!(Level::for_score(s) <= Level::for_score(s + 1));
        }
    }

    #[test]
    fn from_raw_clamps() {
        assert_eq!(CategoryScore::from_raw(140.0, true, vec![]).score, 100);
        assert_eq!(CategoryScore::from_raw(-3.0, false, vec![]).score, 0);
        assert_eq!(CategoryScore::from_raw(79.6, false, vec![]).level, Level::Critical);
    }

    #[test]
    fn serializes_camel_case() {
        let s = CategoryScores {
            hate_speech: CategoryScore::clean(),
            toxicity: CategoryScore::clean(),
            harassment: CategoryScore::clean(),
            profanity: CategoryScore::clean(),
            sentiment: CategoryScore::clean(),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("hateSpeech").is_some());
        assert_eq!(v["toxicity"]["level"], serde_json::json!("low"));
    }

    #[test]
    fn risk_level_ordering_supports_stricter_of() {
        assert!(RiskLevel::Critical > RiskLevel::Danger);
        assert!(RiskLevel::Warning > RiskLevel::Safe);
    }
}
