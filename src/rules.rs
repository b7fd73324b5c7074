// src/rules.rs
//! Rule book: flagged words, context/intent marker sets and per-category
//! pattern tiers, loaded from TOML and compiled once.
//!
//! The rule book is immutable configuration data. Detectors receive it at
//! construction (shared via `Arc`) and never mutate it, so every analysis is
//! a pure function of (text, rule book).

use anyhow::Context as _;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::report::Category;

/// Default rule book shipped with the crate.
pub const DEFAULT_RULES_TOML: &str = include_str!("../config/risk_rules.toml");

/// Optional override: path to an alternative rule book.
pub const ENV_RISK_RULES_PATH: &str = "RISK_RULES_PATH";

static EMBEDDED: Lazy<Arc<RuleBook>> = Lazy::new(|| {
    Arc::new(RuleBook::from_toml_str(DEFAULT_RULES_TOML).expect("valid embedded rule book"))
});

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
struct RuleBookCfg {
    flagged_words: Vec<String>,
    context: ContextMarkersCfg,
    intent: IntentMarkersCfg,
    sentiment: SentimentLexiconCfg,
    hate_speech: TieredCfg,
    toxicity: TieredCfg,
    harassment: TieredCfg,
    profanity: TieredCfg,
}

#[derive(Debug, Clone, Deserialize)]
struct ContextMarkersCfg {
    sarcastic: Vec<String>,
    ironic: Vec<String>,
    playful: Vec<String>,
    friendly: Vec<String>,
    educational: Vec<String>,
    historical: Vec<String>,
    formal: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct IntentMarkersCfg {
    threatening: Vec<String>,
    aggressive: Vec<String>,
    hostile: Vec<String>,
    constructive: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SentimentLexiconCfg {
    negative: Vec<String>,
    positive: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TieredCfg {
    tiers: Vec<TierCfg>,
}

#[derive(Debug, Clone, Deserialize)]
struct TierCfg {
    id: String,
    points: f32,
    patterns: Vec<String>,
}

/* ----------------------------
Compiled structures
---------------------------- */

/// A set of compiled regexes; "matches" means any pattern matches.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    fn compile(label: &str, raw: &[String]) -> anyhow::Result<Self> {
        let patterns = raw
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("pattern set `{label}`: bad regex `{p}`")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// One severity bucket within a category.
#[derive(Debug)]
pub struct Tier {
    pub id: String,
    pub points: f32,
    set: PatternSet,
}

impl Tier {
    pub fn matches(&self, text: &str) -> bool {
        self.set.matches(text)
    }
}

/// Compiled context marker sets, one per signal.
#[derive(Debug)]
pub struct ContextMarkers {
    pub sarcastic: PatternSet,
    pub ironic: PatternSet,
    pub playful: PatternSet,
    pub friendly: PatternSet,
    pub educational: PatternSet,
    pub historical: PatternSet,
    pub formal: PatternSet,
}

/// Compiled intent marker sets.
#[derive(Debug)]
pub struct IntentMarkers {
    pub threatening: PatternSet,
    pub aggressive: PatternSet,
    pub hostile: PatternSet,
    pub constructive: PatternSet,
}

/// Closed positive/negative word lists for the sentiment detector.
#[derive(Debug)]
pub struct SentimentLexicon {
    negative: BTreeSet<String>,
    positive: BTreeSet<String>,
}

impl SentimentLexicon {
    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }
    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }
}

/// The full compiled rule book.
#[derive(Debug)]
pub struct RuleBook {
    flagged_words: BTreeSet<String>,
    pub context: ContextMarkers,
    pub intent: IntentMarkers,
    pub sentiment: SentimentLexicon,
    hate_speech: Vec<Tier>,
    toxicity: Vec<Tier>,
    harassment: Vec<Tier>,
    profanity: Vec<Tier>,
}

impl RuleBook {
    /// Shared default rule book (compiled once from the embedded TOML).
    pub fn shared_default() -> Arc<RuleBook> {
        EMBEDDED.clone()
    }

    /// Load from `RISK_RULES_PATH` if set, otherwise the embedded default.
    pub fn load() -> anyhow::Result<Arc<RuleBook>> {
        match std::env::var(ENV_RISK_RULES_PATH).map(PathBuf::from) {
            Ok(path) => Ok(Arc::new(Self::from_path(&path)?)),
            Err(_) => Ok(Self::shared_default()),
        }
    }

    /// Load from a TOML file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read rule book at {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Build from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: RuleBookCfg = toml::from_str(toml_str).context("rule book TOML")?;

        let compile_tiers = |category: &str, tiers: &[TierCfg]| -> anyhow::Result<Vec<Tier>> {
            tiers
                .iter()
                .map(|t| {
                    let set = PatternSet::compile(&format!("{category}.{}", t.id), &t.patterns)?;
                    Ok(Tier {
                        id: t.id.clone(),
                        points: t.points,
                        set,
                    })
                })
                .collect()
        };

        Ok(Self {
            flagged_words: cfg
                .flagged_words
                .iter()
                .map(|w| w.to_ascii_lowercase())
                .collect(),
            context: ContextMarkers {
                sarcastic: PatternSet::compile("context.sarcastic", &cfg.context.sarcastic)?,
                ironic: PatternSet::compile("context.ironic", &cfg.context.ironic)?,
                playful: PatternSet::compile("context.playful", &cfg.context.playful)?,
                friendly: PatternSet::compile("context.friendly", &cfg.context.friendly)?,
                educational: PatternSet::compile("context.educational", &cfg.context.educational)?,
                historical: PatternSet::compile("context.historical", &cfg.context.historical)?,
                formal: PatternSet::compile("context.formal", &cfg.context.formal)?,
            },
            intent: IntentMarkers {
                threatening: PatternSet::compile("intent.threatening", &cfg.intent.threatening)?,
                aggressive: PatternSet::compile("intent.aggressive", &cfg.intent.aggressive)?,
                hostile: PatternSet::compile("intent.hostile", &cfg.intent.hostile)?,
                constructive: PatternSet::compile("intent.constructive", &cfg.intent.constructive)?,
            },
            sentiment: SentimentLexicon {
                negative: cfg
                    .sentiment
                    .negative
                    .iter()
                    .map(|w| w.to_ascii_lowercase())
                    .collect(),
                positive: cfg
                    .sentiment
                    .positive
                    .iter()
                    .map(|w| w.to_ascii_lowercase())
                    .collect(),
            },
            hate_speech: compile_tiers("hate_speech", &cfg.hate_speech.tiers)?,
            toxicity: compile_tiers("toxicity", &cfg.toxicity.tiers)?,
            harassment: compile_tiers("harassment", &cfg.harassment.tiers)?,
            profanity: compile_tiers("profanity", &cfg.profanity.tiers)?,
        })
    }

    /// Pattern tiers for a category. Sentiment has none (word-list based).
    pub fn tiers(&self, category: Category) -> &[Tier] {
        match category {
            Category::HateSpeech => &self.hate_speech,
            Category::Toxicity => &self.toxicity,
            Category::Harassment => &self.harassment,
            Category::Profanity => &self.profanity,
            Category::Sentiment => &[],
        }
    }

    pub fn is_flagged_word(&self, token: &str) -> bool {
        self.flagged_words.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_rule_book_compiles() {
        let rb = RuleBook::shared_default();
        assert!(!rb.tiers(Category::HateSpeech).is_empty());
        assert!(!rb.tiers(Category::Toxicity).is_empty());
        assert!(!rb.tiers(Category::Harassment).is_empty());
        assert!(!rb.tiers(Category::Profanity).is_empty());
        assert!(rb.tiers(Category::Sentiment).is_empty());
        assert!(rb.is_flagged_word("hate"));
    }

    #[test]
    fn tiers_are_ordered_by_severity() {
        let rb = RuleBook::shared_default();
        for cat in [
            Category::HateSpeech,
            Category::Toxicity,
            Category::Harassment,
            Category::Profanity,
        ] {
            let tiers = rb.tiers(cat);
            for pair in tiers.windows(2) {
                assert!(pair[0].points >= pair[1].points, "{:?}", cat);
            }
        }
    }

    #[test]
    fn bad_regex_is_reported_with_its_tier() {
        let toml_str = r#"
flagged_words = []
[context]
sarcastic = []
ironic = []
playful = []
friendly = []
educational = []
historical = []
formal = []
[intent]
threatening = []
aggressive = []
hostile = []
constructive = []
[sentiment]
negative = []
positive = []
[[hate_speech.tiers]]
id = "direct"
points = 75
patterns = ['(unclosed']
[toxicity]
tiers = []
[harassment]
tiers = []
[profanity]
tiers = []
"#;
        let err = RuleBook::from_toml_str(toml_str).unwrap_err();
        assert!(format!("{err:#}").contains("hate_speech.direct"));
    }

    #[test]
    fn direct_hate_tier_matches_sample() {
        let rb = RuleBook::shared_default();
        let direct = &rb.tiers(Category::HateSpeech)[0];
        assert_eq!(direct.id, "direct");
        assert!(direct.matches("i hate all people of this race"));
        assert!(!direct.matches("i love all people"));
    }
}
