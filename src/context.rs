//! Context classifier: tonal markers over the normalized text.
//!
//! Each signal is an independent boolean test against one marker set; several
//! signals can hold at once. Precedence between signals belongs to the
//! detectors, not here. Uncategorized text yields all-false signals.

use crate::report::ContextSignals;
use crate::rules::RuleBook;

pub fn classify_context(rules: &RuleBook, normalized: &str) -> ContextSignals {
    let m = &rules.context;
    ContextSignals {
        is_sarcastic: m.sarcastic.matches(normalized),
        is_ironic: m.ironic.matches(normalized),
        is_playful: m.playful.matches(normalized),
        is_friendly: m.friendly.matches(normalized),
        is_educational: m.educational.matches(normalized),
        is_historical: m.historical.matches(normalized),
        is_formal: m.formal.matches(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::normalize;

    fn signals(text: &str) -> ContextSignals {
        let rb = RuleBook::shared_default();
        classify_context(&rb, &normalize(text))
    }

    #[test]
    fn plain_text_yields_all_false() {
        assert_eq!(signals("The cat sat on the mat"), ContextSignals::default());
    }

    #[test]
    fn sarcasm_markers() {
        assert!(signals("Yeah right, that will totally work").is_sarcastic);
        assert!(signals("As if anyone believes that").is_sarcastic);
    }

    #[test]
    fn educational_and_formal_can_coexist() {
        let s = signals("Dear colleagues, according to recent surveys this holds.");
        assert!(s.is_educational);
        assert!(s.is_formal);
    }

    #[test]
    fn friendly_greeting() {
        assert!(signals("Hello, how are you today?").is_friendly);
    }

    #[test]
    fn historical_framing() {
        assert!(signals("In 1942, during the war, this was common.").is_historical);
    }
}
