//! Intent classifier: behavioral markers plus two structural heuristics.
//!
//! Marker sets cover threats, aggression and hostility. `is_clear` and
//! `is_constructive` are structural: clarity needs more than five words and
//! terminal punctuation; constructiveness needs solution-oriented vocabulary.

use crate::preprocess::{has_terminal_punctuation, word_count};
use crate::report::IntentSignals;
use crate::rules::RuleBook;

/// Clarity requires strictly more words than this.
const CLARITY_MIN_WORDS: usize = 5;

pub fn classify_intent(rules: &RuleBook, normalized: &str) -> IntentSignals {
    let m = &rules.intent;
    IntentSignals {
        is_threatening: m.threatening.matches(normalized),
        is_aggressive: m.aggressive.matches(normalized),
        is_hostile: m.hostile.matches(normalized),
        is_clear: word_count(normalized) > CLARITY_MIN_WORDS
            && has_terminal_punctuation(normalized),
        is_constructive: m.constructive.matches(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::normalize;

    fn signals(text: &str) -> IntentSignals {
        let rb = RuleBook::shared_default();
        classify_intent(&rb, &normalize(text))
    }

    #[test]
    fn neutral_text_has_no_behavioral_flags() {
        let s = signals("The weather is fine");
        assert!(!s.is_threatening);
        assert!(!s.is_aggressive);
        assert!(!s.is_hostile);
    }

    #[test]
    fn threat_markers() {
        assert!(signals("Do it now, or else.").is_threatening);
        assert!(signals("I will find you tomorrow").is_threatening);
    }

    #[test]
    fn aggression_markers() {
        assert!(signals("Just shut up already").is_aggressive);
    }

    #[test]
    fn clarity_needs_length_and_punctuation() {
        // 6+ words with a full stop: clear.
        assert!(signals("This sentence has six whole words.").is_clear);
        // Short, even with punctuation: not clear.
        assert!(!signals("Nope.").is_clear);
        // Long but no terminal punctuation: not clear.
        assert!(!signals("this ramble never actually ends anywhere at all").is_clear);
    }

    #[test]
    fn constructive_vocabulary() {
        assert!(signals("I suggest you rephrase this to improve it.").is_constructive);
        assert!(!signals("This is just bad").is_constructive);
    }
}
