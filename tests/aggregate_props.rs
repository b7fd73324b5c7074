// tests/aggregate_props.rs
//
// Property-style checks over the aggregator: monotonicity in each category
// score and the contextual dampening law, driven by random score vectors.

use content_risk_engine::{
    aggregate, Category, CategoryScore, CategoryScores, ContextSignals, IntentSignals,
};
use rand::prelude::*;

fn scores_from(raw: [u8; 5]) -> CategoryScores {
    let mk = |s: u8| CategoryScore::from_raw(s as f32, false, Vec::new());
    CategoryScores {
        hate_speech: mk(raw[0]),
        toxicity: mk(raw[1]),
        harassment: mk(raw[2]),
        profanity: mk(raw[3]),
        sentiment: mk(raw[4]),
    }
}

#[test]
fn overall_risk_is_monotone_in_each_category() {
    let mut rng = StdRng::seed_from_u64(42);
    let neutral_ctx = ContextSignals::default();
    let neutral_intent = IntentSignals::default();

    for _ in 0..500 {
        let mut raw = [0u8; 5];
        raw.iter_mut().for_each(|s| *s = rng.random_range(0..=100));
        let base = aggregate(&scores_from(raw), &neutral_ctx, &neutral_intent);

        for (i, _) in Category::ALL.iter().enumerate() {
            if raw[i] == 100 {
                continue;
            }
            let mut bumped = raw;
            bumped[i] = rng.random_range(raw[i]..=100);
            let higher = aggregate(&scores_from(bumped), &neutral_ctx, &neutral_intent);
            assert!(
                higher.overall_risk >= base.overall_risk,
                "raising {:?} from {} to {} lowered the verdict",
                Category::ALL[i],
                raw[i],
                bumped[i]
            );
        }
    }
}

#[test]
fn sarcasm_never_raises_the_verdict() {
    let mut rng = StdRng::seed_from_u64(7);
    let neutral_intent = IntentSignals::default();

    for _ in 0..500 {
        let mut raw = [0u8; 5];
        raw.iter_mut().for_each(|s| *s = rng.random_range(0..=100));
        let scores = scores_from(raw);

        let plain = aggregate(&scores, &ContextSignals::default(), &neutral_intent);
        let sarcastic = aggregate(
            &scores,
            &ContextSignals {
                is_sarcastic: true,
                ..Default::default()
            },
            &neutral_intent,
        );
        assert!(sarcastic.overall_risk <= plain.overall_risk);
    }
}

#[test]
fn equal_scores_beat_spread_scores_on_confidence() {
    let mut rng = StdRng::seed_from_u64(99);
    let neutral_ctx = ContextSignals::default();
    let neutral_intent = IntentSignals::default();

    for _ in 0..200 {
        let level: u8 = rng.random_range(0..=100);
        let agreed = aggregate(
            &scores_from([level; 5]),
            &neutral_ctx,
            &neutral_intent,
        );
        assert_eq!(agreed.confidence, 100);

        let spread = aggregate(
            &scores_from([100, 0, 0, 0, 0]),
            &neutral_ctx,
            &neutral_intent,
        );
        assert!(spread.confidence < 100);
    }
}
