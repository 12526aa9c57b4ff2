//! Property tests for the normalizer and the threat matcher.

use proptest::prelude::*;
use sentinel_types::{BoundingBox, TextToken};
use sentinel_visual::{Normalizer, ThreatDictionary, ThreatMatcher};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Text mixing ASCII, look-alikes, leetspeak, invisibles and punctuation.
fn arb_obfuscated_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ]{1,8}",
            Just("\u{200B}".to_string()),
            Just("\u{FEFF}".to_string()),
            Just("о".to_string()),
            Just("Ｉ".to_string()),
            Just("é".to_string()),
            Just("@$!.-_".to_string()),
            Just("\t\n".to_string()),
            any::<char>().prop_map(|c| c.to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_token() -> impl Strategy<Value = TextToken> {
    (
        arb_obfuscated_text(),
        prop::option::of((0.0f32..500.0, 0.0f32..500.0, 0.0f32..40.0)),
    )
        .prop_map(|(text, pos)| match pos {
            Some((x, y, h)) => TextToken::positioned(text, BoundingBox::new(x, y, 30.0, h)),
            None => TextToken::new(text),
        })
}

fn arb_tokens() -> impl Strategy<Value = Vec<TextToken>> {
    prop::collection::vec(arb_token(), 0..8)
}

fn arb_phrase() -> impl Strategy<Value = String> {
    "[a-z]{3,8}( [a-z]{3,8}){0,2}"
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

proptest! {
    /// Normalizing already-normalized text changes nothing.
    #[test]
    fn normalization_is_idempotent(tokens in arb_tokens()) {
        let once = Normalizer::normalize(&tokens);
        let twice = Normalizer::normalize(&once.to_tokens());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, Normalizer::normalize_str(twice.as_str()));
    }

    /// Identical input always yields identical output.
    #[test]
    fn normalization_is_deterministic(tokens in arb_tokens()) {
        let cloned = tokens.clone();
        prop_assert_eq!(Normalizer::normalize(&tokens), Normalizer::normalize(&cloned));
    }

    /// Output alphabet is lowercase ASCII letters, digits and single spaces.
    #[test]
    fn output_is_canonical(tokens in arb_tokens()) {
        let text = Normalizer::normalize(&tokens);
        let s = text.as_str();
        prop_assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        prop_assert!(!s.starts_with(' ') && !s.ends_with(' '));
        prop_assert!(!s.contains("  "));
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

proptest! {
    /// Adding a phrase that occurs in the text never lowers the score.
    #[test]
    fn adding_matching_phrase_is_monotone(
        base in prop::collection::btree_map(arb_phrase(), 0.05f64..=1.0, 1..5),
        extra in arb_phrase(),
        extra_weight in 0.05f64..=1.0,
        filler in "[a-z ]{0,20}",
    ) {
        prop_assume!(!base.contains_key(&extra));
        let text = Normalizer::normalize_str(&format!("{} {} {}", filler, extra, filler));

        let before_dict = ThreatDictionary::new(base.clone()).unwrap();
        let mut grown = base.clone();
        grown.insert(extra.clone(), extra_weight);
        let after_dict = ThreatDictionary::new(grown).unwrap();

        let matcher = ThreatMatcher::default();
        let before = matcher.match_text(&text, &before_dict);
        let after = matcher.match_text(&text, &after_dict);

        prop_assert!(after.score >= before.score);
        prop_assert!(after.score >= extra_weight);
        prop_assert!(after.matches.contains(&extra));
    }

    /// Scores stay in [0, 1] and a clean verdict always has score zero.
    #[test]
    fn score_in_unit_range(tokens in arb_tokens()) {
        let dict = ThreatDictionary::builtin().unwrap();
        let verdict = ThreatMatcher::default().match_text(&Normalizer::normalize(&tokens), &dict);
        prop_assert!((0.0..=1.0).contains(&verdict.score));
        if verdict.matched_phrase.is_none() {
            prop_assert_eq!(verdict.score, 0.0);
        }
    }
}
