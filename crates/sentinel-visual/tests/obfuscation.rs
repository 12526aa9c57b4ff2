//! End-to-end frame scans against obfuscated injections.

use std::sync::Arc;

use sentinel_types::{BoundingBox, RiskDecision, SentinelError, TextToken};
use sentinel_visual::{scan_frame, InjectionEngine, ThreatDictionary};

fn words(ws: &[&str]) -> Vec<TextToken> {
    ws.iter().map(|w| TextToken::new(*w)).collect()
}

fn engine() -> InjectionEngine {
    let dict = ThreatDictionary::from_phrases([
        "ignore previous instructions",
        "ignore previous",
        "system override",
        "transfer funds",
        "reveal secrets",
    ])
    .unwrap();
    InjectionEngine::with_dictionary(Arc::new(dict))
}

#[test]
fn injection_split_across_three_tokens_is_blocked() {
    let dict = ThreatDictionary::from_phrases(["ignore previous instructions"]).unwrap();
    let verdict = scan_frame(&words(&["IGNORE", "PREVIOUS", "INSTRUCTIONS"]), &dict);
    assert_eq!(verdict.score, 1.0);
    assert_eq!(verdict.decision, RiskDecision::Block);
}

#[test]
fn benign_text_passes() {
    let dict = ThreatDictionary::from_phrases(["ignore previous instructions"]).unwrap();
    let verdict = scan_frame(&words(&["Hello", "World"]), &dict);
    assert_eq!(verdict.score, 0.0);
    assert_eq!(verdict.decision, RiskDecision::Pass);
}

#[test]
fn empty_dictionary_fails_at_load() {
    let err = ThreatDictionary::from_phrases(Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, SentinelError::Configuration(_)));
}

#[test]
fn obfuscated_variants_are_blocked() {
    let engine = engine();
    let cases: &[&[&str]] = &[
        &["1gn0r3 pr3v10u5 1n5truct10n5"],
        &["i g n o r e", "previous"],
        &["ig\u{200B}nore", "prev\u{200D}ious"],
        &["\u{0456}gn\u{043E}r\u{0435}", "\u{0440}r\u{0435}v\u{0456}\u{043E}us"],
        &["ＳＹＳＴＥＭ", "ＯＶＥＲＲＩＤＥ"],
        &["tr@n$fer_funds"],
        &["reveal.", "secrets!"],
        &["REV\u{E0020}EAL SECRETS"],
        &["I G N O R E   P R E V I O U S"],
        &["S Y S T E M", "O V E R R I D E"],
        &["REVEA1", "SECRETS"],
    ];
    for case in cases {
        let verdict = engine.scan_frame(&words(case));
        assert!(verdict.is_blocked(), "not blocked: {:?}", case);
        assert_eq!(verdict.score, 1.0);
    }
}

#[test]
fn most_specific_phrase_is_reported() {
    let verdict = engine().scan_frame(&words(&["ignore", "previous", "instructions"]));
    assert_eq!(
        verdict.matched_phrase.as_deref(),
        Some("ignore previous instructions")
    );
    assert_eq!(
        verdict.matches,
        vec!["ignore previous", "ignore previous instructions"]
    );
}

#[test]
fn layout_order_reconstructs_sentence() {
    // OCR returned boxes column-major; layout is two lines
    let tokens = vec![
        TextToken::positioned("override", BoundingBox::new(80.0, 52.0, 70.0, 18.0)),
        TextToken::positioned("Quarterly", BoundingBox::new(0.0, 10.0, 70.0, 18.0)),
        TextToken::positioned("system", BoundingBox::new(0.0, 50.0, 70.0, 18.0)),
        TextToken::positioned("report", BoundingBox::new(80.0, 11.0, 70.0, 18.0)),
    ];
    let verdict = engine().scan_frame(&tokens);
    assert!(verdict.is_blocked());
    assert_eq!(verdict.matched_phrase.as_deref(), Some("system override"));
}

#[test]
fn builtin_dictionary_covers_default_phrases() {
    let dict = ThreatDictionary::builtin().unwrap();
    for phrase in [
        "ignore previous",
        "system override",
        "transfer funds",
        "bypass safety",
        "disable guardrails",
        "override policy",
        "reveal secrets",
    ] {
        let verdict = scan_frame(&[TextToken::new(phrase.to_uppercase())], &dict);
        assert!(verdict.is_blocked(), "{phrase} not blocked");
    }
}
