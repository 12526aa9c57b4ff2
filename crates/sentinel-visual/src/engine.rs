use std::sync::Arc;

use sentinel_types::{RiskVerdict, TextToken};
use tracing::{debug, warn};

use crate::dictionary::ThreatDictionary;
use crate::matcher::ThreatMatcher;
use crate::normalizer::{NormalizedText, Normalizer};

/// Reason given when a frame yields no text to match.
pub const NO_READABLE_TEXT: &str = "No readable text detected in image.";

/// Engine D: OCR tokens → normalized text → risk verdict.
///
/// Holds the shared dictionary and the configured matcher. Stateless across
/// calls and safe to share between threads.
#[derive(Clone, Debug)]
pub struct InjectionEngine {
    dictionary: Arc<ThreatDictionary>,
    matcher: ThreatMatcher,
}

impl InjectionEngine {
    pub fn new(dictionary: Arc<ThreatDictionary>, matcher: ThreatMatcher) -> Self {
        Self {
            dictionary,
            matcher,
        }
    }

    /// Engine with the default matcher configuration.
    pub fn with_dictionary(dictionary: Arc<ThreatDictionary>) -> Self {
        Self::new(dictionary, ThreatMatcher::default())
    }

    pub fn dictionary(&self) -> &Arc<ThreatDictionary> {
        &self.dictionary
    }

    pub fn matcher(&self) -> &ThreatMatcher {
        &self.matcher
    }

    /// Scan the OCR tokens of one frame.
    pub fn scan_frame(&self, tokens: &[TextToken]) -> RiskVerdict {
        self.scan(tokens).0
    }

    /// Scan one frame and explain the verdict.
    ///
    /// A frame whose text normalizes to nothing gets [`NO_READABLE_TEXT`]
    /// as its reason; every other verdict explains itself.
    pub fn scan_frame_with_reason(&self, tokens: &[TextToken]) -> (RiskVerdict, String) {
        let (verdict, readable) = self.scan(tokens);
        let reason = if readable {
            verdict.reason()
        } else {
            NO_READABLE_TEXT.to_string()
        };
        (verdict, reason)
    }

    /// Verdict, and whether any text survived normalization.
    fn scan(&self, tokens: &[TextToken]) -> (RiskVerdict, bool) {
        let readings = Normalizer::readings(tokens);
        let verdict = self.matcher.match_readings(&readings, &self.dictionary);
        let normalized_len = readings.first().map_or(0, NormalizedText::len);

        debug!(
            tokens = tokens.len(),
            normalized_len,
            readings = readings.len(),
            score = verdict.score,
            "frame scanned"
        );
        if verdict.is_blocked() {
            warn!(
                phrase = verdict.matched_phrase.as_deref().unwrap_or_default(),
                score = verdict.score,
                "prompt injection detected in frame text"
            );
        }
        (verdict, normalized_len > 0)
    }
}

/// Scan one frame against `dictionary` with the default matcher.
pub fn scan_frame(tokens: &[TextToken], dictionary: &ThreatDictionary) -> RiskVerdict {
    ThreatMatcher::default().match_readings(&Normalizer::readings(tokens), dictionary)
}
