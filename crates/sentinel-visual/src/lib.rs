//! # sentinel-visual
//!
//! Engine D: detection of textual prompt-injection hidden in image or video
//! frames.
//!
//! The OCR collaborator supplies an ordered list of [`TextToken`]s per frame.
//! This crate never runs OCR itself; it:
//!
//! 1. folds the tokens into canonical text ([`Normalizer`]), defeating
//!    split words, invisible characters, homoglyphs, leetspeak and
//!    letter-spacing (ambiguous digits yield more than one reading),
//! 2. matches the text against a read-only [`ThreatDictionary`]
//!    ([`ThreatMatcher`]),
//! 3. emits a [`RiskVerdict`](sentinel_types::RiskVerdict).
//!
//! ```
//! use std::sync::Arc;
//! use sentinel_types::{RiskDecision, TextToken};
//! use sentinel_visual::{InjectionEngine, ThreatDictionary};
//!
//! let dictionary = Arc::new(ThreatDictionary::builtin().unwrap());
//! let engine = InjectionEngine::with_dictionary(dictionary);
//!
//! let tokens = [TextToken::new("1GN0RE"), TextToken::new("PREV1OUS")];
//! assert_eq!(engine.scan_frame(&tokens).decision, RiskDecision::Block);
//! ```
//!
//! [`TextToken`]: sentinel_types::TextToken

pub mod dictionary;
pub mod engine;
pub mod matcher;
pub mod normalizer;

pub use dictionary::{ThreatDictionary, ThreatEntry, DEFAULT_WEIGHT};
pub use engine::{scan_frame, InjectionEngine, NO_READABLE_TEXT};
pub use matcher::{match_text, MatcherConfig, ThreatMatcher};
pub use normalizer::{normalize, NormalizedText, Normalizer};
