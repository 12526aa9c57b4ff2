//! Threat dictionary: canonical phrase → severity weight.
//!
//! The dictionary is built and validated once, before any scan, and is
//! read-only afterwards. Share it with `Arc`; every scan takes it by
//! reference.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use aho_corasick::AhoCorasick;
use sentinel_types::{SentinelError, SentinelResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::normalizer::Normalizer;

const BUILTIN_TSV: &str = include_str!("../data/default_threats.tsv");

/// Weight used when a source gives a phrase without one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One dictionary entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreatEntry {
    /// Canonical (normalized) phrase
    pub phrase: String,
    /// Severity in (0, 1]
    pub weight: f64,
}

/// Immutable phrase dictionary with prebuilt multi-pattern automata.
///
/// `compact` holds the same patterns, in the same order, with the spaces
/// removed. It catches phrases whose every letter was spaced out, which the
/// normalizer merges into a single word.
#[derive(Clone, Debug)]
pub struct ThreatDictionary {
    entries: Vec<ThreatEntry>,
    automaton: AhoCorasick,
    compact: AhoCorasick,
}

impl ThreatDictionary {
    /// Build from `(phrase, weight)` pairs.
    ///
    /// Phrases are normalized so they compare against normalized frame text.
    /// Fails on an empty source, a phrase that normalizes to nothing, a
    /// duplicate canonical phrase, or a weight outside (0, 1].
    pub fn new<I, S>(pairs: I) -> SentinelResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (raw, weight) in pairs {
            let raw = raw.as_ref();
            let phrase = Normalizer::normalize_str(raw).into_string();
            if phrase.is_empty() {
                return Err(SentinelError::config(format!(
                    "threat phrase {:?} is empty after normalization",
                    raw
                )));
            }
            if !(weight.is_finite() && weight > 0.0 && weight <= 1.0) {
                return Err(SentinelError::config(format!(
                    "weight {} for threat phrase {:?} is outside (0, 1]",
                    weight, phrase
                )));
            }
            if !seen.insert(phrase.clone()) {
                return Err(SentinelError::config(format!(
                    "duplicate threat phrase {:?}",
                    phrase
                )));
            }
            entries.push(ThreatEntry { phrase, weight });
        }

        if entries.is_empty() {
            return Err(SentinelError::config("threat dictionary is empty"));
        }

        entries.sort_by(|a, b| a.phrase.cmp(&b.phrase));
        let automaton = AhoCorasick::new(entries.iter().map(|e| e.phrase.as_str()))
            .map_err(|e| SentinelError::config(format!("cannot build phrase matcher: {}", e)))?;
        let compact = AhoCorasick::new(entries.iter().map(|e| strip_spaces(&e.phrase)))
            .map_err(|e| SentinelError::config(format!("cannot build phrase matcher: {}", e)))?;

        info!(entries = entries.len(), "threat dictionary loaded");
        Ok(Self {
            entries,
            automaton,
            compact,
        })
    }

    /// Build from bare phrases, each with [`DEFAULT_WEIGHT`].
    pub fn from_phrases<I, S>(phrases: I) -> SentinelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(phrases.into_iter().map(|p| (p, DEFAULT_WEIGHT)))
    }

    /// The default phrase list shipped with Sentinel.
    pub fn builtin() -> SentinelResult<Self> {
        Self::parse_tsv(BUILTIN_TSV)
    }

    /// Parse line-delimited `phrase<TAB>weight` text.
    ///
    /// The weight column is optional. Blank lines and lines starting with
    /// `#` are ignored.
    pub fn parse_tsv(source: &str) -> SentinelResult<Self> {
        let mut pairs = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (phrase, weight) = match line.rsplit_once('\t') {
                Some((phrase, weight)) => {
                    let weight = weight.trim().parse::<f64>().map_err(|e| {
                        SentinelError::config(format!(
                            "line {}: invalid weight {:?}: {}",
                            idx + 1,
                            weight,
                            e
                        ))
                    })?;
                    (phrase.trim(), weight)
                }
                None => (line, DEFAULT_WEIGHT),
            };
            pairs.push((phrase.to_string(), weight));
        }
        Self::new(pairs)
    }

    /// Parse a JSON object mapping phrase to weight.
    pub fn from_json_str(source: &str) -> SentinelResult<Self> {
        let map: BTreeMap<String, f64> = serde_json::from_str(source)
            .map_err(|e| SentinelError::config(format!("invalid JSON dictionary: {}", e)))?;
        Self::new(map)
    }

    /// Parse a YAML mapping of phrase to weight.
    pub fn from_yaml_str(source: &str) -> SentinelResult<Self> {
        let map: BTreeMap<String, f64> = serde_yaml::from_str(source)
            .map_err(|e| SentinelError::config(format!("invalid YAML dictionary: {}", e)))?;
        Self::new(map)
    }

    /// Load from a file, picking the format from its extension:
    /// `.json`, `.yaml`/`.yml`, anything else is tab-separated text.
    pub fn load(path: impl AsRef<Path>) -> SentinelResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            SentinelError::config(format!(
                "cannot read threat dictionary {}: {}",
                path.display(),
                e
            ))
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&source),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&source),
            _ => Self::parse_tsv(&source),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: an empty dictionary is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by phrase.
    pub fn entries(&self) -> &[ThreatEntry] {
        &self.entries
    }

    /// Weight of a phrase, looked up by its canonical form.
    pub fn weight(&self, phrase: &str) -> Option<f64> {
        let canonical = Normalizer::normalize_str(phrase);
        self.entries
            .binary_search_by(|e| e.phrase.as_str().cmp(canonical.as_str()))
            .ok()
            .map(|i| self.entries[i].weight)
    }

    /// Every entry whose phrase occurs in any of `texts`, each reported once,
    /// in phrase order.
    ///
    /// A phrase also counts when it occurs once all spaces are dropped from
    /// both sides, so `ignoreprevious` matches `ignore previous`.
    pub(crate) fn find_in<'t>(
        &self,
        texts: impl IntoIterator<Item = &'t str>,
    ) -> Vec<&ThreatEntry> {
        let mut hit = vec![false; self.entries.len()];
        for text in texts {
            for m in self.automaton.find_overlapping_iter(text) {
                hit[m.pattern().as_usize()] = true;
            }
            for m in self.compact.find_overlapping_iter(&strip_spaces(text)) {
                hit[m.pattern().as_usize()] = true;
            }
        }
        self.entries
            .iter()
            .zip(hit)
            .filter_map(|(entry, hit)| hit.then_some(entry))
            .collect()
    }
}

fn strip_spaces(text: &str) -> String {
    text.chars().filter(|&c| c != ' ').collect()
}
