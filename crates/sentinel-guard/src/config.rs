//! Configuration for the scan engines

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sentinel_crossmodal::{CrossModalEngine, SimilarityConfig, SimilarityScorer};
use sentinel_types::SentinelResult;
use sentinel_visual::{InjectionEngine, MatcherConfig, ThreatDictionary, ThreatMatcher};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Engine configuration shared by the daemon, the CLI and embedding callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentinelConfig {
    /// Threat dictionary source
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Engine D thresholds
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Engine E thresholds
    #[serde(default)]
    pub similarity: SimilarityConfig,
}

/// Where the threat dictionary comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// `.tsv`, `.json` or `.yaml` file; the built-in phrase set when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SentinelConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `SENTINEL__*` environment variables (`SENTINEL__SIMILARITY__THRESHOLD`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&SentinelConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SENTINEL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Use the dictionary at `path` instead of the configured one.
    pub fn with_dictionary_path(mut self, path: impl AsRef<Path>) -> Self {
        self.dictionary.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Check every threshold without loading anything.
    pub fn validate(&self) -> SentinelResult<()> {
        self.matcher.validate()?;
        self.similarity.validate()
    }

    /// Load the configured threat dictionary.
    pub fn load_dictionary(&self) -> SentinelResult<ThreatDictionary> {
        match &self.dictionary.path {
            Some(path) => ThreatDictionary::load(path),
            None => ThreatDictionary::builtin(),
        }
    }

    /// Build both engines. Any configuration error here must stop startup.
    pub fn build_engines(&self) -> SentinelResult<ScanEngines> {
        self.validate()?;
        let dictionary = Arc::new(self.load_dictionary()?);
        let matcher = ThreatMatcher::new(self.matcher.clone())?;
        let scorer = SimilarityScorer::new(self.similarity.clone())?;

        info!(
            phrases = dictionary.len(),
            block_threshold = self.matcher.block_threshold,
            similarity_threshold = self.similarity.threshold,
            "Scan engines ready"
        );

        Ok(ScanEngines {
            injection: InjectionEngine::new(dictionary, matcher),
            cross_modal: CrossModalEngine::new(scorer),
        })
    }
}

/// Both engines, configured and ready. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ScanEngines {
    pub injection: InjectionEngine,
    pub cross_modal: CrossModalEngine,
}

impl ScanEngines {
    pub fn new(injection: InjectionEngine, cross_modal: CrossModalEngine) -> Self {
        Self {
            injection,
            cross_modal,
        }
    }

    /// Built-in dictionary with default thresholds.
    pub fn builtin() -> SentinelResult<Self> {
        SentinelConfig::default().build_engines()
    }
}
