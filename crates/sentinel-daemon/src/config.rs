//! Configuration for sentineld

use sentinel_crossmodal::SimilarityConfig;
use sentinel_guard::{DictionaryConfig, SentinelConfig};
use sentinel_visual::MatcherConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main daemon configuration
///
/// Engine sections share their keys with [`SentinelConfig`], so the same
/// file and `SENTINEL__*` variables drive both the daemon and the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

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

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            enable_cors: true,
            max_body_size: default_max_body_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8090))
}

fn default_true() -> bool {
    true
}

fn default_max_body_size() -> usize {
    // Two 2048-dimension embeddings as JSON fit comfortably
    2 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with SENTINEL__ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("SENTINEL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Engine configuration view
    pub fn engine(&self) -> SentinelConfig {
        SentinelConfig {
            dictionary: self.dictionary.clone(),
            matcher: self.matcher.clone(),
            similarity: self.similarity.clone(),
        }
    }
}
