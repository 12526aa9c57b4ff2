//! Application state for API handlers

use sentinel_guard::ScanEngines;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configured scan engines (dictionary loaded)
    pub engines: ScanEngines,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(engines: ScanEngines) -> Self {
        Self {
            engines,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Uptime as `1h 2m 3s`
    pub fn uptime(&self) -> String {
        let secs = (chrono::Utc::now() - self.started_at).num_seconds().max(0);
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
