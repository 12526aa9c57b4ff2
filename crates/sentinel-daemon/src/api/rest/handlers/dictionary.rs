//! Threat dictionary handler

use crate::api::rest::state::AppState;
use axum::{extract::State, Json};
use sentinel_visual::ThreatEntry;
use serde::{Deserialize, Serialize};

/// Loaded dictionary with the active block threshold
#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryResponse {
    pub count: usize,
    pub block_threshold: f64,
    pub entries: Vec<ThreatEntry>,
}

/// List the loaded threat phrases
pub async fn get_dictionary(State(state): State<AppState>) -> Json<DictionaryResponse> {
    let injection = &state.engines.injection;
    Json(DictionaryResponse {
        count: injection.dictionary().len(),
        block_threshold: injection.matcher().config().block_threshold,
        entries: injection.dictionary().entries().to_vec(),
    })
}
