//! Scan and normalization handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, Json};
use sentinel_types::{EmbeddingVector, RiskVerdict, SimilarityVerdict, TextToken};
use sentinel_visual::Normalizer;
use serde::{Deserialize, Serialize};

/// Frame scan request: OCR tokens of one frame
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanFrameRequest {
    pub tokens: Vec<TextToken>,
}

/// Frame scan response
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanFrameResponse {
    #[serde(flatten)]
    pub verdict: RiskVerdict,
    pub reason: String,
}

/// Run Engine D over one frame's tokens
pub async fn scan_frame(
    State(state): State<AppState>,
    Json(request): Json<ScanFrameRequest>,
) -> Json<ScanFrameResponse> {
    let (verdict, reason) = state.engines.injection.scan_frame_with_reason(&request.tokens);
    Json(ScanFrameResponse { verdict, reason })
}

/// Cross-modal request: both embeddings from the same space
#[derive(Debug, Serialize, Deserialize)]
pub struct CrossModalRequest {
    pub frame_embedding: EmbeddingVector,
    pub transcript_embedding: EmbeddingVector,
}

/// Run Engine E over a frame/transcript embedding pair
pub async fn scan_cross_modal(
    State(state): State<AppState>,
    Json(request): Json<CrossModalRequest>,
) -> ApiResult<Json<SimilarityVerdict>> {
    let verdict = state
        .engines
        .cross_modal
        .scan_cross_modal(&request.frame_embedding, &request.transcript_embedding)?;
    Ok(Json(verdict))
}

/// Normalization request: OCR tokens or raw text
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub tokens: Option<Vec<TextToken>>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Normalization response
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}

/// Show the canonical form the matcher sees
pub async fn normalize(
    Json(request): Json<NormalizeRequest>,
) -> ApiResult<Json<NormalizeResponse>> {
    let normalized = match (request.tokens, request.text) {
        (Some(tokens), None) => Normalizer::normalize(&tokens),
        (None, Some(text)) => Normalizer::normalize_str(&text),
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "provide either `tokens` or `text`, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "one of `tokens` or `text` is required".to_string(),
            ))
        }
    };
    Ok(Json(NormalizeResponse {
        normalized: normalized.into_string(),
    }))
}
