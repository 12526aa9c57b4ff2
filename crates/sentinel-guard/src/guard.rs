use std::sync::Arc;

use chrono::{DateTime, Utc};
use sentinel_types::{RiskVerdict, SimilarityDecision, SimilarityVerdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::collaborators::{Frame, ImageEncoder, OcrProvider, TextEncoder};
use crate::config::{ScanEngines, SentinelConfig};
use crate::error::GuardResult;

/// Result of screening one frame with both engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_label: Option<String>,
    pub scanned_at: DateTime<Utc>,
    pub injection: RiskVerdict,
    /// Absent when no transcript was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_modal: Option<SimilarityVerdict>,
}

impl ScanReport {
    /// True when either engine raised a signal.
    pub fn is_flagged(&self) -> bool {
        self.injection.is_blocked() || self.cross_modal.is_some_and(|v| v.is_mismatch())
    }
}

/// Screens frames by running collaborators and feeding the engines.
///
/// The engines stay synchronous and pure; all I/O lives in the collaborators.
#[derive(Clone)]
pub struct SentinelGuard {
    engines: ScanEngines,
    ocr: Arc<dyn OcrProvider>,
    image_encoder: Arc<dyn ImageEncoder>,
    text_encoder: Arc<dyn TextEncoder>,
}

impl SentinelGuard {
    pub fn new(
        engines: ScanEngines,
        ocr: Arc<dyn OcrProvider>,
        image_encoder: Arc<dyn ImageEncoder>,
        text_encoder: Arc<dyn TextEncoder>,
    ) -> Self {
        Self {
            engines,
            ocr,
            image_encoder,
            text_encoder,
        }
    }

    /// Load configuration (defaults, optional file, environment), build the
    /// engines and attach the collaborators.
    pub fn from_config(
        path: Option<&str>,
        ocr: Arc<dyn OcrProvider>,
        image_encoder: Arc<dyn ImageEncoder>,
        text_encoder: Arc<dyn TextEncoder>,
    ) -> GuardResult<Self> {
        let engines = SentinelConfig::load(path)?.build_engines()?;
        Ok(Self::new(engines, ocr, image_encoder, text_encoder))
    }

    pub fn engines(&self) -> &ScanEngines {
        &self.engines
    }

    /// OCR the frame and run Engine D over the tokens.
    #[instrument(skip(self, frame), fields(frame = frame.label.as_deref().unwrap_or("-")))]
    pub async fn detect_injection(&self, frame: &Frame) -> GuardResult<RiskVerdict> {
        let tokens = self.ocr.recognize(frame).await?;
        debug!(tokens = tokens.len(), "OCR complete");
        Ok(self.engines.injection.scan_frame(&tokens))
    }

    /// Embed frame and transcript and run Engine E.
    ///
    /// A blank transcript carries no evidence of consistency: it is reported
    /// as a mismatch with score 0 and no encoder is called.
    #[instrument(
        skip(self, frame, transcript),
        fields(frame = frame.label.as_deref().unwrap_or("-"))
    )]
    pub async fn check_cross_modal(
        &self,
        frame: &Frame,
        transcript: &str,
    ) -> GuardResult<SimilarityVerdict> {
        if transcript.trim().is_empty() {
            debug!("empty transcript, skipping encoders");
            return Ok(SimilarityVerdict {
                score: 0.0,
                decision: SimilarityDecision::Mismatch,
            });
        }

        let (image, text) = tokio::try_join!(
            self.image_encoder.encode_image(frame),
            self.text_encoder.encode_text(transcript),
        )?;
        Ok(self.engines.cross_modal.scan_cross_modal(&image, &text)?)
    }

    /// Run both checks concurrently and assemble a report.
    ///
    /// The cross-modal check only runs when a transcript is supplied. The
    /// first failure aborts the scan.
    pub async fn scan(&self, frame: &Frame, transcript: Option<&str>) -> GuardResult<ScanReport> {
        let scan_id = Uuid::new_v4();
        let cross_modal = async {
            match transcript {
                Some(text) => self.check_cross_modal(frame, text).await.map(Some),
                None => Ok(None),
            }
        };
        let (injection, cross_modal) =
            tokio::try_join!(self.detect_injection(frame), cross_modal)?;

        let report = ScanReport {
            scan_id,
            frame_label: frame.label.clone(),
            scanned_at: Utc::now(),
            injection,
            cross_modal,
        };

        if report.is_flagged() {
            warn!(
                scan_id = %report.scan_id,
                blocked = report.injection.is_blocked(),
                mismatch = report.cross_modal.is_some_and(|v| v.is_mismatch()),
                "frame flagged"
            );
        } else {
            info!(scan_id = %report.scan_id, "frame passed");
        }
        Ok(report)
    }
}

impl std::fmt::Debug for SentinelGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentinelGuard")
            .field("engines", &self.engines)
            .finish_non_exhaustive()
    }
}
