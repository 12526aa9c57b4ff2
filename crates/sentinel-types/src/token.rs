use serde::{Deserialize, Serialize};

/// Axis-aligned box locating a token in its frame.
///
/// The origin is the top-left corner; y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the origin can be used to sort tokens.
    pub fn has_usable_origin(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A piece of text recognised by the OCR collaborator.
///
/// Tokens are immutable once produced. Position and confidence are optional:
/// a token without a usable position still takes part in matching, it only
/// loses its say in reading order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextToken {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bbox: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f32>,
}

impl TextToken {
    /// Token with no provenance.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox: None,
            confidence: None,
        }
    }

    /// Token located at `bbox`.
    pub fn positioned(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox: Some(bbox),
            confidence: None,
        }
    }

    /// Attach an OCR confidence score.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }

    /// Bounding box only if its origin is finite.
    pub fn usable_bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref().filter(|b| b.has_usable_origin())
    }
}

impl From<&str> for TextToken {
    fn from(text: &str) -> Self {
        TextToken::new(text)
    }
}

impl From<String> for TextToken {
    fn from(text: String) -> Self {
        TextToken::new(text)
    }
}
