use serde::{Deserialize, Serialize};

/// A fixed-length embedding produced by an image or text encoder.
///
/// The dimension is fixed by the model (512 for CLIP ViT-B/32). Two vectors
/// are only comparable when their dimensions match; nothing here pads or
/// truncates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Euclidean norm, accumulated in double precision.
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&v| {
                let v = f64::from(v);
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_and_dimension() {
        let v = EmbeddingVector::new(vec![3.0, 4.0]);
        assert_eq!(v.dimension(), 2);
        assert!((v.norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_plain_array() {
        let v = EmbeddingVector::from(vec![0.5, -0.5]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,-0.5]");
        let back: EmbeddingVector = serde_json::from_str("[1.0,2.0,3.0]").unwrap();
        assert_eq!(back.dimension(), 3);
    }

    #[test]
    fn finiteness() {
        assert!(EmbeddingVector::new(vec![1.0, 0.0]).is_finite());
        assert!(!EmbeddingVector::new(vec![1.0, f32::INFINITY]).is_finite());
    }
}
