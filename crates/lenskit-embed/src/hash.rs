//! Deterministic hash-based embeddings
//!
//! Each component is a seeded hash of the input text, and the vector is scaled
//! to unit length. Vectors are stable within a build, carry no semantics, and
//! need no model files or network, which makes them suitable for dry runs.

use crate::EmbedError;
use lenskit_domain::traits::EmbeddingModel;
use lenskit_domain::Embedding;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash-based embedding model
#[derive(Debug, Clone)]
pub struct HashEmbeddingModel {
    dimension: usize,
}

impl HashEmbeddingModel {
    /// Create a model producing vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn component(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let unit = hasher.finish() as f64 / u64::MAX as f64;
        (unit * 2.0 - 1.0) as f32
    }
}

impl EmbeddingModel for HashEmbeddingModel {
    type Error = EmbedError;

    fn embed(&self, text: &str) -> Result<Embedding, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::InvalidInput("empty text cannot be embedded".to_string()));
        }
        if self.dimension == 0 {
            return Err(EmbedError::InvalidInput("dimension must be greater than 0".to_string()));
        }

        let mut vector: Embedding = (0..self.dimension as u64)
            .map(|seed| Self::component(text, seed))
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
