//! Lenskit Embedding Layer
//!
//! Implementations of the `EmbeddingModel` trait from `lenskit-domain`.
//!
//! # Models
//!
//! - `HashEmbeddingModel`: Deterministic hash-based vectors, for tests and offline runs
//! - `OllamaEmbedder`: Local Ollama embeddings API (default model `all-minilm`, 384 dimensions)
//!
//! # Examples
//!
//! ```
//! use lenskit_embed::HashEmbeddingModel;
//! use lenskit_domain::traits::EmbeddingModel;
//!
//! let model = HashEmbeddingModel::new(384);
//! let vector = model.embed("Inversion: Think backwards").unwrap();
//! assert_eq!(vector.len(), 384);
//! ```

#![warn(missing_docs)]

pub mod hash;
pub mod ollama;

pub use hash::HashEmbeddingModel;
pub use ollama::OllamaEmbedder;

use lenskit_domain::traits::EmbeddingModel;
use lenskit_domain::Embedding;
use thiserror::Error;

/// Errors that can occur while generating embeddings
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the server
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Vector length differs from the configured dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured dimension
        expected: usize,
        /// Length of the returned vector
        actual: usize,
    },

    /// Input text cannot be embedded
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Either embedding backend, chosen at runtime
pub enum Embedder {
    /// Local Ollama server
    Ollama(OllamaEmbedder),

    /// Deterministic hash vectors
    Hash(HashEmbeddingModel),
}

impl EmbeddingModel for Embedder {
    type Error = EmbedError;

    fn embed(&self, text: &str) -> Result<Embedding, EmbedError> {
        match self {
            Embedder::Ollama(model) => model.embed(text),
            Embedder::Hash(model) => model.embed(text),
        }
    }

    fn dimension(&self) -> usize {
        match self {
            Embedder::Ollama(model) => model.dimension(),
            Embedder::Hash(model) => model.dimension(),
        }
    }
}
