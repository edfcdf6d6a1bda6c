//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Embedding, EmbeddingProbe, Lens};

/// Trait for reading lenses and reading/writing their embeddings
///
/// Implemented by the infrastructure layer (lenskit-store)
pub trait LensStore {
    /// Error type for store operations
    type Error;

    /// Fetch every lens (without embeddings)
    fn list_lenses(&self) -> Result<Vec<Lens>, Self::Error>;

    /// Fetch a single lens's embedding
    ///
    /// Returns `Ok(None)` when the lens has no embedding. Implementations must
    /// normalize string-encoded vectors into numeric form before returning.
    fn fetch_embedding(&self, id: &str) -> Result<Option<Embedding>, Self::Error>;

    /// Classify the raw embedding column of every lens
    fn embedding_census(&self) -> Result<Vec<EmbeddingProbe>, Self::Error>;

    /// Overwrite a lens's embedding in place
    fn update_embedding(&mut self, id: &str, embedding: &[f32]) -> Result<(), Self::Error>;
}

/// Trait for turning text into embedding vectors
///
/// Implemented by the infrastructure layer (lenskit-embed)
pub trait EmbeddingModel {
    /// Error type for embedding operations
    type Error;

    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Embedding, Self::Error>;

    /// Dimension of the vectors this model produces
    fn dimension(&self) -> usize;
}

/// Infallible, on-demand access to lens embeddings
///
/// Implementations swallow (and report) fetch errors, returning `None` so that
/// one bad row never aborts a scan.
pub trait EmbeddingSource {
    /// Embedding for the lens, or `None` when absent or unreadable
    fn embedding(&self, id: &str) -> Option<Embedding>;
}
