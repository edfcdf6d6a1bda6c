//! Embedding value types and the census used by audits

/// A fixed-length embedding vector (384 dimensions for the local model)
pub type Embedding = Vec<f32>;

/// How a lens's embedding column looks when read raw from the store
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingState {
    /// Native numeric array with the given dimensionality
    Native(usize),

    /// JSON-encoded string that decodes to an array of the given dimensionality
    Encoded(usize),

    /// Column is NULL
    Missing,

    /// Column holds an empty array or an empty string
    Empty,

    /// Column holds something that is not a numeric array
    Malformed(String),
}

impl EmbeddingState {
    /// Whether the lens has a usable embedding (native or decodable)
    pub fn is_usable(&self) -> bool {
        matches!(self, EmbeddingState::Native(_) | EmbeddingState::Encoded(_))
    }

    /// Dimensionality of a usable embedding
    pub fn dimension(&self) -> Option<usize> {
        match self {
            EmbeddingState::Native(d) | EmbeddingState::Encoded(d) => Some(*d),
            _ => None,
        }
    }
}

/// One row of an embedding census
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingProbe {
    /// Lens id
    pub id: String,

    /// Lens name
    pub name: String,

    /// Observed state of the embedding column
    pub state: EmbeddingState,
}
