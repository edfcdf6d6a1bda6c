//! Lenskit Domain Layer
//!
//! This crate contains the domain model and the pure scoring arithmetic for the
//! lens knowledge graph maintenance jobs. It has ZERO external dependencies and
//! defines the value objects and trait interfaces every other crate builds on.
//!
//! ## Key Concepts
//!
//! - **Lens**: A named concept with a definition and related-concept tags
//! - **Contrast**: A generated relationship expressing tension between two lenses
//! - **Coverage**: Which lenses (and which lens pairs) already have a contrast
//! - **Cosine distance**: `1 - cosine similarity` between two embeddings
//! - **Dialectic score**: Opposing-keyword overlap between two definitions
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure logic only; no I/O, no logging
//! - Store and embedding-model implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coverage;
pub mod dialectic;
pub mod embedding;
pub mod insight;
pub mod lens;
pub mod relationship;
pub mod similarity;
pub mod traits;
pub mod weight;

// Re-exports for convenience
pub use coverage::CoverageIndex;
pub use dialectic::DialecticTable;
pub use embedding::{Embedding, EmbeddingProbe, EmbeddingState};
pub use insight::compose_insight;
pub use lens::Lens;
pub use relationship::{Contrast, ContrastMetadata, RelationshipKind, RelationshipRef};
pub use similarity::{cosine_distance, cosine_similarity};
pub use weight::WeightMapping;
