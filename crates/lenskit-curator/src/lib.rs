//! Lenskit Curator
//!
//! Batch maintenance jobs for the lens knowledge graph.
//!
//! # Overview
//!
//! The curator is responsible for:
//! - **Contrast generation**: Pairing lenses that lack a contrast with a distant but
//!   related partner, scored by embedding distance and opposing keywords
//! - **Embedding audits**: Classifying how each lens's embedding is stored
//! - **Re-embedding**: Recomputing every embedding with a new model
//! - **Migration reports**: Summarizing what a move to a native vector column involves
//!
//! Every job is sequential and works against the `LensStore` and `EmbeddingModel`
//! traits from `lenskit-domain`.
//!
//! # Contrast pipeline
//!
//! | Stage | Component |
//! |-------|-----------|
//! | Load existing contrasts | [`load_connections`] |
//! | Fetch embeddings on demand | [`StoreEmbeddings`] |
//! | Rank candidates per source | [`CandidateScorer`] |
//! | Pick the best, register the pair | [`ContrastGenerator`] |
//! | Write the review file | [`write_batch`] |
//!
//! # Usage
//!
//! ```no_run
//! use lenskit_curator::{load_connections, write_batch, ContrastBatch, ContrastConfig, ContrastGenerator, StoreEmbeddings};
//! use lenskit_domain::traits::LensStore;
//! use lenskit_store::{StoreConfig, SupabaseStore};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SupabaseStore::new(StoreConfig::new("https://project.supabase.co", "key"))?;
//! let existing = load_connections(Path::new("data/connections.json"))?;
//! let mut generator = ContrastGenerator::new(ContrastConfig::default(), store.list_lenses()?, &existing)?;
//!
//! let embeddings = StoreEmbeddings::new(&store);
//! let outcome = generator.generate(&embeddings, Some(10));
//! println!("{}", outcome.metrics.summary());
//!
//! let output = Path::new("new_contrasts.json");
//! write_batch(output, &ContrastBatch::new(&outcome.contrasts, output))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Scoring parameters can be configured via TOML:
//!
//! ```toml
//! [contrast]
//! top_n = 3
//! min_distance = 0.65
//! max_distance = 0.92
//! min_specific_shared = 1
//! min_total_shared = 2
//! distance_weight = 0.7
//! dialectic_weight = 0.3
//! generic_concepts = ["core concepts", "systems thinking", "strategy"]
//! dialectic_pairs = [["centralized", "decentralized"], ["control", "freedom"]]
//!
//! [reembed]
//! progress_every = 10
//! throttle_ms = 10
//! ```

#![warn(missing_docs)]

mod accessor;
mod audit;
mod batch;
mod config;
mod connections;
mod error;
mod generator;
mod metrics;
mod reembed;
mod scorer;

pub use accessor::StoreEmbeddings;
pub use audit::{AuditReport, EmbeddedSample, InvalidEntry, MigrationReport};
pub use batch::{write_batch, ContrastBatch, ContrastRecord, Instructions, RecordMetadata, DEFAULT_OUTPUT};
pub use config::{ContrastConfig, ReembedConfig, GENERIC_CONCEPTS};
pub use connections::{load_connections, parse_connections};
pub use error::CuratorError;
pub use generator::{ContrastGenerator, GenerationOutcome, GENERATED_BY};
pub use metrics::RunMetrics;
pub use reembed::{reembed, ReembedOptions, ReembedReport, PREVIEW_COUNT};
pub use scorer::{Candidate, CandidateScorer};
