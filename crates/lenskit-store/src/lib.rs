//! Lenskit Storage Layer
//!
//! Implements the `LensStore` trait against the hosted lens table.
//!
//! # Architecture
//!
//! - [`SupabaseStore`]: blocking PostgREST client for the hosted database
//! - [`MemoryStore`]: in-process store for tests and offline runs
//! - [`rows`]: row decoding, including the parse-on-read embedding adapter
//! - [`inspect`]: raw field descriptions for format diagnostics
//!
//! Embeddings may arrive either as native numeric arrays or as JSON-encoded
//! strings; both are normalized in [`rows::EmbeddingField`] so that nothing
//! downstream ever sees the string form.
//!
//! # Examples
//!
//! ```no_run
//! use lenskit_domain::traits::LensStore;
//! use lenskit_store::{StoreConfig, SupabaseStore};
//!
//! let config = StoreConfig::new("https://project.supabase.co", "anon-key");
//! let store = SupabaseStore::new(config).unwrap();
//! let lenses = store.list_lenses().unwrap();
//! println!("{} lenses", lenses.len());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod inspect;
pub mod memory;
pub mod rows;
pub mod supabase;

pub use config::StoreConfig;
pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network or transport failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success response from the REST API
    #[error("API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (may be empty)
        body: String,
    },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Lens not found
    #[error("Lens not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Missing or unusable connection settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            StoreError::Status {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            StoreError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}
