//! In-process lens store

use crate::rows::EmbeddingField;
use crate::StoreError;
use lenskit_domain::traits::LensStore;
use lenskit_domain::{Embedding, EmbeddingProbe, EmbeddingState, Lens};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

/// Lens store held entirely in memory
///
/// Raw embedding values go through the same decoding as rows read from the
/// hosted table, so string-encoded vectors behave identically. Individual
/// lenses (or the whole listing) can be made to fail for error-path tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lenses: Vec<Lens>,
    embeddings: HashMap<String, EmbeddingField>,
    failing: HashSet<String>,
    fail_listing: bool,
    fetches: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lens with an optional native embedding
    pub fn insert_lens(&mut self, lens: Lens, embedding: Option<Embedding>) {
        if let Some(values) = embedding {
            self.embeddings.insert(lens.id.clone(), EmbeddingField::Vector(values));
        }
        self.lenses.push(lens);
    }

    /// Set the raw embedding column of a lens (e.g. a JSON-encoded string)
    pub fn set_raw_embedding(&mut self, id: impl Into<String>, field: EmbeddingField) {
        self.embeddings.insert(id.into(), field);
    }

    /// Make every read or write of this lens's embedding fail
    pub fn fail_on(&mut self, id: impl Into<String>) {
        self.failing.insert(id.into());
    }

    /// Make lens listing and census fail
    pub fn fail_listing(&mut self) {
        self.fail_listing = true;
    }

    /// Number of embedding fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// Current raw embedding of a lens
    pub fn embedding(&self, id: &str) -> Option<&EmbeddingField> {
        self.embeddings.get(id)
    }

    fn contains(&self, id: &str) -> bool {
        self.lenses.iter().any(|lens| lens.id == id)
    }
}

impl LensStore for MemoryStore {
    type Error = StoreError;

    fn list_lenses(&self) -> Result<Vec<Lens>, StoreError> {
        if self.fail_listing {
            return Err(StoreError::Http("listing unavailable".to_string()));
        }
        Ok(self.lenses.clone())
    }

    fn fetch_embedding(&self, id: &str) -> Result<Option<Embedding>, StoreError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.failing.contains(id) {
            return Err(StoreError::Http(format!("fetch failed for {}", id)));
        }
        if !self.contains(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        match self.embeddings.get(id) {
            Some(field) => field.decode(),
            None => Ok(None),
        }
    }

    fn embedding_census(&self) -> Result<Vec<EmbeddingProbe>, StoreError> {
        if self.fail_listing {
            return Err(StoreError::Http("listing unavailable".to_string()));
        }
        Ok(self
            .lenses
            .iter()
            .map(|lens| EmbeddingProbe {
                id: lens.id.clone(),
                name: lens.name.clone(),
                state: self
                    .embeddings
                    .get(&lens.id)
                    .map(EmbeddingField::state)
                    .unwrap_or(EmbeddingState::Missing),
            })
            .collect())
    }

    fn update_embedding(&mut self, id: &str, embedding: &[f32]) -> Result<(), StoreError> {
        if self.failing.contains(id) {
            return Err(StoreError::Http(format!("update failed for {}", id)));
        }
        if !self.contains(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.embeddings
            .insert(id.to_string(), EmbeddingField::Vector(embedding.to_vec()));
        Ok(())
    }
}
