//! On-demand embedding access with failure isolation

use lenskit_domain::traits::{EmbeddingSource, LensStore};
use lenskit_domain::Embedding;
use std::cell::Cell;
use std::fmt::Display;

/// Fetches one lens's embedding per call from a [`LensStore`]
///
/// Missing embeddings and fetch errors are logged and reported as `None`; the
/// counts are kept for the run summary.
pub struct StoreEmbeddings<'s, S> {
    store: &'s S,
    misses: Cell<usize>,
    failures: Cell<usize>,
}

impl<'s, S> StoreEmbeddings<'s, S>
where
    S: LensStore,
    S::Error: Display,
{
    /// Wrap a store
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            misses: Cell::new(0),
            failures: Cell::new(0),
        }
    }

    /// Lookups that found no embedding
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// Lookups that failed
    pub fn failures(&self) -> usize {
        self.failures.get()
    }
}

impl<S> EmbeddingSource for StoreEmbeddings<'_, S>
where
    S: LensStore,
    S::Error: Display,
{
    fn embedding(&self, id: &str) -> Option<Embedding> {
        match self.store.fetch_embedding(id) {
            Ok(Some(vector)) if !vector.is_empty() => Some(vector),
            Ok(_) => {
                tracing::warn!(lens_id = id, "no embedding found");
                self.misses.set(self.misses.get() + 1);
                None
            }
            Err(e) => {
                tracing::error!(lens_id = id, error = %e, "error fetching embedding");
                self.failures.set(self.failures.get() + 1);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lenskit_domain::Lens;
    use lenskit_store::rows::EmbeddingField;
    use lenskit_store::MemoryStore;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_lens(Lens::new("a", "A", ""), Some(vec![1.0, 0.0]));
        store.insert_lens(Lens::new("b", "B", ""), None);
        store.insert_lens(Lens::new("c", "C", ""), None);
        store.set_raw_embedding("c", EmbeddingField::Encoded("[0.0, 1.0]".to_string()));
        store.insert_lens(Lens::new("d", "D", ""), None);
        store.set_raw_embedding("d", EmbeddingField::Encoded("garbage".to_string()));
        store
    }

    #[test]
    fn test_present_and_encoded() {
        let store = store();
        let embeddings = StoreEmbeddings::new(&store);
        assert_eq!(embeddings.embedding("a"), Some(vec![1.0, 0.0]));
        assert_eq!(embeddings.embedding("c"), Some(vec![0.0, 1.0]));
        assert_eq!(embeddings.misses(), 0);
        assert_eq!(embeddings.failures(), 0);
    }

    #[test]
    fn test_missing_counted() {
        let store = store();
        let embeddings = StoreEmbeddings::new(&store);
        assert_eq!(embeddings.embedding("b"), None);
        assert_eq!(embeddings.misses(), 1);
    }

    #[test]
    fn test_errors_become_none() {
        let mut store = store();
        store.fail_on("a");
        let embeddings = StoreEmbeddings::new(&store);
        assert_eq!(embeddings.embedding("a"), None);
        assert_eq!(embeddings.embedding("d"), None);
        assert_eq!(embeddings.embedding("unknown"), None);
        assert_eq!(embeddings.failures(), 3);
    }

    #[test]
    fn test_one_request_per_call() {
        let store = store();
        let embeddings = StoreEmbeddings::new(&store);
        embeddings.embedding("a");
        embeddings.embedding("a");
        assert_eq!(store.fetch_count(), 2);
    }
}
