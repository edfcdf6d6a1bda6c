//! Integration tests for lenskit-store's in-memory store
//!
//! These exercise the `LensStore` contract the maintenance jobs rely on.

use lenskit_domain::traits::LensStore;
use lenskit_domain::{EmbeddingState, Lens};
use lenskit_store::rows::EmbeddingField;
use lenskit_store::{MemoryStore, StoreError};

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_lens(
        Lens::new("lens_a", "Alpha", "First lens").with_concepts(["ai", "control"]),
        Some(vec![1.0, 0.0]),
    );
    store.insert_lens(Lens::new("lens_b", "Beta", "Second lens"), None);
    store.insert_lens(Lens::new("lens_c", "Gamma", "Third lens"), None);
    store.set_raw_embedding("lens_c", EmbeddingField::Encoded("[0.5, 0.5]".to_string()));
    store
}

#[test]
fn test_list_lenses_preserves_order() {
    let store = seeded_store();
    let lenses = store.list_lenses().unwrap();
    let ids: Vec<_> = lenses.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["lens_a", "lens_b", "lens_c"]);
}

#[test]
fn test_fetch_embedding_variants() {
    let store = seeded_store();
    assert_eq!(store.fetch_embedding("lens_a").unwrap(), Some(vec![1.0, 0.0]));
    assert_eq!(store.fetch_embedding("lens_b").unwrap(), None);
    assert_eq!(store.fetch_embedding("lens_c").unwrap(), Some(vec![0.5, 0.5]));
}

#[test]
fn test_census_classifies_rows() {
    let mut store = seeded_store();
    store.insert_lens(Lens::new("other_d", "Delta", ""), Some(vec![]));
    let census = store.embedding_census().unwrap();

    assert_eq!(census.len(), 4);
    assert_eq!(census[0].state, EmbeddingState::Native(2));
    assert_eq!(census[1].state, EmbeddingState::Missing);
    assert_eq!(census[2].state, EmbeddingState::Encoded(2));
    assert_eq!(census[3].state, EmbeddingState::Empty);
}

#[test]
fn test_update_embedding_overwrites_encoded_value() {
    let mut store = seeded_store();
    store.update_embedding("lens_c", &[0.1, 0.2, 0.3]).unwrap();

    assert_eq!(
        store.embedding("lens_c"),
        Some(&EmbeddingField::Vector(vec![0.1, 0.2, 0.3]))
    );
    let census = store.embedding_census().unwrap();
    assert_eq!(census[2].state, EmbeddingState::Native(3));
}

#[test]
fn test_update_unknown_lens_fails() {
    let mut store = seeded_store();
    let result = store.update_embedding("missing", &[1.0]);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_failure_injection() {
    let mut store = seeded_store();
    store.fail_on("lens_a");
    assert!(store.fetch_embedding("lens_a").is_err());
    assert!(store.update_embedding("lens_a", &[1.0]).is_err());
    assert!(store.fetch_embedding("lens_b").is_ok());

    store.fail_listing();
    assert!(store.list_lenses().is_err());
    assert!(store.embedding_census().is_err());
}
