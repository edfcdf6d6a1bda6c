//! Blocking PostgREST client for the hosted lens table

use crate::config::StoreConfig;
use crate::rows::{CensusRow, EmbeddingRow, IdRow, LensRow, CENSUS_COLUMNS, LENS_COLUMNS};
use crate::StoreError;
use lenskit_domain::traits::LensStore;
use lenskit_domain::{Embedding, EmbeddingProbe, Lens};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Rows requested per page when scanning the table
pub const PAGE_SIZE: usize = 1000;

/// Lens store backed by a Supabase (PostgREST) table
pub struct SupabaseStore {
    config: StoreConfig,
    client: Client,
}

impl SupabaseStore {
    /// Connect using validated settings
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::Config(format!("invalid API key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| StoreError::Config(format!("invalid API key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { config, client })
    }

    /// Settings in use
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Fetch up to `limit` raw rows with the given columns, for format inspection
    pub fn sample_rows(&self, columns: &str, limit: usize) -> Result<Vec<Map<String, Value>>, StoreError> {
        let url = self.config.table_url();
        tracing::debug!(url = %url, columns, limit, "sampling rows");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", columns.to_string()),
                ("order", "id".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()?;
        read_json(response)
    }

    fn fetch_all<T: DeserializeOwned>(&self, columns: &str) -> Result<Vec<T>, StoreError> {
        let url = self.config.table_url();
        let mut rows = Vec::new();
        let mut offset = 0;

        loop {
            tracing::debug!(url = %url, columns, offset, "fetching page");
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("select", columns.to_string()),
                    ("order", "id".to_string()),
                    ("limit", PAGE_SIZE.to_string()),
                    ("offset", offset.to_string()),
                ])
                .send()?;
            let page: Vec<T> = read_json(response)?;
            let fetched = page.len();
            rows.extend(page);

            match next_offset(offset, fetched) {
                Some(next) => offset = next,
                None => break,
            }
        }

        Ok(rows)
    }
}

/// Offset of the page after one that returned `fetched` rows.
///
/// The server may cap pages below [`PAGE_SIZE`] (`max-rows`), so a short page
/// does not end the listing; only an empty one does.
fn next_offset(offset: usize, fetched: usize) -> Option<usize> {
    (fetched > 0).then_some(offset + fetched)
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let response = check_status(response)?;
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

impl LensStore for SupabaseStore {
    type Error = StoreError;

    fn list_lenses(&self) -> Result<Vec<Lens>, StoreError> {
        let rows: Vec<LensRow> = self.fetch_all(LENS_COLUMNS)?;
        tracing::debug!(count = rows.len(), "loaded lenses");
        Ok(rows.into_iter().map(Lens::from).collect())
    }

    fn fetch_embedding(&self, id: &str) -> Result<Option<Embedding>, StoreError> {
        let response = self
            .client
            .get(self.config.table_url())
            .query(&[
                ("select", "embedding".to_string()),
                ("id", format!("eq.{}", id)),
                ("limit", "1".to_string()),
            ])
            .send()?;
        let rows: Vec<EmbeddingRow> = read_json(response)?;
        match rows.first() {
            Some(row) => row.decode(),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn embedding_census(&self) -> Result<Vec<EmbeddingProbe>, StoreError> {
        let rows: Vec<CensusRow> = self.fetch_all(CENSUS_COLUMNS)?;
        Ok(rows.into_iter().map(EmbeddingProbe::from).collect())
    }

    fn update_embedding(&mut self, id: &str, embedding: &[f32]) -> Result<(), StoreError> {
        tracing::debug!(id, dimension = embedding.len(), "updating embedding");
        let response = self
            .client
            .patch(self.config.table_url())
            .query(&[("id", format!("eq.{}", id)), ("select", "id".to_string())])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "embedding": embedding }))
            .send()?;
        let updated: Vec<IdRow> = read_json(response)?;
        if updated.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
