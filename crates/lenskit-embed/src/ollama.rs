//! Ollama Embedding Implementation
//!
//! Talks to the embeddings endpoint of a local Ollama server. The default model,
//! `all-minilm`, is the 384-dimension MiniLM sentence encoder.
//!
//! # Features
//!
//! - Blocking HTTP communication with the Ollama API
//! - Configurable endpoint, model and expected dimension
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use lenskit_embed::OllamaEmbedder;
//! use lenskit_domain::traits::EmbeddingModel;
//!
//! let embedder = OllamaEmbedder::new("http://localhost:11434", "all-minilm", 384).unwrap();
//! let vector = embedder.embed("Inversion: Think backwards").unwrap();
//! assert_eq!(vector.len(), 384);
//! ```

use crate::EmbedError;
use lenskit_domain::traits::EmbeddingModel;
use lenskit_domain::Embedding;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default embedding model
pub const DEFAULT_MODEL: &str = "all-minilm";

/// Dimension of the default model's vectors
pub const DEFAULT_DIMENSION: usize = 384;

/// Default timeout for embedding requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per text
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Embedding model served by a local Ollama instance
pub struct OllamaEmbedder {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::blocking::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    /// Create an embedder
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Embedding model (e.g., "all-minilm")
    /// - `dimension`: Expected vector length; other lengths are rejected
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| EmbedError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimension,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create an embedder for the default local server and model
    pub fn local() -> Result<Self, EmbedError> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_DIMENSION)
    }

    /// Set the maximum number of attempts per text
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, text: &str) -> Result<Embedding, EmbedError> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let body = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&body).send() {
                Ok(response) if response.status().is_success() => {
                    let parsed: EmbeddingsResponse = response.json().map_err(|e| {
                        EmbedError::InvalidResponse(format!("Failed to parse response: {}", e))
                    })?;
                    return Ok(parsed.embedding);
                }
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Err(EmbedError::ModelNotAvailable(self.model.clone()));
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(EmbedError::Communication(format!("HTTP {}: {}", status, text)));
                }
                Err(e) => {
                    last_error = Some(EmbedError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tracing::debug!(attempt = attempts, delay_secs = delay.as_secs(), "retrying embedding request");
                thread::sleep(delay);
            }
        }

        Err(last_error.unwrap_or_else(|| EmbedError::Communication("Max retries exceeded".to_string())))
    }
}

impl EmbeddingModel for OllamaEmbedder {
    type Error = EmbedError;

    fn embed(&self, text: &str) -> Result<Embedding, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::InvalidInput("empty text cannot be embedded".to_string()));
        }
        let vector = self.request(text)?;
        if vector.len() != self.dimension {
            return Err(EmbedError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let embedder = OllamaEmbedder::new("http://localhost:11434/", "all-minilm", 384).unwrap();
        assert_eq!(embedder.endpoint, "http://localhost:11434");
        assert_eq!(embedder.model(), "all-minilm");
        assert_eq!(embedder.dimension(), 384);
        assert_eq!(embedder.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_local_defaults() {
        let embedder = OllamaEmbedder::local().unwrap();
        assert_eq!(embedder.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(embedder.dimension(), DEFAULT_DIMENSION);
    }

    #[test]
    fn test_with_max_retries() {
        let embedder = OllamaEmbedder::local().unwrap().with_max_retries(5);
        assert_eq!(embedder.max_retries, 5);
        let embedder = OllamaEmbedder::local().unwrap().with_max_retries(0);
        assert_eq!(embedder.max_retries, 1);
    }

    #[test]
    fn test_empty_text_rejected_before_request() {
        let embedder = OllamaEmbedder::new("http://127.0.0.1:1", "all-minilm", 384).unwrap();
        assert!(matches!(embedder.embed(""), Err(EmbedError::InvalidInput(_))));
    }

    #[test]
    fn test_error_handling() {
        // Nothing listens on port 1
        let embedder = OllamaEmbedder::new("http://127.0.0.1:1", "all-minilm", 384)
            .unwrap()
            .with_max_retries(1);

        match embedder.embed("test") {
            Err(EmbedError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    #[ignore] // Only run when Ollama is available
    fn test_ollama_embed_integration() {
        let embedder = OllamaEmbedder::local().unwrap();
        let vector = embedder.embed("Say hello").unwrap();
        assert_eq!(vector.len(), DEFAULT_DIMENSION);
    }
}
