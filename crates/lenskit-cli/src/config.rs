//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lenskit_curator::{ContrastConfig, ReembedConfig};
use lenskit_embed::ollama::{DEFAULT_DIMENSION, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL};
use lenskit_embed::{Embedder, HashEmbeddingModel, OllamaEmbedder};
use lenskit_store::config::{DEFAULT_TABLE, DEFAULT_TIMEOUT_SECS};
use lenskit_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Lens table settings
    #[serde(default)]
    pub store: StoreSettings,

    /// Embedding model settings
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Contrast scoring parameters
    #[serde(default)]
    pub contrast: ContrastConfig,

    /// Re-embedding parameters
    #[serde(default)]
    pub reembed: ReembedConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

/// Lens table settings; credentials come from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Table holding lenses
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Embedding backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Local Ollama server
    Ollama,
    /// Deterministic hash vectors (offline)
    Hash,
}

/// Embedding model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Backend to use
    #[serde(default = "default_provider")]
    pub provider: Provider,

    /// Ollama endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Expected vector length
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Attempts per text
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Config {
    /// Default configuration file path (`~/.lenskit/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lenskit").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; a missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path()?, false),
        };

        if !path.exists() {
            if explicit {
                return Err(CliError::Config(format!("Config file not found: {}", path.display())));
            }
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.contrast.validate()?;
        self.reembed.validate()?;
        if self.store.table.trim().is_empty() {
            return Err(CliError::Config("store.table must not be empty".into()));
        }
        if self.store.timeout_secs == 0 {
            return Err(CliError::Config("store.timeout_secs must be greater than 0".into()));
        }
        if self.embedding.dimension == 0 {
            return Err(CliError::Config("embedding.dimension must be greater than 0".into()));
        }
        Ok(())
    }

    /// Store connection settings for the given credentials.
    pub fn store_config(&self, url: Option<&str>, key: Option<&str>) -> Result<StoreConfig> {
        let url = url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| CliError::Config("SUPABASE_URL is required (flag, environment or .env)".into()))?;
        let key = key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CliError::Config("SUPABASE_KEY is required (flag, environment or .env)".into()))?;
        Ok(StoreConfig::new(url, key)
            .with_table(self.store.table.clone())
            .with_timeout_secs(self.store.timeout_secs))
    }

    /// Build the configured embedding model.
    pub fn embedder(&self) -> Result<Embedder> {
        let settings = &self.embedding;
        Ok(match settings.provider {
            Provider::Ollama => Embedder::Ollama(
                OllamaEmbedder::new(&settings.endpoint, &settings.model, settings.dimension)?
                    .with_max_retries(settings.max_retries),
            ),
            Provider::Hash => Embedder::Hash(HashEmbeddingModel::new(settings.dimension)),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            model: default_model(),
            dimension: default_dimension(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_provider() -> Provider {
    Provider::Ollama
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

#[cfg(test)]
mod tests {
    use super::*;
    use lenskit_domain::traits::EmbeddingModel;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.store.table, "lenses");
        assert_eq!(config.embedding.provider, Provider::Ollama);
        assert_eq!(config.embedding.dimension, 384);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [settings]
            format = "json"

            [embedding]
            provider = "hash"
            dimension = 64

            [contrast]
            top_n = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.embedding.provider, Provider::Hash);
        assert_eq!(config.embedding.model, "all-minilm");
        assert_eq!(config.contrast.top_n, 2);
        assert_eq!(config.contrast.max_distance, 0.92);
        assert_eq!(config.reembed.progress_every, 10);
    }

    #[test]
    fn test_invalid_section_rejected() {
        assert!(Config::from_toml("[contrast]\nmin_distance = 0.95\nmax_distance = 0.5").is_err());
        assert!(Config::from_toml("[store]\ntimeout_secs = 0").is_err());
        assert!(Config::from_toml("[embedding]\nprovider = \"openai\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.store.table = "lenses_v2".to_string();
        config.contrast.top_n = 4;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/lenskit.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_store_config_requires_credentials() {
        let config = Config::default();
        assert!(config.store_config(None, Some("key")).is_err());
        assert!(config.store_config(Some("https://x.supabase.co"), Some("")).is_err());

        let store = config.store_config(Some("https://x.supabase.co"), Some("key")).unwrap();
        assert_eq!(store.table, "lenses");
        assert_eq!(store.timeout_secs, 30);
    }

    #[test]
    fn test_hash_embedder() {
        let mut config = Config::default();
        config.embedding.provider = Provider::Hash;
        config.embedding.dimension = 32;
        let embedder = config.embedder().unwrap();
        assert_eq!(embedder.dimension(), 32);
    }
}
