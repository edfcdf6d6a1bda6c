//! Connection settings for the hosted lens table

use crate::StoreError;
use std::time::Duration;

/// Default table holding lenses
pub const DEFAULT_TABLE: &str = "lenses";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`crate::SupabaseStore`]
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project URL (e.g. `https://xyz.supabase.co`)
    pub url: String,

    /// API key sent as `apikey` and bearer token
    pub api_key: String,

    /// Table name
    pub table: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Create settings with the default table and timeout
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Use a different table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Use a different request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL of the table endpoint, e.g. `https://x.supabase.co/rest/v1/lenses`
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.url.trim().is_empty() {
            return Err(StoreError::Config("SUPABASE_URL is empty".to_string()));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(StoreError::Config(format!(
                "SUPABASE_URL must start with http:// or https://, got '{}'",
                self.url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(StoreError::Config("SUPABASE_KEY is empty".to_string()));
        }
        if self.table.trim().is_empty() {
            return Err(StoreError::Config("table name must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}
