//! Command implementations.

pub mod audit;
pub mod config;
pub mod contrasts;
pub mod inspect;
pub mod migration;
pub mod reembed;

pub use self::audit::execute_audit;
pub use self::config::execute_config;
pub use self::contrasts::execute_contrasts;
pub use self::inspect::execute_inspect;
pub use self::migration::execute_migration;
pub use self::reembed::execute_reembed;

use crate::config::Config;
use crate::error::Result;
use lenskit_store::SupabaseStore;

/// Credentials given on the command line or read from the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Project URL
    pub url: Option<String>,
    /// API key
    pub key: Option<String>,
}

/// Open the lens store described by `config` with the given credentials.
pub fn open_store(config: &Config, credentials: &Credentials) -> Result<SupabaseStore> {
    let store_config = config.store_config(credentials.url.as_deref(), credentials.key.as_deref())?;
    tracing::debug!(url = %store_config.url, table = %store_config.table, "opening lens store");
    Ok(SupabaseStore::new(store_config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_open_store_without_credentials() {
        let result = open_store(&Config::default(), &Credentials::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_open_store_with_credentials() {
        let credentials = Credentials {
            url: Some("https://project.supabase.co".to_string()),
            key: Some("anon-key".to_string()),
        };
        let store = open_store(&Config::default(), &credentials).unwrap();
        assert_eq!(store.config().table, "lenses");
    }
}
