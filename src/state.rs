//! Application state management

use crate::config::AppConfig;
use crate::db::sqlite::SqliteDb;
use crate::error::Result;
use crate::quotes::{ProxyQuoteSource, QuoteSource};
use crate::security::IpHasher;
use std::sync::Arc;

/// Dependencies shared by all request handlers
pub struct AppState {
    /// SQLite database connection
    pub sqlite: Arc<SqliteDb>,

    /// Quote source for current prices
    pub quotes: Arc<dyn QuoteSource>,

    /// Client address anonymizer
    pub hasher: IpHasher,

    /// Whether `X-Forwarded-For` identifies the client
    pub trust_proxy: bool,
}

impl AppState {
    pub fn new(
        sqlite: Arc<SqliteDb>,
        quotes: Arc<dyn QuoteSource>,
        hasher: IpHasher,
        trust_proxy: bool,
    ) -> Self {
        Self {
            sqlite,
            quotes,
            hasher,
            trust_proxy,
        }
    }

    /// Create application state from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!("Database: {:?}", config.database_path);
        let sqlite = Arc::new(SqliteDb::new(&config.database_path)?);

        tracing::info!("Quote proxy: {}", config.quote_proxy_url);
        let quotes = Arc::new(ProxyQuoteSource::new(&config.quote_proxy_url)?);

        let hasher = IpHasher::new(config.ip_hash_pepper.as_bytes());

        Ok(Self::new(sqlite, quotes, hasher, config.trust_proxy))
    }
}
