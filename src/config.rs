//! Environment-driven configuration

use crate::error::{AppError, Result};
use crate::quotes::DEFAULT_PROXY_URL;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_PATH: &str = "stock-prices.db";

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Base URL of the stock price proxy
    pub quote_proxy_url: String,
    /// Take the client address from `X-Forwarded-For` when present
    pub trust_proxy: bool,
    /// Mixed into like-token hashes; empty hashes the bare address
    pub ip_hash_pepper: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            quote_proxy_url: DEFAULT_PROXY_URL.to_string(),
            trust_proxy: false,
            ip_hash_pepper: String::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset and empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid PORT {:?}: {}", v, e)))?,
            None => defaults.port,
        };

        let trust_proxy = match get("TRUST_PROXY") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| AppError::Config(format!("Invalid TRUST_PROXY {:?}", v)))?,
            None => defaults.trust_proxy,
        };

        let config = Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            database_path: get("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            quote_proxy_url: get("QUOTE_PROXY_URL").unwrap_or(defaults.quote_proxy_url),
            trust_proxy,
            ip_hash_pepper: lookup("IP_HASH_PEPPER").unwrap_or_default(),
        };

        // Fail early on an unusable bind address
        config.addr()?;

        Ok(config)
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address {}:{}: {}", self.host, self.port, e)))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.addr().unwrap().port(), 3000);
        assert_eq!(
            config.quote_proxy_url,
            "https://stock-price-checker-proxy.freecodecamp.rocks"
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_PATH", "/tmp/likes.db"),
            ("QUOTE_PROXY_URL", "http://localhost:9000"),
            ("TRUST_PROXY", "true"),
            ("IP_HASH_PEPPER", "s3cret"),
        ])
        .unwrap();

        assert_eq!(config.addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.database_path, PathBuf::from("/tmp/likes.db"));
        assert_eq!(config.quote_proxy_url, "http://localhost:9000");
        assert!(config.trust_proxy);
        assert_eq!(config.ip_hash_pepper, "s3cret");
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = config_from(&[("PORT", ""), ("HOST", "  ")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("PORT", "70000")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("TRUST_PROXY", "maybe")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("HOST", "not a host")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("on"), None);
    }
}
