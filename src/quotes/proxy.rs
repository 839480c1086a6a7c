//! Stock price proxy quote source
//!
//! Talks to the `GET /v1/stock/{symbol}/quote` proxy API. Every failure mode
//! (transport, non-success status, unexpected payload) collapses into
//! [`QuoteLookup::NotFound`].

use super::types::{Quote, QuoteLookup};
use super::QuoteSource;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

pub const DEFAULT_PROXY_URL: &str = "https://stock-price-checker-proxy.freecodecamp.rocks";

/// Quote source backed by the stock price proxy
pub struct ProxyQuoteSource {
    client: Client,
    base_url: String,
}

impl ProxyQuoteSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a source sharing an existing HTTP client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/v1/stock/{}/quote",
            self.base_url,
            urlencoding::encode(symbol)
        )
    }

    async fn request_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(AppError::Validation("Symbol is required".to_string()));
        }

        let url = self.quote_url(symbol);
        debug!("Requesting quote: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Quote proxy returned {} for {}",
                status, symbol
            )));
        }

        let body = response.text().await?;
        let quote: Quote = serde_json::from_str(&body)?;

        if quote.symbol.trim().is_empty() {
            return Err(AppError::Upstream(format!(
                "Quote proxy returned an empty symbol for {}",
                symbol
            )));
        }

        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for ProxyQuoteSource {
    fn id(&self) -> &'static str {
        "proxy"
    }

    async fn fetch(&self, symbol: &str) -> QuoteLookup {
        match self.request_quote(symbol).await {
            Ok(quote) => {
                debug!("Quote for {}: {} @ {}", symbol, quote.symbol, quote.latest_price);
                QuoteLookup::Found(quote)
            }
            Err(e) => {
                warn!("No quote for {:?} ({}): {}", symbol, e.code(), e);
                QuoteLookup::NotFound
            }
        }
    }
}
