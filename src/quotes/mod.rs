//! Quote sources module

pub mod types;
mod proxy;

use async_trait::async_trait;

pub use proxy::{ProxyQuoteSource, DEFAULT_PROXY_URL};
pub use types::{Quote, QuoteLookup};

/// Source of current stock quotes.
///
/// Implementations never fail: anything that prevents a usable quote is
/// reported as [`QuoteLookup::NotFound`] so that one bad symbol cannot abort
/// handling of a co-requested one.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Source ID, used in logs
    fn id(&self) -> &'static str;

    /// Look up the current quote for a symbol
    async fn fetch(&self, symbol: &str) -> QuoteLookup;
}
