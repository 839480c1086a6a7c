//! HTTP API module
//!
//! Provides:
//! - Stock prices with per-client like votes (`GET /api/stock-prices`)
//! - Health check (`GET /health`)

mod server;
pub mod handlers;
mod types;

pub use server::{build_router, ApiServer};
pub use types::{
    HealthResponse,
    PriceCheckError,
    RelativeStockPrice,
    StockData,
    StockPrice,
    StockPricesQuery,
    StockPricesResponse,
};
