//! Stock price API types
//!
//! Every response of `GET /api/stock-prices` is HTTP 200; failures are
//! reported through an `error` field in the body, which existing clients
//! depend on.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MISSING_STOCK_MESSAGE: &str = "stock parameter required";
pub const TOO_MANY_STOCKS_MESSAGE: &str = "only one or two stock symbols are supported";
pub const INVALID_SYMBOL_MESSAGE: &str = "invalid stock symbol";
pub const SERVER_ERROR_MESSAGE: &str = "server error";

// ============================================================================
// Request
// ============================================================================

/// Parsed `stock` / `like` query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockPricesQuery {
    /// Every `stock` value in request order
    pub stocks: Vec<String>,
    /// True only for a literal `like=true`
    pub like: bool,
}

impl StockPricesQuery {
    /// Parse a raw query string.
    ///
    /// `stock` may repeat; `like` is taken from its first occurrence.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let mut like: Option<String> = None;

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match &*key {
                "stock" => query.stocks.push(value.into_owned()),
                "like" if like.is_none() => like = Some(value.into_owned()),
                _ => {}
            }
        }

        query.like = like.as_deref() == Some("true");
        query
    }

    /// True when no usable `stock` value was supplied.
    ///
    /// Whitespace-only values count as missing, so `stock=%20` is answered
    /// with the missing-parameter error rather than an invalid symbol.
    pub fn is_missing_stock(&self) -> bool {
        self.stocks.iter().all(|s| s.trim().is_empty())
    }
}

// ============================================================================
// Response
// ============================================================================

/// Single-symbol entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
    pub likes: i64,
}

/// Entry of a two-symbol comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeStockPrice {
    pub stock: String,
    pub price: f64,
    pub rel_likes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StockData {
    Single(StockPrice),
    Pair([RelativeStockPrice; 2]),
}

/// Body of `GET /api/stock-prices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StockPricesResponse {
    Data {
        #[serde(rename = "stockData")]
        stock_data: StockData,
    },
    Error {
        error: String,
    },
}

impl StockPricesResponse {
    pub fn data(stock_data: StockData) -> Self {
        Self::Data { stock_data }
    }

    pub fn error(message: &str) -> Self {
        Self::Error {
            error: message.to_string(),
        }
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stocks: Option<i64>,
}

// ============================================================================
// Errors
// ============================================================================

/// Ways a stock price request can fail
#[derive(Error, Debug)]
pub enum PriceCheckError {
    #[error("no stock symbol supplied")]
    MissingStock,

    #[error("{0} stock symbols supplied")]
    TooManyStocks(usize),

    #[error("quote not found for {0}")]
    InvalidSymbol(String),

    #[error(transparent)]
    Server(#[from] AppError),
}

impl PriceCheckError {
    /// Message exposed to the caller; internal details never leak
    pub fn public_message(&self) -> &'static str {
        match self {
            PriceCheckError::MissingStock => MISSING_STOCK_MESSAGE,
            PriceCheckError::TooManyStocks(_) => TOO_MANY_STOCKS_MESSAGE,
            PriceCheckError::InvalidSymbol(_) => INVALID_SYMBOL_MESSAGE,
            PriceCheckError::Server(_) => SERVER_ERROR_MESSAGE,
        }
    }
}

impl From<PriceCheckError> for StockPricesResponse {
    fn from(err: PriceCheckError) -> Self {
        StockPricesResponse::error(err.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single() {
        let query = StockPricesQuery::parse(Some("stock=GOOG&like=true"));
        assert_eq!(query.stocks, vec!["GOOG".to_string()]);
        assert!(query.like);
    }

    #[test]
    fn test_parse_pair_keeps_order() {
        let query = StockPricesQuery::parse(Some("stock=msft&like=false&stock=goog"));
        assert_eq!(query.stocks, vec!["msft".to_string(), "goog".to_string()]);
        assert!(!query.like);
    }

    #[test]
    fn test_like_requires_literal_true() {
        for raw in ["stock=A&like=TRUE", "stock=A&like=1", "stock=A&like=", "stock=A&like", "stock=A"] {
            assert!(!StockPricesQuery::parse(Some(raw)).like, "{}", raw);
        }
        assert!(StockPricesQuery::parse(Some("like=true&like=false&stock=A")).like);
        assert!(!StockPricesQuery::parse(Some("like=false&like=true&stock=A")).like);
    }

    #[test]
    fn test_parse_decodes_values() {
        let query = StockPricesQuery::parse(Some("stock=BRK%2FB&stock=brk+a"));
        assert_eq!(query.stocks, vec!["BRK/B".to_string(), "brk a".to_string()]);
    }

    #[test]
    fn test_missing_stock() {
        assert!(StockPricesQuery::parse(None).is_missing_stock());
        assert!(StockPricesQuery::parse(Some("like=true")).is_missing_stock());
        assert!(StockPricesQuery::parse(Some("stock=&stock=")).is_missing_stock());
        assert!(StockPricesQuery::parse(Some("stock=%20")).is_missing_stock());
        assert!(!StockPricesQuery::parse(Some("stock=&stock=GOOG")).is_missing_stock());
    }

    #[test]
    fn test_single_response_shape() {
        let response = StockPricesResponse::data(StockData::Single(StockPrice {
            stock: "GOOG".to_string(),
            price: 786.9,
            likes: 1,
        }));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"stockData": {"stock": "GOOG", "price": 786.9, "likes": 1}})
        );
    }

    #[test]
    fn test_pair_response_shape() {
        let response = StockPricesResponse::data(StockData::Pair([
            RelativeStockPrice {
                stock: "GOOG".to_string(),
                price: 786.9,
                rel_likes: 1,
            },
            RelativeStockPrice {
                stock: "MSFT".to_string(),
                price: 62.3,
                rel_likes: -1,
            },
        ]));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"stockData": [
                {"stock": "GOOG", "price": 786.9, "rel_likes": 1},
                {"stock": "MSFT", "price": 62.3, "rel_likes": -1}
            ]})
        );
    }

    #[test]
    fn test_error_payloads() {
        let cases = [
            (PriceCheckError::MissingStock, "stock parameter required"),
            (PriceCheckError::TooManyStocks(3), "only one or two stock symbols are supported"),
            (PriceCheckError::InvalidSymbol("X".to_string()), "invalid stock symbol"),
            (
                PriceCheckError::Server(AppError::Internal("disk full".to_string())),
                "server error",
            ),
        ];

        for (err, message) in cases {
            let response: StockPricesResponse = err.into();
            assert_eq!(serde_json::to_value(&response).unwrap(), json!({"error": message}));
        }
    }
}
