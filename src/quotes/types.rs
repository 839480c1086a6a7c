//! Quote types

use serde::{Deserialize, Serialize};

/// Quote as returned by the upstream proxy.
///
/// The proxy sends many more fields; only the ones the API exposes are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    #[serde(rename = "latestPrice")]
    pub latest_price: f64,
}

/// Outcome of a quote lookup
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteLookup {
    Found(Quote),
    NotFound,
}

impl QuoteLookup {
    /// Convert into an Option, dropping the not-found case
    pub fn into_quote(self) -> Option<Quote> {
        match self {
            QuoteLookup::Found(quote) => Some(quote),
            QuoteLookup::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_proxy_payload() {
        let body = r#"{
            "symbol": "GOOG",
            "companyName": "Alphabet Inc.",
            "latestPrice": 786.9,
            "change": -1.23,
            "volume": 1500000
        }"#;

        let quote: Quote = serde_json::from_str(body).unwrap();
        assert_eq!(quote.symbol, "GOOG");
        assert_eq!(quote.latest_price, 786.9);
    }

    #[test]
    fn test_integer_price() {
        let quote: Quote = serde_json::from_str(r#"{"symbol":"MSFT","latestPrice":62}"#).unwrap();
        assert_eq!(quote.latest_price, 62.0);
    }

    #[test]
    fn test_rejects_unknown_symbol_answer() {
        // The proxy answers unknown symbols with a bare JSON string
        assert!(serde_json::from_str::<Quote>(r#""Unknown symbol""#).is_err());
        assert!(serde_json::from_str::<Quote>(r#""Invalid symbol""#).is_err());
        assert!(serde_json::from_str::<Quote>(r#"{"symbol":"X","latestPrice":null}"#).is_err());
    }

    #[test]
    fn test_lookup_helpers() {
        let found = QuoteLookup::Found(Quote {
            symbol: "GOOG".to_string(),
            latest_price: 1.0,
        });
        assert_eq!(found.into_quote().map(|q| q.symbol), Some("GOOG".to_string()));

        assert_eq!(QuoteLookup::NotFound.into_quote(), None);
    }
}
