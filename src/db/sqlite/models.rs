//! SQLite database models

use serde::{Deserialize, Serialize};

/// Per-symbol stock record with its like-tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: i64,
    /// Upper-cased ticker, unique
    pub symbol: String,
    /// Hashed client identities, each at most once
    pub likes: Vec<String>,
    pub created_at: String,
}

impl StockRecord {
    /// Number of distinct clients that liked this stock
    pub fn like_count(&self) -> i64 {
        self.likes.len() as i64
    }

    pub fn is_liked_by(&self, like_token: &str) -> bool {
        self.likes.iter().any(|t| t == like_token)
    }
}
