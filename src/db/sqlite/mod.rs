//! SQLite database module

pub mod models;
mod migrations;
mod stock;

use crate::error::Result;
pub use models::StockRecord;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// SQLite database wrapper
pub struct SqliteDb {
    conn: Mutex<Connection>,
}

impl SqliteDb {
    /// Create new SQLite database connection
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::from_connection(conn)
    }

    /// Create an in-memory database (tests, ephemeral runs)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.run_migrations()?;

        Ok(db)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    // ========== Stock Methods ==========

    /// Get or create the record for a symbol, optionally recording a like
    pub fn get_or_create_stock(
        &self,
        symbol: &str,
        like_token: Option<&str>,
        wants_like: bool,
    ) -> Result<StockRecord> {
        let mut conn = self.conn.lock();
        stock::get_or_create_stock(&mut conn, symbol, like_token, wants_like)
    }

    /// Get a stock record without creating it
    pub fn get_stock(&self, symbol: &str) -> Result<Option<StockRecord>> {
        let conn = self.conn.lock();
        stock::get_stock(&conn, symbol)
    }

    /// Number of stock records
    pub fn count_stocks(&self) -> Result<i64> {
        let conn = self.conn.lock();
        stock::count_stocks(&conn)
    }
}
