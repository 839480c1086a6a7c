//! Stock records and like votes
//!
//! A record is created the first time a symbol is referenced and is never
//! deleted. Likes are keyed by `(stock_id, like_token)`, so re-liking from
//! the same client is a no-op.

use crate::db::sqlite::models::StockRecord;
use crate::error::{AppError, Result};
use rusqlite::{params, Connection};

/// Canonical stored form of a ticker symbol
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Get the record for `symbol`, creating it if needed, and record a like.
///
/// Insert-if-absent and the conditional like append run in one transaction
/// against the unique constraints, so two first requests for the same new
/// symbol end up sharing one record.
pub fn get_or_create_stock(
    conn: &mut Connection,
    symbol: &str,
    like_token: Option<&str>,
    wants_like: bool,
) -> Result<StockRecord> {
    let symbol = normalize_symbol(symbol);
    if symbol.is_empty() {
        return Err(AppError::Validation("Stock symbol is required".to_string()));
    }

    let tx = conn.transaction()?;

    let created = tx.execute(
        "INSERT OR IGNORE INTO stocks (symbol) VALUES (?1)",
        params![symbol],
    )? > 0;

    let stock_id: i64 = tx.query_row(
        "SELECT id FROM stocks WHERE symbol = ?1",
        params![symbol],
        |row| row.get(0),
    )?;

    let liked = match (wants_like, like_token) {
        (true, Some(token)) => {
            tx.execute(
                "INSERT OR IGNORE INTO stock_likes (stock_id, like_token) VALUES (?1, ?2)",
                params![stock_id, token],
            )? > 0
        }
        _ => false,
    };

    let record = load_stock(&tx, stock_id)?;
    tx.commit()?;

    if created {
        tracing::info!("Created stock record {}", record.symbol);
    }
    if liked {
        tracing::debug!(
            "Recorded like for {} ({} total)",
            record.symbol,
            record.like_count()
        );
    }

    Ok(record)
}

/// Get a stock record by symbol without creating it
pub fn get_stock(conn: &Connection, symbol: &str) -> Result<Option<StockRecord>> {
    let symbol = normalize_symbol(symbol);

    let result = conn.query_row(
        "SELECT id FROM stocks WHERE symbol = ?1",
        params![symbol],
        |row| row.get::<_, i64>(0),
    );

    match result {
        Ok(stock_id) => Ok(Some(load_stock(conn, stock_id)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Count stock records
pub fn count_stocks(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM stocks", [], |row| row.get(0))?;
    Ok(count)
}

fn load_stock(conn: &Connection, stock_id: i64) -> Result<StockRecord> {
    let (symbol, created_at) = conn.query_row(
        "SELECT symbol, created_at FROM stocks WHERE id = ?1",
        params![stock_id],
        |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
    )?;

    let mut stmt =
        conn.prepare("SELECT like_token FROM stock_likes WHERE stock_id = ?1 ORDER BY id")?;
    let likes = stmt
        .query_map(params![stock_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    Ok(StockRecord {
        id: stock_id,
        symbol,
        likes,
        created_at,
    })
}
