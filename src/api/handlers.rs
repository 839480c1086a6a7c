//! Stock price API endpoint handlers
//!
//! Provides handlers for:
//! - Health check (`/health`, `/`)
//! - Stock prices with like votes (`/api/stock-prices`)

use crate::api::types::*;
use crate::quotes::Quote;
use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, RawQuery, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::future::join;
use std::any::Any;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, error, info};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check(AxumState(state): AxumState<Arc<AppState>>) -> impl IntoResponse {
    match state.sqlite.count_stocks() {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                stocks: Some(count),
            }),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error".to_string(),
                    stocks: None,
                }),
            )
        }
    }
}

// ============================================================================
// Stock Prices
// ============================================================================

/// Stock price endpoint - GET /api/stock-prices?stock=SYM[&stock=SYM2][&like=true]
pub async fn stock_prices(
    AxumState(state): AxumState<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Json<StockPricesResponse> {
    let query = StockPricesQuery::parse(raw_query.as_deref());
    let peer = peer.map(|ConnectInfo(addr)| addr.ip());
    let ip = client_ip(&headers, peer, state.trust_proxy);

    Json(check_stock_prices(&state, &query, &ip.to_string()).await)
}

/// Answer a parsed stock price request for the given client identity.
///
/// Never fails: every error becomes an `error` payload.
pub async fn check_stock_prices(
    state: &AppState,
    query: &StockPricesQuery,
    client_id: &str,
) -> StockPricesResponse {
    match resolve_stock_prices(state, query, client_id).await {
        Ok(data) => StockPricesResponse::data(data),
        Err(err) => {
            match &err {
                PriceCheckError::Server(e) => {
                    error!("Stock price request failed ({}): {}", e.code(), e)
                }
                other => debug!("Stock price request rejected: {}", other),
            }
            err.into()
        }
    }
}

async fn resolve_stock_prices(
    state: &AppState,
    query: &StockPricesQuery,
    client_id: &str,
) -> Result<StockData, PriceCheckError> {
    if query.is_missing_stock() {
        return Err(PriceCheckError::MissingStock);
    }

    let like_token = state.hasher.hash(client_id);

    match query.stocks.as_slice() {
        [symbol] => {
            let quote = state
                .quotes
                .fetch(symbol)
                .await
                .into_quote()
                .ok_or_else(|| PriceCheckError::InvalidSymbol(symbol.clone()))?;

            let record =
                state
                    .sqlite
                    .get_or_create_stock(&quote.symbol, Some(&like_token), query.like)?;

            info!(
                "{}: {} ({} likes, like={}, token={})",
                quote.symbol,
                quote.latest_price,
                record.like_count(),
                query.like,
                like_token
            );

            Ok(StockData::Single(StockPrice {
                stock: quote.symbol,
                price: quote.latest_price,
                likes: record.like_count(),
            }))
        }
        [first, second] => {
            // Both lookups settle before either result is inspected
            let (first_lookup, second_lookup) =
                join(state.quotes.fetch(first), state.quotes.fetch(second)).await;

            let first_quote = first_lookup
                .into_quote()
                .ok_or_else(|| PriceCheckError::InvalidSymbol(first.clone()))?;
            let second_quote = second_lookup
                .into_quote()
                .ok_or_else(|| PriceCheckError::InvalidSymbol(second.clone()))?;

            let first_likes = like_count(state, &first_quote, &like_token, query.like)?;
            let second_likes = like_count(state, &second_quote, &like_token, query.like)?;

            info!(
                "{} vs {}: {} / {} likes (like={}, token={})",
                first_quote.symbol,
                second_quote.symbol,
                first_likes,
                second_likes,
                query.like,
                like_token
            );

            Ok(StockData::Pair([
                RelativeStockPrice {
                    stock: first_quote.symbol,
                    price: first_quote.latest_price,
                    rel_likes: first_likes - second_likes,
                },
                RelativeStockPrice {
                    stock: second_quote.symbol,
                    price: second_quote.latest_price,
                    rel_likes: second_likes - first_likes,
                },
            ]))
        }
        more => Err(PriceCheckError::TooManyStocks(more.len())),
    }
}

fn like_count(
    state: &AppState,
    quote: &Quote,
    like_token: &str,
    wants_like: bool,
) -> Result<i64, PriceCheckError> {
    let record = state
        .sqlite
        .get_or_create_stock(&quote.symbol, Some(like_token), wants_like)?;
    Ok(record.like_count())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolve the client address used as like identity.
///
/// Behind a trusted proxy the left-most `X-Forwarded-For` entry wins. When the
/// router is served without connect info there is no peer, so the header is
/// used if present and the unspecified address otherwise. IPv4-mapped IPv6
/// addresses are reduced to plain IPv4.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, trust_proxy: bool) -> IpAddr {
    let forwarded = if trust_proxy || peer.is_none() {
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    } else {
        None
    };

    forwarded
        .or(peer)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        .to_canonical()
}

/// Response for a panicking handler, installed via `CatchPanicLayer`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    Json(StockPricesResponse::error(SERVER_ERROR_MESSAGE)).into_response()
}
