//! Route handlers for listing, searching, and deleting transactions.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    config::{DEFAULT_LIMIT, DEFAULT_PAGE},
    model::Transaction,
    pagination::{Paginated, PaginationParams, take_page},
    search::{self, SearchFilters},
    stats::{self, ChannelCount},
};

/// Sort a result set newest first and cut out the requested page.
///
/// `params` must have been validated.
fn paginate_sorted(
    mut transactions: Vec<&Transaction>,
    params: PaginationParams,
) -> Paginated<Transaction> {
    search::sort_newest_first(&mut transactions);
    let total_count = transactions.len() as u64;
    let page = take_page(transactions, params);

    Paginated::new(page.into_iter().cloned().collect(), params, total_count)
}

/// A route handler for listing every transaction, newest first.
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Transaction>>, Error> {
    let params = params.validated()?;
    let store = state.read_store()?;

    Ok(Json(paginate_sorted(store.get_all(), params)))
}

/// The query parameters accepted by the recent transactions listing.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    /// How many of the newest transactions to return.
    #[serde(default = "default_recent_limit")]
    pub limit: u64,
}

fn default_recent_limit() -> u64 {
    DEFAULT_LIMIT
}

/// A route handler for the most recent transactions.
///
/// A shortcut for the first page of [get_transactions].
pub async fn get_recent_transactions(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Paginated<Transaction>>, Error> {
    let params = PaginationParams {
        page: DEFAULT_PAGE,
        limit: params.limit,
    }
    .validated()?;
    let store = state.read_store()?;

    Ok(Json(paginate_sorted(store.get_all(), params)))
}

/// A route handler for the payment channel types in use, busiest first.
pub async fn get_transaction_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChannelCount>>, Error> {
    let store = state.read_store()?;

    Ok(Json(stats::channel_usage(&store)))
}

/// A route handler for the filtered transaction search.
///
/// Filters arrive as a JSON body, the page window as query parameters.
pub async fn search_transactions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<Paginated<Transaction>>, Error> {
    let params = params.validated()?;
    let filters = filters.normalized();
    let store = state.read_store()?;

    // Matches come back newest first already.
    let matches = search::search(&store, &filters);
    let total_count = matches.len() as u64;
    let page = take_page(matches, params);

    Ok(Json(Paginated::new(
        page.into_iter().cloned().collect(),
        params,
        total_count,
    )))
}

/// A route handler for one customer's transactions, newest first.
pub async fn get_customer_transactions(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Transaction>>, Error> {
    let params = params.validated()?;
    let store = state.read_store()?;

    Ok(Json(paginate_sorted(
        store.get_by_customer(&customer_id),
        params,
    )))
}

/// A route handler for one merchant's transactions, newest first.
pub async fn get_merchant_transactions(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Transaction>>, Error> {
    let params = params.validated()?;
    let store = state.read_store()?;

    Ok(Json(paginate_sorted(
        store.get_by_merchant(&merchant_id),
        params,
    )))
}

/// A route handler for getting a transaction by its ID.
///
/// This function will return the status code 404 if the ID does not refer to
/// a stored transaction.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, Error> {
    let store = state.read_store()?;
    let transaction = store.get(&transaction_id).cloned().ok_or(Error::NotFound)?;

    Ok(Json(transaction))
}

/// A route handler for deleting a transaction by its ID.
///
/// Returns the status code 204 on success and 404 for an unknown ID. The
/// delete is in-memory only, the CSV source is not rewritten.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, Error> {
    let mut store = state.write_store()?;

    if store.delete(&transaction_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound)
    }
}
