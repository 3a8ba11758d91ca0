//! Route handlers for the customer summary endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    config::{DEFAULT_TOP_CUSTOMERS, MAX_LIMIT, MIN_LIMIT},
    customer::{self, CustomerDetails, CustomerSummary, TopCustomer},
    pagination::{Paginated, PaginationParams},
};

/// A route handler for listing customers in ID order.
pub async fn get_customers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<CustomerSummary>>, Error> {
    let params = params.validated()?;
    let store = state.read_store()?;

    Ok(Json(customer::list_all(&store, params)))
}

/// The query parameters accepted by the top customers listing.
#[derive(Debug, Deserialize)]
pub struct TopParams {
    /// How many of the busiest customers to return.
    #[serde(default = "default_top_n")]
    pub n: u64,
}

fn default_top_n() -> u64 {
    DEFAULT_TOP_CUSTOMERS
}

/// A route handler for the customers with the most transactions.
///
/// `n` is bounded the same way as a page limit.
pub async fn get_top_customers(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> Result<Json<Vec<TopCustomer>>, Error> {
    if params.n < MIN_LIMIT || params.n > MAX_LIMIT {
        return Err(Error::InvalidPagination(format!(
            "n must be between {MIN_LIMIT} and {MAX_LIMIT}, got {}",
            params.n
        )));
    }

    let store = state.read_store()?;

    Ok(Json(customer::top(&store, params.n)))
}

/// A route handler for one customer's aggregate details.
///
/// An unknown customer is not an error, the response echoes the ID with
/// zeroed figures.
pub async fn get_customer_details(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerDetails>, Error> {
    let store = state.read_store()?;

    Ok(Json(customer::details(&store, &customer_id)))
}
