//! Defines the REST API's routes and how handlers are wired to them.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    routes::{
        customers::{get_customer_details, get_customers, get_top_customers},
        fraud::{get_fraud_by_type, get_fraud_summary, predict_fraud},
        statistics::{
            get_amount_distribution, get_daily_stats, get_stats_by_type, get_stats_overview,
        },
        system::{get_health, get_metadata},
        transactions::{
            delete_transaction, get_customer_transactions, get_merchant_transactions,
            get_recent_transactions, get_transaction, get_transaction_types, get_transactions,
            search_transactions,
        },
    },
};

/// Return a router with all the API's routes.
pub fn build_router(state: AppState) -> Router {
    let transaction_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::RECENT_TRANSACTIONS, get(get_recent_transactions))
        .route(endpoints::TRANSACTION_TYPES, get(get_transaction_types))
        .route(endpoints::TRANSACTION_SEARCH, post(search_transactions))
        .route(
            endpoints::CUSTOMER_TRANSACTIONS,
            get(get_customer_transactions),
        )
        .route(
            endpoints::MERCHANT_TRANSACTIONS,
            get(get_merchant_transactions),
        )
        .route(endpoints::TRANSACTION, get(get_transaction))
        .route(endpoints::TRANSACTION, delete(delete_transaction));

    let stats_routes = Router::new()
        .route(endpoints::STATS_OVERVIEW, get(get_stats_overview))
        .route(
            endpoints::STATS_AMOUNT_DISTRIBUTION,
            get(get_amount_distribution),
        )
        .route(endpoints::STATS_BY_TYPE, get(get_stats_by_type))
        .route(endpoints::STATS_DAILY, get(get_daily_stats));

    let fraud_routes = Router::new()
        .route(endpoints::FRAUD_SUMMARY, get(get_fraud_summary))
        .route(endpoints::FRAUD_BY_TYPE, get(get_fraud_by_type))
        .route(endpoints::FRAUD_PREDICT, post(predict_fraud));

    let customer_routes = Router::new()
        .route(endpoints::CUSTOMERS, get(get_customers))
        .route(endpoints::TOP_CUSTOMERS, get(get_top_customers))
        .route(endpoints::CUSTOMER, get(get_customer_details));

    let system_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::METADATA, get(get_metadata));

    transaction_routes
        .merge(stats_routes)
        .merge(fraud_routes)
        .merge(customer_routes)
        .merge(system_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// A fallback handler for requests that match no route.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
