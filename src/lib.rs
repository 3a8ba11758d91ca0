//! Cardwatch is a web service for exploring card transaction data.
//!
//! A CSV export of transactions is loaded into an in-memory indexed store at
//! startup, and this library provides a JSON REST API serving paginated,
//! filtered, and aggregated views over that store.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod config;
mod csv_import;
mod customer;
mod endpoints;
mod fraud;
mod model;
mod pagination;
mod routes;
mod routing;
mod search;
mod state;
mod stats;
mod store;
mod system;

pub use csv_import::{LoadSummary, load_from_path};
pub use model::Transaction;
pub use routing::build_router;
pub use state::AppState;
pub use store::TransactionStore;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested transaction was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// transaction ID is correct and that the transaction has not been
    /// deleted.
    #[error("the requested transaction could not be found")]
    NotFound,

    /// The client requested a page or page size outside the allowed range.
    #[error("invalid pagination parameters: {0}")]
    InvalidPagination(String),

    /// The client supplied a search filter combination that cannot be
    /// evaluated.
    ///
    /// Currently unused since every filter field is optional, but reserved
    /// so that future filter validation does not change the error surface.
    #[error("invalid search filters: {0}")]
    InvalidSearchFilters(String),

    /// The transaction CSV could not be opened or had no header row.
    ///
    /// This aborts the bulk load, no partially loaded store is kept.
    #[error("could not load transaction data: {0}")]
    DataLoad(String),

    /// A CSV row could not be parsed as a transaction.
    ///
    /// The loader catches this per row, logs it, and carries on. It never
    /// reaches an HTTP response.
    #[error("invalid transaction record: {0}")]
    InvalidRecord(String),

    /// Could not acquire the store lock.
    #[error("could not acquire the transaction store lock")]
    StoreLock,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidPagination(_) | Error::InvalidSearchFilters(_) => {
                StatusCode::BAD_REQUEST
            }
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
