//! Route handlers for service health and metadata.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    system::{self, HealthStatus, SystemMetadata},
};

/// A route handler reporting whether the store still answers a trivial read.
///
/// Never fails: a store that cannot be read is reported as unhealthy.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(system::check_health(|| {
        state.read_store().map(|store| store.len())
    }))
}

/// A route handler for store-level metadata.
pub async fn get_metadata(State(state): State<AppState>) -> Result<Json<SystemMetadata>, Error> {
    let store = state.read_store()?;

    Ok(Json(system::metadata(&store)))
}
