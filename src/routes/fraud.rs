//! Route handlers for fraud analytics and scoring.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    fraud::{self, ChannelFraudStats, FraudPrediction, FraudSummary},
    model::Transaction,
};

/// A route handler for the store-wide fraud summary.
pub async fn get_fraud_summary(State(state): State<AppState>) -> Result<Json<FraudSummary>, Error> {
    let store = state.read_store()?;

    Ok(Json(fraud::summary(&store)))
}

/// A route handler for per-channel fraud rates, most affected channel first.
pub async fn get_fraud_by_type(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChannelFraudStats>>, Error> {
    let store = state.read_store()?;

    Ok(Json(fraud::by_channel_type(&store)))
}

/// A route handler scoring a posted transaction with the fraud heuristic.
///
/// The transaction is taken as given and does not need to exist in the
/// store.
pub async fn predict_fraud(Json(transaction): Json<Transaction>) -> Json<FraudPrediction> {
    Json(fraud::predict(&transaction))
}
