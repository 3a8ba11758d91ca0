//! Route handlers for the aggregate statistics endpoints.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    stats::{self, AmountBucket, CategoryStats, DailyStats, OverviewStats},
};

/// A route handler for the store-wide overview figures.
pub async fn get_stats_overview(
    State(state): State<AppState>,
) -> Result<Json<OverviewStats>, Error> {
    let store = state.read_store()?;

    Ok(Json(stats::overview(&store)))
}

/// A route handler for the fixed amount-range distribution.
pub async fn get_amount_distribution(
    State(state): State<AppState>,
) -> Result<Json<Vec<AmountBucket>>, Error> {
    let store = state.read_store()?;

    Ok(Json(stats::amount_distribution(&store)))
}

/// A route handler for per merchant-category-code statistics.
pub async fn get_stats_by_type(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryStats>>, Error> {
    let store = state.read_store()?;

    Ok(Json(stats::by_category(&store)))
}

/// A route handler for per calendar-day statistics.
pub async fn get_daily_stats(State(state): State<AppState>) -> Result<Json<Vec<DailyStats>>, Error> {
    let store = state.read_store()?;

    Ok(Json(stats::daily(&store)))
}
