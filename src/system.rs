//! Service health and deployment metadata reports.

use std::time::Instant;

use serde::Serialize;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{
    Error,
    config::API_VERSION,
    model::{now_naive, timestamp},
    store::TransactionStore,
};

/// The report returned by the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// "healthy" when the store probe succeeded, "unhealthy" otherwise.
    pub status: String,
    /// How long the store probe took, in milliseconds.
    pub response_time_ms: f64,
}

/// Deployment facts and the loaded data window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetadata {
    /// How many transactions are currently stored.
    pub total_transaction_count: u64,
    /// When the bulk load finished.
    #[serde(with = "time::serde::rfc3339")]
    pub data_load_date: OffsetDateTime,
    /// The running service version.
    pub api_version: String,
    /// Earliest transaction timestamp ever observed.
    #[serde(with = "timestamp")]
    pub min_date: PrimitiveDateTime,
    /// Latest transaction timestamp ever observed.
    #[serde(with = "timestamp")]
    pub max_date: PrimitiveDateTime,
}

/// Run a trivial read against the store and time it.
///
/// The probe is passed in so the caller decides how the shared store is
/// reached. Any probe failure marks the service unhealthy.
pub fn check_health<F>(probe: F) -> HealthStatus
where
    F: FnOnce() -> Result<usize, Error>,
{
    let started = Instant::now();
    let result = probe();
    let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let status = match result {
        Ok(_) => "healthy",
        Err(error) => {
            tracing::error!("Health probe failed: {error}");
            "unhealthy"
        }
    };

    HealthStatus {
        status: status.to_owned(),
        response_time_ms,
    }
}

/// Describe the running service and the data it has loaded.
///
/// An empty store reports both date bounds as the current time. A store
/// that never saw a bulk load reports the current time as its load date.
pub fn metadata(store: &TransactionStore) -> SystemMetadata {
    let now = now_naive();

    SystemMetadata {
        total_transaction_count: store.len() as u64,
        data_load_date: store.loaded_at().unwrap_or_else(OffsetDateTime::now_utc),
        api_version: API_VERSION.to_owned(),
        min_date: store.min_date().unwrap_or(now),
        max_date: store.max_date().unwrap_or(now),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{Error, config::API_VERSION, model::create_test_transaction, store::TransactionStore};

    use super::{check_health, metadata};

    #[test]
    fn successful_probe_reports_healthy() {
        let got = check_health(|| Ok(42));

        assert_eq!("healthy", got.status);
        assert!(
            got.response_time_ms >= 0.0,
            "response time should not be negative, got {}",
            got.response_time_ms
        );
    }

    #[test]
    fn failed_probe_reports_unhealthy() {
        let got = check_health(|| Err(Error::StoreLock));

        assert_eq!("unhealthy", got.status);
    }

    #[test]
    fn metadata_reports_the_loaded_window() {
        let mut store = TransactionStore::new();
        let mut oldest = create_test_transaction("T1", "C1", 50.0, None);
        oldest.date = datetime!(2023-01-01 00:00:00);
        let mut newest = create_test_transaction("T2", "C1", 75.0, None);
        newest.date = datetime!(2023-12-31 23:59:59);
        store.add(oldest);
        store.add(newest);
        let loaded_at = datetime!(2024-01-05 08:00:00 UTC);
        store.mark_loaded(loaded_at);

        let got = metadata(&store);

        assert_eq!(2, got.total_transaction_count);
        assert_eq!(loaded_at, got.data_load_date);
        assert_eq!(API_VERSION, got.api_version);
        assert_eq!(datetime!(2023-01-01 00:00:00), got.min_date);
        assert_eq!(datetime!(2023-12-31 23:59:59), got.max_date);
    }

    #[test]
    fn metadata_for_empty_store_uses_the_current_time() {
        let store = TransactionStore::new();

        let got = metadata(&store);

        assert_eq!(0, got.total_transaction_count);
        assert_eq!(got.min_date, got.max_date);
    }
}
