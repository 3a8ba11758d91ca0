//! Service-wide constants for pagination, statistics, and load reporting.

/// The version string reported by the system metadata endpoint.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The page number used when a request does not specify one.
pub const DEFAULT_PAGE: u64 = 1;

/// The page size used when a request does not specify one.
pub const DEFAULT_LIMIT: u64 = 50;

/// The smallest accepted page size.
pub const MIN_LIMIT: u64 = 1;

/// The largest accepted page size.
pub const MAX_LIMIT: u64 = 1000;

/// The number of top customers returned when a request does not specify one.
pub const DEFAULT_TOP_CUSTOMERS: u64 = 10;

/// How many parsed rows between progress log events during a bulk load.
pub const LOAD_PROGRESS_INTERVAL: usize = 10_000;

/// A half-open amount range used to bucket transactions by size.
#[derive(Debug, Clone, Copy)]
pub struct AmountRange {
    /// Inclusive lower bound in dollars.
    pub min: f64,
    /// Exclusive upper bound in dollars.
    pub max: f64,
    /// The label reported for this bucket.
    pub label: &'static str,
}

/// The fixed buckets used by the amount distribution statistic.
///
/// A transaction belongs to the first bucket whose range contains its
/// amount.
pub const AMOUNT_BUCKETS: [AmountRange; 4] = [
    AmountRange {
        min: 0.0,
        max: 100.0,
        label: "0-100",
    },
    AmountRange {
        min: 100.0,
        max: 500.0,
        label: "100-500",
    },
    AmountRange {
        min: 500.0,
        max: 1000.0,
        label: "500-1000",
    },
    AmountRange {
        min: 1000.0,
        max: f64::INFINITY,
        label: "1000+",
    },
];
