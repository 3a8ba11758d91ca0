//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g. '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route to list transactions, newest first.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to list the most recent transactions.
pub const RECENT_TRANSACTIONS: &str = "/api/transactions/recent";
/// The route to list the payment channel types with their counts.
pub const TRANSACTION_TYPES: &str = "/api/transactions/types";
/// The route to search transactions with a filter body.
pub const TRANSACTION_SEARCH: &str = "/api/transactions/search";
/// The route to list one customer's transactions.
pub const CUSTOMER_TRANSACTIONS: &str = "/api/transactions/customer/{customer_id}";
/// The route to list one merchant's transactions.
pub const MERCHANT_TRANSACTIONS: &str = "/api/transactions/merchant/{merchant_id}";
/// The route to fetch or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// The route for headline statistics over the whole store.
pub const STATS_OVERVIEW: &str = "/api/stats/overview";
/// The route for the transaction amount distribution.
pub const STATS_AMOUNT_DISTRIBUTION: &str = "/api/stats/amount-distribution";
/// The route for per-merchant-category statistics.
pub const STATS_BY_TYPE: &str = "/api/stats/by-type";
/// The route for per-day statistics.
pub const STATS_DAILY: &str = "/api/stats/daily";

/// The route for the fraud summary.
pub const FRAUD_SUMMARY: &str = "/api/fraud/summary";
/// The route for per-channel fraud statistics.
pub const FRAUD_BY_TYPE: &str = "/api/fraud/by-type";
/// The route to score a transaction against the fraud indicators.
pub const FRAUD_PREDICT: &str = "/api/fraud/predict";

/// The route to list customers.
pub const CUSTOMERS: &str = "/api/customers";
/// The route for the most active customers.
pub const TOP_CUSTOMERS: &str = "/api/customers/top";
/// The route for one customer's aggregate figures.
pub const CUSTOMER: &str = "/api/customers/{customer_id}";

/// The route for the service health report.
pub const HEALTH: &str = "/api/system/health";
/// The route for service and data metadata.
pub const METADATA: &str = "/api/system/metadata";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/api/customers/{customer_id}',
/// '{customer_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter. If no parameter is found in
/// `endpoint_path`, the function returns the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
