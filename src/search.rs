//! Filtered transaction search.
//!
//! Search is a single predicate pass over the store. When an exact-match
//! filter lines up with one of the store's indexes the scan starts from that
//! index slice instead of the whole collection, the remaining filters are
//! then applied as one conjunction.

use serde::Deserialize;

use crate::{model::Transaction, store::TransactionStore};

/// The placeholder value interactive API docs leave in untouched string
/// fields. Treated the same as not supplying the filter at all.
const PLACEHOLDER: &str = "string";

/// The optional filters accepted by the transaction search endpoint.
///
/// Every filter that is present must match (logical AND). An empty filter
/// set matches everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Inclusive lower bound on the transaction amount.
    pub min_amount: Option<f64>,
    /// Inclusive upper bound on the transaction amount.
    pub max_amount: Option<f64>,
    /// Exact customer ID to match.
    pub customer_id: Option<String>,
    /// Exact transaction ID to match.
    pub transaction_id: Option<String>,
    /// Exact merchant city to match.
    pub merchant_city: Option<String>,
    /// Exact payment channel type to match.
    pub channel_type: Option<String>,
}

impl SearchFilters {
    /// Drop empty and placeholder string filters so the scan only sees
    /// values the client genuinely supplied.
    pub fn normalized(self) -> Self {
        Self {
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            customer_id: drop_placeholder(self.customer_id),
            transaction_id: drop_placeholder(self.transaction_id),
            merchant_city: drop_placeholder(self.merchant_city),
            channel_type: drop_placeholder(self.channel_type),
        }
    }

    /// Whether a transaction satisfies every present filter.
    fn matches(&self, transaction: &Transaction) -> bool {
        self.min_amount.is_none_or(|min| transaction.amount >= min)
            && self.max_amount.is_none_or(|max| transaction.amount <= max)
            && self
                .customer_id
                .as_deref()
                .is_none_or(|customer_id| customer_id == transaction.customer_id)
            && self
                .transaction_id
                .as_deref()
                .is_none_or(|id| id == transaction.id)
            && self
                .merchant_city
                .as_deref()
                .is_none_or(|city| city == transaction.merchant_city)
            && self
                .channel_type
                .as_deref()
                .is_none_or(|channel| channel == transaction.channel_type)
    }
}

fn drop_placeholder(filter: Option<String>) -> Option<String> {
    filter.filter(|value| !value.is_empty() && value != PLACEHOLDER)
}

/// Find the transactions matching `filters`, newest first.
///
/// Expects filters that went through [SearchFilters::normalized].
pub fn search<'a>(store: &'a TransactionStore, filters: &SearchFilters) -> Vec<&'a Transaction> {
    let candidates: Vec<&Transaction> = if let Some(id) = filters.transaction_id.as_deref() {
        store.get(id).into_iter().collect()
    } else if let Some(customer_id) = filters.customer_id.as_deref() {
        store.get_by_customer(customer_id)
    } else if let Some(channel_type) = filters.channel_type.as_deref() {
        store.get_by_channel(channel_type)
    } else {
        store.get_all()
    };

    let mut matches: Vec<&Transaction> = candidates
        .into_iter()
        .filter(|transaction| filters.matches(transaction))
        .collect();
    sort_newest_first(&mut matches);

    matches
}

/// Order transactions by timestamp, newest first.
///
/// The sort is stable, so records sharing a timestamp keep their insertion
/// order and results are the same from run to run.
pub(crate) fn sort_newest_first(transactions: &mut [&Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
