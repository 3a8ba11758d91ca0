//! Per-customer summaries and rankings.

use serde::Serialize;

use crate::{
    pagination::{Paginated, PaginationParams, take_page},
    stats::average,
    store::TransactionStore,
};

/// A customer and how many transactions they have made.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// The customer's ID.
    pub customer_id: String,
    /// How many transactions the customer has made.
    pub transaction_count: u64,
}

/// Aggregate spending figures for one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    /// The customer's ID, echoed from the request.
    pub customer_id: String,
    /// How many transactions the customer has made.
    pub transaction_count: u64,
    /// Sum of the customer's transaction amounts.
    pub total_amount: f64,
    /// Mean transaction amount for the customer.
    pub average_amount: f64,
    /// How many of the customer's transactions are flagged as fraudulent.
    pub fraud_count: u64,
}

/// A customer's entry in the most-active ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    /// The customer's ID.
    pub customer_id: String,
    /// How many transactions the customer has made.
    pub transaction_count: u64,
    /// Sum of the customer's transaction amounts.
    pub total_amount: f64,
}

/// List every customer with their transaction count, paginated.
///
/// Customers are ordered lexicographically by ID.
pub fn list_all(store: &TransactionStore, params: PaginationParams) -> Paginated<CustomerSummary> {
    let mut ids = store.customer_ids();
    ids.sort_unstable();

    let total_count = ids.len() as u64;
    let page = take_page(ids, params);

    let summaries = page
        .into_iter()
        .map(|customer_id| CustomerSummary {
            customer_id: customer_id.to_owned(),
            transaction_count: store.count_by_customer(customer_id) as u64,
        })
        .collect();

    Paginated::new(summaries, params, total_count)
}

/// Aggregate figures for one customer.
///
/// An unknown customer is not an error: the result echoes the requested ID
/// with every figure at zero.
pub fn details(store: &TransactionStore, customer_id: &str) -> CustomerDetails {
    let transactions = store.get_by_customer(customer_id);
    let total_amount: f64 = transactions.iter().map(|transaction| transaction.amount).sum();
    let fraud_count = transactions
        .iter()
        .filter(|transaction| transaction.is_fraudulent())
        .count() as u64;

    CustomerDetails {
        customer_id: customer_id.to_owned(),
        transaction_count: transactions.len() as u64,
        total_amount,
        average_amount: average(total_amount, transactions.len()),
        fraud_count,
    }
}

/// The `n` customers with the most transactions, busiest first.
///
/// Customers with the same count rank lexicographically by ID. Asking for
/// more customers than exist returns them all.
pub fn top(store: &TransactionStore, n: u64) -> Vec<TopCustomer> {
    let mut ids = store.customer_ids();
    ids.sort_unstable();

    let mut ranking: Vec<TopCustomer> = ids
        .into_iter()
        .map(|customer_id| {
            let transactions = store.get_by_customer(customer_id);

            TopCustomer {
                customer_id: customer_id.to_owned(),
                transaction_count: transactions.len() as u64,
                total_amount: transactions
                    .iter()
                    .map(|transaction| transaction.amount)
                    .sum(),
            }
        })
        .collect();
    ranking.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));
    ranking.truncate(n as usize);

    ranking
}
