//! The in-memory transaction store.
//!
//! Holds every loaded transaction alongside secondary indexes (customer,
//! merchant, merchant category code, channel type) and a fraud list, so that
//! lookups and aggregations never rescan the CSV source. Insertion order is
//! tracked so that scans and stable sorts behave the same from run to run.

use std::collections::HashMap;

use time::{OffsetDateTime, PrimitiveDateTime};

use crate::model::Transaction;

/// An indexed, in-memory collection of transactions.
///
/// The store itself never fails: lookups for unknown keys return empty
/// results and deleting an unknown ID is a no-op. Callers that need to
/// report a missing transaction (e.g. HTTP handlers) decide that themselves
/// from the return values.
#[derive(Debug, Default)]
pub struct TransactionStore {
    records: HashMap<String, Transaction>,
    insertion_order: Vec<String>,
    by_customer: HashMap<String, Vec<String>>,
    by_merchant: HashMap<String, Vec<String>>,
    by_category: HashMap<String, Vec<String>>,
    by_channel: HashMap<String, Vec<String>>,
    fraud_ids: Vec<String>,
    min_date: Option<PrimitiveDateTime>,
    max_date: Option<PrimitiveDateTime>,
    loaded_at: Option<OffsetDateTime>,
}

impl TransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transaction, updating every index.
    ///
    /// Inserting an ID that already exists replaces the previous record and
    /// its index entries (last write wins).
    pub fn add(&mut self, transaction: Transaction) {
        if let Some(previous) = self.records.remove(&transaction.id) {
            self.remove_from_indexes(&previous);
        }

        let id = transaction.id.clone();
        self.by_customer
            .entry(transaction.customer_id.clone())
            .or_default()
            .push(id.clone());
        self.by_merchant
            .entry(transaction.merchant_id.clone())
            .or_default()
            .push(id.clone());
        self.by_category
            .entry(transaction.mcc.clone())
            .or_default()
            .push(id.clone());
        self.by_channel
            .entry(transaction.channel_type.clone())
            .or_default()
            .push(id.clone());

        if transaction.is_fraudulent() {
            self.fraud_ids.push(id.clone());
        }

        self.min_date = Some(match self.min_date {
            Some(min) => min.min(transaction.date),
            None => transaction.date,
        });
        self.max_date = Some(match self.max_date {
            Some(max) => max.max(transaction.date),
            None => transaction.date,
        });

        self.insertion_order.push(id.clone());
        self.records.insert(id, transaction);
    }

    /// Remove a transaction and its entries in every index.
    ///
    /// Returns whether a record was actually removed. The observed date
    /// bounds are left untouched, they only ever widen.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.records.remove(id) {
            Some(transaction) => {
                self.remove_from_indexes(&transaction);
                true
            }
            None => false,
        }
    }

    /// Look up a single transaction by ID.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.records.get(id)
    }

    /// All transactions in insertion order.
    pub fn get_all(&self) -> Vec<&Transaction> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// The transactions made by a customer, oldest insertion first.
    pub fn get_by_customer(&self, customer_id: &str) -> Vec<&Transaction> {
        self.indexed_records(&self.by_customer, customer_id)
    }

    /// The transactions taken by a merchant, oldest insertion first.
    pub fn get_by_merchant(&self, merchant_id: &str) -> Vec<&Transaction> {
        self.indexed_records(&self.by_merchant, merchant_id)
    }

    /// The transactions under a merchant category code.
    pub fn get_by_category(&self, mcc: &str) -> Vec<&Transaction> {
        self.indexed_records(&self.by_category, mcc)
    }

    /// The transactions made through a payment channel.
    pub fn get_by_channel(&self, channel_type: &str) -> Vec<&Transaction> {
        self.indexed_records(&self.by_channel, channel_type)
    }

    /// The transactions flagged as fraudulent, oldest insertion first.
    pub fn fraud_transactions(&self) -> Vec<&Transaction> {
        self.fraud_ids
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// How many transactions are flagged as fraudulent.
    pub fn fraud_count(&self) -> usize {
        self.fraud_ids.len()
    }

    /// The distinct customer IDs present in the store, in no particular
    /// order.
    pub fn customer_ids(&self) -> Vec<&str> {
        self.by_customer.keys().map(String::as_str).collect()
    }

    /// The distinct merchant category codes present in the store.
    pub fn category_codes(&self) -> Vec<&str> {
        self.by_category.keys().map(String::as_str).collect()
    }

    /// The distinct payment channel types present in the store.
    pub fn channel_types(&self) -> Vec<&str> {
        self.by_channel.keys().map(String::as_str).collect()
    }

    /// How many transactions a customer has without materializing them.
    pub fn count_by_customer(&self, customer_id: &str) -> usize {
        self.by_customer.get(customer_id).map_or(0, Vec::len)
    }

    /// How many transactions went through a payment channel.
    pub fn count_by_channel(&self, channel_type: &str) -> usize {
        self.by_channel.get(channel_type).map_or(0, Vec::len)
    }

    /// The number of stored transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The earliest transaction timestamp ever observed, if any.
    pub fn min_date(&self) -> Option<PrimitiveDateTime> {
        self.min_date
    }

    /// The latest transaction timestamp ever observed, if any.
    pub fn max_date(&self) -> Option<PrimitiveDateTime> {
        self.max_date
    }

    /// When the bulk load into this store finished, if it has.
    pub fn loaded_at(&self) -> Option<OffsetDateTime> {
        self.loaded_at
    }

    /// Record the completion time of a bulk load.
    pub fn mark_loaded(&mut self, at: OffsetDateTime) {
        self.loaded_at = Some(at);
    }

    fn indexed_records(&self, index: &HashMap<String, Vec<String>>, key: &str) -> Vec<&Transaction> {
        index
            .get(key)
            .map(|ids| ids.iter().filter_map(|id| self.records.get(id)).collect())
            .unwrap_or_default()
    }

    fn remove_from_indexes(&mut self, transaction: &Transaction) {
        remove_index_entry(&mut self.by_customer, &transaction.customer_id, &transaction.id);
        remove_index_entry(&mut self.by_merchant, &transaction.merchant_id, &transaction.id);
        remove_index_entry(&mut self.by_category, &transaction.mcc, &transaction.id);
        remove_index_entry(&mut self.by_channel, &transaction.channel_type, &transaction.id);
        self.fraud_ids.retain(|id| id != &transaction.id);
        self.insertion_order.retain(|id| id != &transaction.id);
    }
}

/// Remove an ID from one index key's list, dropping the key once its list
/// empties so key enumerations only report values with live records.
fn remove_index_entry(index: &mut HashMap<String, Vec<String>>, key: &str, id: &str) {
    if let Some(ids) = index.get_mut(key) {
        ids.retain(|entry| entry != id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}
