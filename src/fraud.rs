//! Fraud analytics and the rule-based fraud score.
//!
//! A transaction counts as fraudulent when it carries a non-empty error
//! annotation. The predictor below is deliberately simple: a fixed set of
//! additive indicators, no model.

use serde::Serialize;

use crate::{model::Transaction, store::TransactionStore};

/// The reasoning reported when no fraud indicator fires.
const NO_INDICATORS: &str = "no fraud indicators detected";

/// Totals for fraudulent activity across the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudSummary {
    /// How many transactions carry error annotations.
    pub total_fraud_count: u64,
    /// Fraudulent share of all transactions, between 0 and 1.
    pub fraud_rate: f64,
    /// Sum of the fraudulent transaction amounts.
    pub total_fraud_amount: f64,
}

/// Fraud volume within one payment channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFraudStats {
    /// The payment channel type.
    #[serde(rename = "type")]
    pub channel_type: String,
    /// Fraudulent transactions through the channel.
    pub fraud_count: u64,
    /// All transactions through the channel.
    pub total_count: u64,
    /// Fraudulent share within the channel, between 0 and 1.
    pub fraud_rate: f64,
}

/// The outcome of scoring a transaction against the fraud indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudPrediction {
    /// Score between 0 and 1, higher means more suspicious.
    pub fraud_score: f64,
    /// The triggered indicators in check order, "; "-separated.
    pub reasoning: String,
}

/// Summarize fraudulent activity across the whole store.
///
/// An empty store reports a fraud rate of zero.
pub fn summary(store: &TransactionStore) -> FraudSummary {
    let fraud = store.fraud_transactions();
    let total_fraud_amount: f64 = fraud.iter().map(|transaction| transaction.amount).sum();
    let fraud_rate = if store.is_empty() {
        0.0
    } else {
        fraud.len() as f64 / store.len() as f64
    };

    FraudSummary {
        total_fraud_count: fraud.len() as u64,
        fraud_rate,
        total_fraud_amount,
    }
}

/// Per payment-channel fraud statistics, most fraud-prone channel first.
///
/// Channels with the same fraud rate are ordered lexicographically.
pub fn by_channel_type(store: &TransactionStore) -> Vec<ChannelFraudStats> {
    let mut channels = store.channel_types();
    channels.sort_unstable();

    let mut stats: Vec<ChannelFraudStats> = channels
        .into_iter()
        .map(|channel_type| {
            let transactions = store.get_by_channel(channel_type);
            let total_count = transactions.len() as u64;
            let fraud_count = transactions
                .iter()
                .filter(|transaction| transaction.is_fraudulent())
                .count() as u64;

            ChannelFraudStats {
                channel_type: channel_type.to_owned(),
                fraud_count,
                total_count,
                fraud_rate: if total_count == 0 {
                    0.0
                } else {
                    fraud_count as f64 / total_count as f64
                },
            }
        })
        .collect();
    stats.sort_by(|a, b| b.fraud_rate.total_cmp(&a.fraud_rate));

    stats
}

/// Score a transaction against the fraud indicators.
///
/// The score adds up the triggered indicators and is clamped to [0, 1]:
/// 0.8 for error annotations, 0.2 for amounts over $5000 (0.1 over $2000),
/// and 0.1 for a missing channel type. The transaction does not need to be
/// in the store.
pub fn predict(transaction: &Transaction) -> FraudPrediction {
    let mut score: f64 = 0.0;
    let mut reasons: Vec<&str> = Vec::new();

    if transaction.is_fraudulent() {
        score += 0.8;
        reasons.push("transaction has error flags");
    }

    if transaction.amount > 5000.0 {
        score += 0.2;
        reasons.push("amount exceeds $5000");
    } else if transaction.amount > 2000.0 {
        score += 0.1;
        reasons.push("amount exceeds $2000");
    }

    if transaction.channel_type.is_empty() {
        score += 0.1;
        reasons.push("missing channel type");
    }

    let reasoning = if reasons.is_empty() {
        NO_INDICATORS.to_owned()
    } else {
        reasons.join("; ")
    };

    FraudPrediction {
        fraud_score: score.clamp(0.0, 1.0),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use crate::{model::create_test_transaction, store::TransactionStore};

    use super::{NO_INDICATORS, by_channel_type, predict, summary};

    fn create_test_store() -> TransactionStore {
        let mut store = TransactionStore::new();
        store.add(create_test_transaction("T1", "C1", 50.0, None));
        store.add(create_test_transaction("T2", "C1", 6000.0, Some("Bad PIN")));
        store.add(create_test_transaction("T3", "C2", 150.0, None));
        store
    }

    #[test]
    fn summary_counts_flagged_transactions() {
        let store = create_test_store();

        let got = summary(&store);

        assert_eq!(1, got.total_fraud_count);
        assert_eq!(1.0 / 3.0, got.fraud_rate);
        assert_eq!(6000.0, got.total_fraud_amount);
    }

    #[test]
    fn summary_of_empty_store_is_all_zero() {
        let store = TransactionStore::new();

        let got = summary(&store);

        assert_eq!(0, got.total_fraud_count);
        assert_eq!(0.0, got.fraud_rate);
        assert_eq!(0.0, got.total_fraud_amount);
    }

    #[test]
    fn channels_rank_by_fraud_rate() {
        let mut store = create_test_store();
        let mut online = create_test_transaction("T4", "C2", 75.0, Some("Bad CVV"));
        online.channel_type = "Online Transaction".to_owned();
        store.add(online);

        let got = by_channel_type(&store);

        assert_eq!(2, got.len());
        assert_eq!("Online Transaction", got[0].channel_type);
        assert_eq!(1.0, got[0].fraud_rate);
        assert_eq!(1, got[0].total_count);
        assert_eq!("Swipe Transaction", got[1].channel_type);
        assert_eq!(1, got[1].fraud_count);
        assert_eq!(3, got[1].total_count);
        assert_eq!(1.0 / 3.0, got[1].fraud_rate);
    }

    #[test]
    fn clean_transaction_scores_zero() {
        let transaction = create_test_transaction("T1", "C1", 50.0, None);

        let got = predict(&transaction);

        assert_eq!(0.0, got.fraud_score);
        assert_eq!(NO_INDICATORS, got.reasoning);
    }

    #[test]
    fn error_annotations_dominate_the_score() {
        let transaction = create_test_transaction("T1", "C1", 50.0, Some("Bad PIN"));

        let got = predict(&transaction);

        assert_eq!(0.8, got.fraud_score);
        assert_eq!("transaction has error flags", got.reasoning);
    }

    #[test]
    fn elevated_amount_scores_a_tenth() {
        let transaction = create_test_transaction("T1", "C1", 2500.0, None);

        let got = predict(&transaction);

        assert_eq!(0.1, got.fraud_score);
        assert_eq!("amount exceeds $2000", got.reasoning);
    }

    #[test]
    fn high_amount_scores_a_fifth_not_both_tiers() {
        let transaction = create_test_transaction("T1", "C1", 9000.0, None);

        let got = predict(&transaction);

        assert_eq!(0.2, got.fraud_score);
        assert_eq!("amount exceeds $5000", got.reasoning);
    }

    #[test]
    fn missing_channel_type_scores_a_tenth() {
        let mut transaction = create_test_transaction("T1", "C1", 50.0, None);
        transaction.channel_type = String::new();

        let got = predict(&transaction);

        assert_eq!(0.1, got.fraud_score);
        assert_eq!("missing channel type", got.reasoning);
    }

    #[test]
    fn score_is_clamped_to_one() {
        let mut transaction = create_test_transaction("T1", "C1", 9000.0, Some("Bad PIN"));
        transaction.channel_type = String::new();

        let got = predict(&transaction);

        assert_eq!(1.0, got.fraud_score);
        assert_eq!(
            "transaction has error flags; amount exceeds $5000; missing channel type",
            got.reasoning
        );
    }

    #[test]
    fn triggered_indicators_join_in_check_order() {
        let transaction = create_test_transaction("T1", "C1", 2500.0, Some("Bad PIN"));

        let got = predict(&transaction);

        assert_eq!(0.9, got.fraud_score);
        assert_eq!(
            "transaction has error flags; amount exceeds $2000",
            got.reasoning
        );
    }
}
