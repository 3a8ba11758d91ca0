//! Aggregate statistics over the transaction store.
//!
//! Pure functions that summarize the store's current contents: headline
//! totals, the fixed amount distribution, per-category volume, and per-day
//! volume.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, PrimitiveDateTime};

use crate::{
    config::AMOUNT_BUCKETS,
    model::{calendar_date, now_naive, timestamp},
    store::TransactionStore,
};

/// Headline figures for the whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    /// How many transactions are stored.
    pub total_count: u64,
    /// Sum of all transaction amounts.
    pub total_amount: f64,
    /// Mean transaction amount.
    pub average_amount: f64,
    /// Timestamp of the earliest stored transaction.
    #[serde(with = "timestamp")]
    pub min_date: PrimitiveDateTime,
    /// Timestamp of the latest stored transaction.
    #[serde(with = "timestamp")]
    pub max_date: PrimitiveDateTime,
}

/// How many transactions fall within one amount range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountBucket {
    /// The bucket label, e.g. "100-500".
    pub range: String,
    /// Transactions whose amount falls in the range.
    pub count: u64,
    /// Share of all transactions, in percent.
    pub percentage: f64,
}

/// Transaction volume under one merchant category code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// The merchant category code.
    #[serde(rename = "type")]
    pub category: String,
    /// Transactions under the code.
    pub count: u64,
    /// Sum of the amounts under the code.
    pub total_amount: f64,
    /// Mean amount under the code.
    pub average_amount: f64,
}

/// Transaction volume through one payment channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCount {
    /// The payment channel type.
    #[serde(rename = "type")]
    pub channel_type: String,
    /// Transactions made through the channel.
    pub count: u64,
}

/// Transaction volume for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// The day.
    #[serde(with = "calendar_date")]
    pub date: Date,
    /// Transactions dated on the day.
    pub count: u64,
    /// Sum of the day's amounts.
    pub total_amount: f64,
    /// Mean amount for the day.
    pub average_amount: f64,
}

/// Summarize the whole store.
///
/// An empty store reports zeros, with both date bounds set to the current
/// time.
pub fn overview(store: &TransactionStore) -> OverviewStats {
    let transactions = store.get_all();

    let Some(first) = transactions.first() else {
        let now = now_naive();
        return OverviewStats {
            total_count: 0,
            total_amount: 0.0,
            average_amount: 0.0,
            min_date: now,
            max_date: now,
        };
    };

    let mut min_date = first.date;
    let mut max_date = first.date;
    let mut total_amount = 0.0;

    for transaction in &transactions {
        min_date = min_date.min(transaction.date);
        max_date = max_date.max(transaction.date);
        total_amount += transaction.amount;
    }

    OverviewStats {
        total_count: transactions.len() as u64,
        total_amount,
        average_amount: average(total_amount, transactions.len()),
        min_date,
        max_date,
    }
}

/// Count transactions into the fixed amount buckets.
///
/// Each transaction lands in the first bucket whose half-open range contains
/// its amount. An empty store reports every bucket at zero.
pub fn amount_distribution(store: &TransactionStore) -> Vec<AmountBucket> {
    let transactions = store.get_all();
    let total = transactions.len();
    let mut counts = vec![0u64; AMOUNT_BUCKETS.len()];

    for transaction in &transactions {
        let bucket = AMOUNT_BUCKETS
            .iter()
            .position(|bucket| bucket.min <= transaction.amount && transaction.amount < bucket.max);
        if let Some(index) = bucket {
            counts[index] += 1;
        }
    }

    AMOUNT_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, count)| AmountBucket {
            range: bucket.label.to_owned(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// Per merchant-category-code statistics, busiest code first.
///
/// Codes with the same count are ordered lexicographically.
pub fn by_category(store: &TransactionStore) -> Vec<CategoryStats> {
    let mut codes = store.category_codes();
    codes.sort_unstable();

    let mut stats: Vec<CategoryStats> = codes
        .into_iter()
        .map(|code| {
            let transactions = store.get_by_category(code);
            let total_amount: f64 = transactions.iter().map(|t| t.amount).sum();

            CategoryStats {
                category: code.to_owned(),
                count: transactions.len() as u64,
                total_amount,
                average_amount: average(total_amount, transactions.len()),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));

    stats
}

/// Per payment-channel transaction counts, busiest channel first.
///
/// Channels with the same count are ordered lexicographically.
pub fn channel_usage(store: &TransactionStore) -> Vec<ChannelCount> {
    let mut channels = store.channel_types();
    channels.sort_unstable();

    let mut counts: Vec<ChannelCount> = channels
        .into_iter()
        .map(|channel_type| ChannelCount {
            channel_type: channel_type.to_owned(),
            count: store.count_by_channel(channel_type) as u64,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    counts
}

/// Per calendar-day statistics in date order, oldest day first.
pub fn daily(store: &TransactionStore) -> Vec<DailyStats> {
    let mut days: BTreeMap<Date, (u64, f64)> = BTreeMap::new();

    for transaction in store.get_all() {
        let entry = days.entry(transaction.date.date()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += transaction.amount;
    }

    days.into_iter()
        .map(|(date, (count, total_amount))| DailyStats {
            date,
            count,
            total_amount,
            average_amount: average(total_amount, count as usize),
        })
        .collect()
}

/// The mean of `total` over `count` items, 0 when there are none.
pub(crate) fn average(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{model::create_test_transaction, store::TransactionStore};

    use super::{amount_distribution, by_category, channel_usage, daily, overview};

    #[test]
    fn overview_totals_the_store() {
        let mut store = TransactionStore::new();
        let mut oldest = create_test_transaction("T1", "C1", 50.0, None);
        oldest.date = datetime!(2023-06-01 09:00:00);
        let mut newest = create_test_transaction("T2", "C2", 150.0, None);
        newest.date = datetime!(2023-06-03 18:30:00);
        store.add(oldest);
        store.add(newest);

        let got = overview(&store);

        assert_eq!(2, got.total_count);
        assert_eq!(200.0, got.total_amount);
        assert_eq!(100.0, got.average_amount);
        assert_eq!(datetime!(2023-06-01 09:00:00), got.min_date);
        assert_eq!(datetime!(2023-06-03 18:30:00), got.max_date);
    }

    #[test]
    fn overview_of_empty_store_reports_zeros_dated_now() {
        let store = TransactionStore::new();

        let got = overview(&store);

        assert_eq!(0, got.total_count);
        assert_eq!(0.0, got.total_amount);
        assert_eq!(0.0, got.average_amount);
        assert_eq!(got.min_date, got.max_date);
    }

    #[test]
    fn amounts_land_in_the_first_matching_bucket() {
        let mut store = TransactionStore::new();
        for (id, amount) in [
            ("T1", 0.0),
            ("T2", 99.99),
            ("T3", 100.0),
            ("T4", 499.99),
            ("T5", 500.0),
            ("T6", 999.99),
            ("T7", 1000.0),
            ("T8", 5000.0),
        ] {
            store.add(create_test_transaction(id, "C1", amount, None));
        }

        let got = amount_distribution(&store);

        let counts: Vec<u64> = got.iter().map(|bucket| bucket.count).collect();
        let ranges: Vec<&str> = got.iter().map(|bucket| bucket.range.as_str()).collect();
        assert_eq!(vec![2, 2, 2, 2], counts);
        assert_eq!(vec!["0-100", "100-500", "500-1000", "1000+"], ranges);
        assert!(got.iter().all(|bucket| bucket.percentage == 25.0));
    }

    #[test]
    fn empty_store_reports_every_bucket_at_zero() {
        let store = TransactionStore::new();

        let got = amount_distribution(&store);

        assert_eq!(4, got.len());
        assert!(got.iter().all(|bucket| bucket.count == 0));
        assert!(got.iter().all(|bucket| bucket.percentage == 0.0));
    }

    #[test]
    fn categories_rank_by_count_then_code() {
        let mut store = TransactionStore::new();
        let mut grocery_one = create_test_transaction("T1", "C1", 10.0, None);
        grocery_one.mcc = "5411".to_owned();
        let mut grocery_two = create_test_transaction("T2", "C1", 30.0, None);
        grocery_two.mcc = "5411".to_owned();
        let mut utilities = create_test_transaction("T3", "C1", 100.0, None);
        utilities.mcc = "4900".to_owned();
        let mut restaurant = create_test_transaction("T4", "C1", 100.0, None);
        restaurant.mcc = "5812".to_owned();
        store.add(grocery_one);
        store.add(grocery_two);
        store.add(utilities);
        store.add(restaurant);

        let got = by_category(&store);

        let codes: Vec<&str> = got.iter().map(|stats| stats.category.as_str()).collect();
        assert_eq!(vec!["5411", "4900", "5812"], codes);
        assert_eq!(2, got[0].count);
        assert_eq!(40.0, got[0].total_amount);
        assert_eq!(20.0, got[0].average_amount);
    }

    #[test]
    fn channel_usage_ranks_by_count() {
        let mut store = TransactionStore::new();
        store.add(create_test_transaction("T1", "C1", 10.0, None));
        store.add(create_test_transaction("T2", "C1", 10.0, None));
        let mut online = create_test_transaction("T3", "C1", 10.0, None);
        online.channel_type = "Online Transaction".to_owned();
        store.add(online);

        let got = channel_usage(&store);

        assert_eq!(2, got.len());
        assert_eq!("Swipe Transaction", got[0].channel_type);
        assert_eq!(2, got[0].count);
        assert_eq!("Online Transaction", got[1].channel_type);
        assert_eq!(1, got[1].count);
    }

    #[test]
    fn daily_groups_by_calendar_date_ascending() {
        let mut store = TransactionStore::new();
        let mut late_morning = create_test_transaction("T1", "C1", 10.0, None);
        late_morning.date = datetime!(2023-06-02 11:00:00);
        let mut evening = create_test_transaction("T2", "C1", 30.0, None);
        evening.date = datetime!(2023-06-02 19:00:00);
        let mut previous_day = create_test_transaction("T3", "C1", 100.0, None);
        previous_day.date = datetime!(2023-06-01 09:00:00);
        store.add(late_morning);
        store.add(evening);
        store.add(previous_day);

        let got = daily(&store);

        assert_eq!(2, got.len());
        assert_eq!(date!(2023-06-01), got[0].date);
        assert_eq!(1, got[0].count);
        assert_eq!(date!(2023-06-02), got[1].date);
        assert_eq!(2, got[1].count);
        assert_eq!(40.0, got[1].total_amount);
        assert_eq!(20.0, got[1].average_amount);
    }
}
