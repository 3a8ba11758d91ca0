//! Bulk loading of the transaction CSV into the store.
//!
//! The load runs once at startup, before the server starts answering
//! requests. Individual rows that cannot be parsed are skipped and counted;
//! an unreadable file or a missing header row aborts the whole load.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info, warn};

use crate::{
    Error,
    config::LOAD_PROGRESS_INTERVAL,
    model::{Transaction, timestamp},
    store::TransactionStore,
};

/// Counters reported by a completed bulk load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// How many rows became stored transactions.
    pub loaded: usize,
    /// How many rows were skipped because they could not be parsed.
    pub errors: usize,
}

/// One row of the transaction CSV, before validation.
///
/// Fields mirror the CSV header names. Everything is read as text first so
/// that a bad value fails row conversion rather than the whole file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    date: String,
    client_id: String,
    card_id: String,
    amount: String,
    use_chip: String,
    merchant_id: String,
    merchant_city: String,
    merchant_state: String,
    zip: String,
    mcc: String,
    #[serde(default)]
    errors: String,
}

impl CsvRow {
    fn into_transaction(self) -> Result<Transaction, Error> {
        let date = PrimitiveDateTime::parse(&self.date, timestamp::FORMAT).map_err(|error| {
            Error::InvalidRecord(format!("could not parse date {:?}: {error}", self.date))
        })?;

        // Amounts are exported with a leading dollar sign, e.g. "$57.87".
        let amount = self
            .amount
            .strip_prefix('$')
            .unwrap_or(&self.amount)
            .parse::<f64>()
            .map_err(|error| {
                Error::InvalidRecord(format!("could not parse amount {:?}: {error}", self.amount))
            })?;

        let errors = if self.errors.is_empty() {
            None
        } else {
            Some(self.errors)
        };

        Ok(Transaction {
            id: self.id,
            date,
            customer_id: self.client_id,
            card_id: self.card_id,
            amount,
            channel_type: self.use_chip,
            merchant_id: self.merchant_id,
            merchant_city: self.merchant_city,
            merchant_state: self.merchant_state,
            zip: self.zip,
            mcc: self.mcc,
            errors,
        })
    }
}

/// Load every transaction from the CSV at `path` into a fresh store.
pub fn load_from_path(path: &Path) -> Result<(TransactionStore, LoadSummary), Error> {
    let file = File::open(path).map_err(|error| {
        Error::DataLoad(format!("could not open {}: {error}", path.display()))
    })?;

    load_from_reader(BufReader::new(file))
}

/// Load transactions from any CSV source into a fresh store.
///
/// Rows that fail to parse are skipped and counted in the summary; rows
/// without a transaction ID are skipped silently. A source that cannot be
/// read or has no header row fails with [Error::DataLoad] and no store is
/// produced.
pub fn load_from_reader<R: Read>(source: R) -> Result<(TransactionStore, LoadSummary), Error> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let headers = reader.headers().map_err(|error| {
        Error::DataLoad(format!("could not read the CSV header row: {error}"))
    })?;
    if headers.is_empty() {
        return Err(Error::DataLoad("the CSV source has no header row".to_owned()));
    }

    let mut store = TransactionStore::new();
    let mut summary = LoadSummary::default();

    // Data rows are numbered from 2, line 1 is the header.
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let line = index + 2;

        let row = match result {
            Ok(row) => row,
            Err(error) => {
                summary.errors += 1;
                warn!("Skipping row {line}: {error}");
                continue;
            }
        };

        if row.id.is_empty() {
            debug!("Skipping row {line} with no transaction ID.");
            continue;
        }

        match row.into_transaction() {
            Ok(transaction) => {
                store.add(transaction);
                summary.loaded += 1;

                if summary.loaded % LOAD_PROGRESS_INTERVAL == 0 {
                    info!("Loaded {} transactions...", summary.loaded);
                }
            }
            Err(error) => {
                summary.errors += 1;
                warn!("Skipping row {line}: {error}");
            }
        }
    }

    store.mark_loaded(OffsetDateTime::now_utc());
    info!(
        "Finished loading {} transactions ({} rows skipped).",
        summary.loaded, summary.errors
    );

    Ok((store, summary))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::Error;

    use super::load_from_reader;

    const HEADER: &str =
        "id,date,client_id,card_id,amount,use_chip,merchant_id,merchant_city,merchant_state,zip,mcc,errors";

    #[test]
    fn loads_rows_and_builds_indexes() {
        let csv = format!(
            "{HEADER}\n\
            T1,2023-06-01 09:00:00,C1,2972,$50.00,Swipe Transaction,59935,Beulah,ND,58523,5499,\n\
            T2,2023-06-03 18:30:00,C1,2972,6000,Online Transaction,59935,ONLINE,,,5499,Bad PIN\n"
        );

        let (store, summary) = load_from_reader(csv.as_bytes()).expect("Could not load test CSV.");

        assert_eq!(2, summary.loaded);
        assert_eq!(0, summary.errors);
        assert_eq!(2, store.len());
        assert_eq!(2, store.get_by_customer("C1").len());
        assert_eq!(1, store.fraud_count());
        assert!(store.loaded_at().is_some());

        let groceries = store.get("T1").expect("T1 should have been loaded.");
        assert_eq!(50.0, groceries.amount);
        assert_eq!(datetime!(2023-06-01 09:00:00), groceries.date);
        assert_eq!("Swipe Transaction", groceries.channel_type);
        assert_eq!(None, groceries.errors);

        let flagged = store.get("T2").expect("T2 should have been loaded.");
        assert_eq!(Some("Bad PIN"), flagged.errors.as_deref());
    }

    #[test]
    fn skips_rows_without_an_id_silently() {
        let csv = format!(
            "{HEADER}\n\
            ,2023-06-01 09:00:00,C1,2972,$50.00,Swipe Transaction,59935,Beulah,ND,58523,5499,\n\
            T2,2023-06-02 10:00:00,C1,2972,$10.00,Swipe Transaction,59935,Beulah,ND,58523,5499,\n"
        );

        let (store, summary) = load_from_reader(csv.as_bytes()).expect("Could not load test CSV.");

        assert_eq!(1, summary.loaded);
        assert_eq!(0, summary.errors);
        assert_eq!(1, store.len());
    }

    #[test]
    fn counts_unparseable_rows_and_keeps_going() {
        let csv = format!(
            "{HEADER}\n\
            T1,junk,C1,2972,$50.00,Swipe Transaction,59935,Beulah,ND,58523,5499,\n\
            T2,2023-06-02 10:00:00,C1,2972,not-money,Swipe Transaction,59935,Beulah,ND,58523,5499,\n\
            T3,2023-06-03 11:00:00,C2,2972,$25.00,Swipe Transaction,59935,Beulah,ND,58523,5499,\n"
        );

        let (store, summary) = load_from_reader(csv.as_bytes()).expect("Could not load test CSV.");

        assert_eq!(1, summary.loaded);
        assert_eq!(2, summary.errors);
        assert_eq!(Some(25.0), store.get("T3").map(|t| t.amount));
    }

    #[test]
    fn counts_rows_with_missing_fields() {
        let csv = format!(
            "{HEADER}\n\
            T1,2023-06-01 09:00:00,C1\n\
            T2,2023-06-02 10:00:00,C1,2972,$10.00,Swipe Transaction,59935,Beulah,ND,58523,5499,\n"
        );

        let (store, summary) = load_from_reader(csv.as_bytes()).expect("Could not load test CSV.");

        assert_eq!(1, summary.loaded);
        assert_eq!(1, summary.errors);
        assert_eq!(1, store.len());
    }

    #[test]
    fn header_only_input_loads_an_empty_store() {
        let csv = format!("{HEADER}\n");

        let (store, summary) = load_from_reader(csv.as_bytes()).expect("Could not load test CSV.");

        assert!(store.is_empty());
        assert_eq!(0, summary.loaded);
        assert_eq!(0, summary.errors);
        assert!(store.loaded_at().is_some());
    }

    #[test]
    fn empty_input_aborts_the_load() {
        let got = load_from_reader("".as_bytes());

        assert!(matches!(got, Err(Error::DataLoad(_))));
    }
}
