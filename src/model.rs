//! The core transaction record and its JSON/CSV timestamp formats.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// A single card transaction.
///
/// Records are parsed from the transaction CSV at startup and served as JSON
/// with camelCase field names. The same shape is accepted as the request
/// body of the fraud prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier of the transaction.
    pub id: String,
    /// When the transaction happened.
    #[serde(with = "timestamp")]
    pub date: PrimitiveDateTime,
    /// The customer that made the transaction.
    pub customer_id: String,
    /// The card the transaction was charged to.
    pub card_id: String,
    /// The amount charged, in dollars.
    pub amount: f64,
    /// The payment channel, e.g. "Swipe Transaction" or "Online Transaction".
    pub channel_type: String,
    /// The merchant that took the payment.
    pub merchant_id: String,
    /// City of the merchant location.
    pub merchant_city: String,
    /// State of the merchant location.
    pub merchant_state: String,
    /// Postal code of the merchant location.
    pub zip: String,
    /// Merchant category code.
    pub mcc: String,
    /// Error annotations from the card network, e.g. "Bad PIN".
    ///
    /// A transaction with a non-empty annotation is treated as fraudulent.
    pub errors: Option<String>,
}

impl Transaction {
    /// Whether this transaction is flagged as fraudulent.
    pub fn is_fraudulent(&self) -> bool {
        self.errors.as_deref().is_some_and(|errors| !errors.is_empty())
    }
}

/// The current UTC wall-clock time without a zone, for reports whose other
/// timestamps are the store's naive record dates.
pub(crate) fn now_naive() -> PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Serde support for timestamps in the CSV's "YYYY-MM-DD HH:MM:SS" format.
pub(crate) mod timestamp {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
    };

    /// The timestamp format used by both the CSV source and the JSON API.
    pub(crate) const FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    pub(crate) fn serialize<S>(date: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde support for calendar dates in "YYYY-MM-DD" format.
pub(crate) mod calendar_date {
    use serde::Serializer;
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    pub(crate) const FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day]");

    pub(crate) fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

/// Builds a transaction with fixed filler fields for use in tests across the
/// crate. Tests that care about other fields overwrite them directly.
#[cfg(test)]
pub(crate) fn create_test_transaction(
    id: &str,
    customer_id: &str,
    amount: f64,
    errors: Option<&str>,
) -> Transaction {
    use time::macros::datetime;

    Transaction {
        id: id.to_owned(),
        date: datetime!(2023-06-15 12:30:00),
        customer_id: customer_id.to_owned(),
        card_id: "2972".to_owned(),
        amount,
        channel_type: "Swipe Transaction".to_owned(),
        merchant_id: "59935".to_owned(),
        merchant_city: "Beulah".to_owned(),
        merchant_state: "ND".to_owned(),
        zip: "58523".to_owned(),
        mcc: "5499".to_owned(),
        errors: errors.map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::{Transaction, create_test_transaction};

    #[test]
    fn serializes_with_camel_case_keys_and_formatted_timestamp() {
        let transaction = create_test_transaction("7475327", "1556", 57.87, None);
        let want = json!({
            "id": "7475327",
            "date": "2023-06-15 12:30:00",
            "customerId": "1556",
            "cardId": "2972",
            "amount": 57.87,
            "channelType": "Swipe Transaction",
            "merchantId": "59935",
            "merchantCity": "Beulah",
            "merchantState": "ND",
            "zip": "58523",
            "mcc": "5499",
            "errors": null,
        });

        let got = serde_json::to_value(&transaction).expect("Could not serialize transaction.");

        assert_eq!(want, got);
    }

    #[test]
    fn deserializes_timestamp_from_json() {
        let body = json!({
            "id": "1",
            "date": "2024-01-02 03:04:05",
            "customerId": "C1",
            "cardId": "11",
            "amount": 12.5,
            "channelType": "Online Transaction",
            "merchantId": "M1",
            "merchantCity": "ONLINE",
            "merchantState": "",
            "zip": "",
            "mcc": "4829",
        });
        let want = datetime!(2024-01-02 03:04:05);

        let got: Transaction =
            serde_json::from_value(body).expect("Could not deserialize transaction.");

        assert_eq!(want, got.date);
        assert_eq!(None, got.errors);
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let body = json!({
            "id": "1",
            "date": "02/01/2024 03:04",
            "customerId": "C1",
            "cardId": "11",
            "amount": 12.5,
            "channelType": "Online Transaction",
            "merchantId": "M1",
            "merchantCity": "ONLINE",
            "merchantState": "",
            "zip": "",
            "mcc": "4829",
        });

        let got = serde_json::from_value::<Transaction>(body);

        assert!(got.is_err(), "want parse error, got {got:?}");
    }

    #[test]
    fn empty_error_annotation_is_not_fraudulent() {
        let clean = create_test_transaction("1", "C1", 10.0, None);
        let blank = create_test_transaction("2", "C1", 10.0, Some(""));
        let flagged = create_test_transaction("3", "C1", 10.0, Some("Bad PIN"));

        assert!(!clean.is_fraudulent());
        assert!(!blank.is_fraudulent());
        assert!(flagged.is_fraudulent());
    }
}
