//! Contains the trait and implementations for the document store that holds each day's records.
//!
//! Storage is addressed by an account and a [DateKey]. Each (account, date) pair
//! maps to one [DayDocument] holding the raw entries recorded on that day.

mod memory;
mod sqlite;

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DateKey, Error, Record};

pub use memory::MemoryGateway;
pub use sqlite::SQLiteGateway;

/// Identifies the owner of a set of day buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account ID from the identity provider's user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The stored, unparsed form of one day's records.
///
/// Entries are kept as raw JSON so that malformed entries written by other
/// clients survive a round trip through storage. They are dropped only when
/// parsed into a [DayBucket].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayDocument {
    /// The raw entries in the order they were appended.
    #[serde(default)]
    pub records: Vec<Value>,
}

impl DayDocument {
    /// Append `record` to the end of the document.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if the record cannot be converted to JSON.
    pub fn push(&mut self, record: &Record) -> Result<(), Error> {
        self.records.push(serde_json::to_value(record)?);
        Ok(())
    }

    /// Remove the first entry that parses to a record equal to `record`.
    ///
    /// Only one occurrence is removed even if several identical entries exist.
    /// Returns whether an entry was removed.
    pub fn remove_one(&mut self, record: &Record) -> bool {
        let position = self
            .records
            .iter()
            .position(|raw| Record::parse(raw).as_ref() == Some(record));

        match position {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }
}

/// The records stored under one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// The date the records belong to.
    pub date: DateKey,
    /// The records in the order they were added.
    pub records: Vec<Record>,
}

impl DayBucket {
    /// An empty bucket for `date`.
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    /// Parse a stored document, silently dropping malformed entries.
    pub fn from_document(date: DateKey, document: &DayDocument) -> Self {
        Self {
            date,
            records: document.records.iter().filter_map(Record::parse).collect(),
        }
    }
}

/// Handles point lookups and writes of a day's records.
///
/// Implementations may fail with transport or permission errors. The engine
/// treats any failed lookup as an empty day, so implementations should log
/// failures they want surfaced.
pub trait LedgerGateway: Send + Sync + 'static {
    /// Retrieve the document for `account` on `date`, or `None` if nothing was ever written.
    fn get(
        &self,
        account: &AccountId,
        date: DateKey,
    ) -> impl Future<Output = Result<Option<DayDocument>, Error>> + Send;

    /// Append `record` to the document for `account` on `date`, creating it if absent.
    fn append(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Remove one occurrence of `record` from the document for `account` on `date`.
    ///
    /// Does nothing if the document or the record does not exist. An emptied
    /// document is kept with no entries.
    fn remove(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{DateKey, Record, RecordType};

    use super::{DayBucket, DayDocument};

    #[test]
    fn document_deserializes_without_records_field() {
        let document: DayDocument = serde_json::from_str("{}").unwrap();

        assert!(document.records.is_empty());
    }

    #[test]
    fn bucket_drops_malformed_entries() {
        let document = DayDocument {
            records: vec![
                json!({"type": "Income", "amount": "100", "description": "Pay"}),
                json!({"type": "Gift", "amount": "5"}),
                json!(null),
                json!({"type": "Expense", "amount": "40", "description": "Food"}),
            ],
        };
        let date = DateKey::new(date!(2024 - 02 - 05));

        let bucket = DayBucket::from_document(date, &document);

        assert_eq!(
            bucket.records,
            vec![
                Record::new(RecordType::Income, "100", "Pay"),
                Record::new(RecordType::Expense, "40", "Food"),
            ]
        );
    }

    #[test]
    fn remove_one_removes_a_single_duplicate() {
        let coffee = Record::new(RecordType::Expense, "5", "Coffee");
        let mut document = DayDocument::default();
        document.push(&coffee).unwrap();
        document.push(&coffee).unwrap();

        let removed = document.remove_one(&coffee);

        assert!(removed);
        assert_eq!(document.records.len(), 1);
    }

    #[test]
    fn remove_one_requires_full_value_equality() {
        let mut document = DayDocument::default();
        document
            .push(&Record::new(RecordType::Expense, "5", "Coffee"))
            .unwrap();

        let removed = document.remove_one(&Record::new(RecordType::Income, "5", "Coffee"));

        assert!(!removed);
        assert_eq!(document.records.len(), 1);
    }
}
