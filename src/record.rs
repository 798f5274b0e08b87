//! This file defines the type `Record`, a single income or expense entry in a day's ledger.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DateKey;

/// Whether a record is money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl RecordType {
    /// The label used for this type in stored documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Parse a stored label. Only the exact labels "Income" and "Expense" are recognized.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Income" => Some(Self::Income),
            "Expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An income or expense entry.
///
/// Records are immutable once created and compared by value: two records with
/// the same type, amount and description are indistinguishable, which is what
/// deletion relies on.
///
/// The amount is kept as the string that was entered so it can be displayed
/// verbatim. Use [Record::amount_value] for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    record_type: RecordType,
    amount: String,
    description: String,
}

impl Record {
    /// Create a new record.
    pub fn new(
        record_type: RecordType,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            amount: amount.into(),
            description: description.into(),
        }
    }

    /// Parse a raw entry from a stored day document.
    ///
    /// Returns `None`, rather than an error, for anything that is not an object
    /// with a recognized `type` label and a non-empty string `amount`. A missing
    /// or non-string `description` is treated as empty.
    pub fn parse(raw: &Value) -> Option<Self> {
        let Some(fields) = raw.as_object() else {
            tracing::debug!("Dropping stored entry that is not an object: {raw}");
            return None;
        };

        let text_field = |name: &str| fields.get(name).and_then(Value::as_str).unwrap_or("");

        let Some(record_type) = RecordType::from_label(text_field("type")) else {
            tracing::debug!("Dropping stored entry with unrecognized type: {raw}");
            return None;
        };

        let amount = text_field("amount");
        if amount.is_empty() {
            tracing::debug!("Dropping stored entry with no amount: {raw}");
            return None;
        }

        Some(Self::new(record_type, amount, text_field("description")))
    }

    /// Whether this record is income or an expense.
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// The amount exactly as it was entered.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// The amount as a number.
    ///
    /// Amounts are non-negative whole numbers. Anything other than a string of
    /// ASCII digits, including a leading sign or whitespace, counts as zero, as
    /// does a value too large for an `i64`.
    pub fn amount_value(&self) -> i64 {
        if !self.amount.bytes().all(|byte| byte.is_ascii_digit()) {
            return 0;
        }

        self.amount.parse().unwrap_or(0)
    }

    /// A text description of what the record was for.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ${} - {}",
            self.record_type, self.amount, self.description
        )
    }
}

/// A record tagged with the date of the bucket it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedRecord {
    /// The date of the bucket the record belongs to.
    pub date: DateKey,
    /// The record itself.
    pub record: Record,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Record, RecordType};

    #[test]
    fn parse_accepts_well_formed_entry() {
        let raw = json!({"type": "Expense", "amount": "120", "description": "Lunch"});

        let got = Record::parse(&raw);

        assert_eq!(got, Some(Record::new(RecordType::Expense, "120", "Lunch")));
    }

    #[test]
    fn parse_defaults_missing_description_to_empty() {
        let raw = json!({"type": "Income", "amount": "5"});

        let got = Record::parse(&raw).expect("entry should be accepted");

        assert_eq!(got.description(), "");
    }

    #[test]
    fn parse_drops_malformed_entries() {
        let entries = [
            json!("Income"),
            json!(42),
            json!({"type": "Refund", "amount": "10", "description": "?"}),
            json!({"type": "income", "amount": "10"}),
            json!({"type": "Income", "amount": ""}),
            json!({"type": "Income", "amount": 10}),
            json!({"amount": "10", "description": "no type"}),
        ];

        for raw in entries {
            assert_eq!(Record::parse(&raw), None, "want {raw} to be dropped");
        }
    }

    #[test]
    fn amount_value_defaults_to_zero() {
        let record = Record::new(RecordType::Income, "12a", "typo");

        assert_eq!(record.amount_value(), 0);
        assert_eq!(record.amount(), "12a");
    }

    #[test]
    fn amount_value_ignores_signed_and_padded_amounts() {
        for amount in ["-40", "+7", " 5", "5 ", "1.5", "99999999999999999999"] {
            let record = Record::new(RecordType::Income, amount, "odd");

            assert_eq!(record.amount_value(), 0, "want {amount:?} to count as zero");
        }

        let padded = Record::new(RecordType::Income, "007", "");
        assert_eq!(padded.amount_value(), 7);
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let record = Record::new(RecordType::Income, "100", "Salary");

        let got = serde_json::to_value(&record).unwrap();

        assert_eq!(
            got,
            json!({"type": "Income", "amount": "100", "description": "Salary"})
        );
    }

    #[test]
    fn display_matches_ledger_line() {
        let record = Record::new(RecordType::Expense, "40", "Bus fare");

        assert_eq!(record.to_string(), "Expense: $40 - Bus fare");
    }
}
