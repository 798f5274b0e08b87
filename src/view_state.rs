//! The state of the daily ledger screen and the pure updates applied to it.
//!
//! Front ends keep one [HomeView], feed user input into it and render from it.
//! Updates never touch storage; see [Ledger](crate::Ledger) for the calls that
//! pair an update with a gateway operation.

use serde::{Deserialize, Serialize};

use crate::{
    DateKey, Record, RecordType,
    aggregation::{MonthlySummary, sum_by_type},
    gateway::DayBucket,
    navigation::{step_day, step_month},
};

/// Whether `text` is acceptable in the amount field: digits only, or empty.
pub fn is_valid_amount_input(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

/// The daily ledger screen: the date being viewed, its records and the entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeView {
    /// The date whose records are shown and to which new records are added.
    pub current_date: DateKey,
    /// The amount typed into the entry form.
    pub amount: String,
    /// The description typed into the entry form.
    pub description: String,
    /// The type selected in the entry form.
    pub record_type: RecordType,
    /// The records shown for `current_date`.
    pub records: Vec<Record>,
}

impl HomeView {
    /// An empty view of `date` with the form set to income.
    pub fn new(date: DateKey) -> Self {
        Self {
            current_date: date,
            amount: String::new(),
            description: String::new(),
            record_type: RecordType::Income,
            records: Vec::new(),
        }
    }

    /// Replace the amount field if `text` contains only digits.
    ///
    /// Returns whether the edit was accepted.
    pub fn input_amount(&mut self, text: &str) -> bool {
        if !is_valid_amount_input(text) {
            return false;
        }

        self.amount = text.to_owned();
        true
    }

    /// Replace the description field.
    pub fn input_description(&mut self, text: &str) {
        self.description = text.to_owned();
    }

    /// Select the type for the next record.
    pub fn select_type(&mut self, record_type: RecordType) {
        self.record_type = record_type;
    }

    /// Turn the form into a record.
    ///
    /// Both the amount and description must be filled in. On success the
    /// record is appended to the shown records, the text fields are cleared and
    /// the record is returned so that it can be saved. The selected type is
    /// kept for the next entry.
    pub fn submit(&mut self) -> Option<Record> {
        if self.amount.is_empty() || self.description.is_empty() {
            return None;
        }

        let record = Record::new(
            self.record_type,
            std::mem::take(&mut self.amount),
            std::mem::take(&mut self.description),
        );
        self.records.push(record.clone());

        Some(record)
    }

    /// Remove one shown occurrence of `record`. Returns whether one was found.
    pub fn remove(&mut self, record: &Record) -> bool {
        match self.records.iter().position(|shown| shown == record) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move the view by `offset` days. The shown records are kept until
    /// [HomeView::show_bucket] is called with the new day's bucket.
    pub fn change_date(&mut self, offset: i64) -> DateKey {
        self.current_date = step_day(self.current_date, offset);
        self.current_date
    }

    /// Move the view by `offset` months, clamping the day to the target month.
    pub fn change_month(&mut self, offset: i32) -> DateKey {
        self.current_date = step_month(self.current_date, offset);
        self.current_date
    }

    /// Jump straight to `date`, e.g. from a date picker.
    pub fn select_date(&mut self, date: DateKey) {
        self.current_date = date;
    }

    /// Show a loaded bucket.
    ///
    /// Buckets for a date other than the current one are stale responses from
    /// earlier navigation and are ignored. Returns whether the bucket was shown.
    pub fn show_bucket(&mut self, bucket: DayBucket) -> bool {
        if bucket.date != self.current_date {
            tracing::debug!(
                "Ignoring records for {} while viewing {}",
                bucket.date,
                self.current_date
            );
            return false;
        }

        self.records = bucket.records;
        true
    }

    /// Totals of the shown records.
    pub fn daily_summary(&self) -> MonthlySummary {
        sum_by_type(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{DateKey, Record, RecordType, gateway::DayBucket};

    use super::{HomeView, is_valid_amount_input};

    fn view() -> HomeView {
        HomeView::new(DateKey::new(date!(2024 - 02 - 29)))
    }

    #[test]
    fn amount_input_accepts_only_digits() {
        let mut view = view();

        assert!(view.input_amount("120"));
        assert!(!view.input_amount("12.5"));
        assert!(!view.input_amount("-3"));
        assert!(view.input_amount(""));
        assert_eq!(view.amount, "");
        assert!(!is_valid_amount_input("１２"));
    }

    #[test]
    fn submit_requires_amount_and_description() {
        let mut view = view();
        view.input_amount("10");

        assert_eq!(view.submit(), None);
        assert_eq!(view.amount, "10");
        assert!(view.records.is_empty());
    }

    #[test]
    fn submit_appends_record_and_clears_form() {
        let mut view = view();
        view.select_type(RecordType::Expense);
        view.input_amount("45");
        view.input_description("Books");

        let got = view.submit();

        let want = Record::new(RecordType::Expense, "45", "Books");
        assert_eq!(got, Some(want.clone()));
        assert_eq!(view.records, vec![want]);
        assert_eq!(view.amount, "");
        assert_eq!(view.description, "");
        assert_eq!(view.record_type, RecordType::Expense);
    }

    #[test]
    fn change_date_steps_across_month_end() {
        let mut view = view();

        assert_eq!(view.change_date(1).to_string(), "2024-03-01");
        assert_eq!(view.change_date(-1).to_string(), "2024-02-29");
    }

    #[test]
    fn change_month_clamps_day() {
        let mut view = HomeView::new(DateKey::new(date!(2024 - 03 - 31)));

        assert_eq!(view.change_month(-1).to_string(), "2024-02-29");
    }

    #[test]
    fn stale_bucket_is_ignored() {
        let mut view = view();
        let stale = DayBucket {
            date: DateKey::new(date!(2024 - 02 - 28)),
            records: vec![Record::new(RecordType::Income, "1", "old")],
        };

        assert!(!view.show_bucket(stale));
        assert!(view.records.is_empty());
    }

    #[test]
    fn daily_summary_totals_shown_records() {
        let mut view = view();
        view.show_bucket(DayBucket {
            date: view.current_date,
            records: vec![
                Record::new(RecordType::Income, "100", "Pay"),
                Record::new(RecordType::Expense, "30", "Food"),
            ],
        });

        let summary = view.daily_summary();

        assert_eq!(summary.net, 70);
    }

    #[test]
    fn remove_takes_one_identical_record() {
        let mut view = view();
        let coffee = Record::new(RecordType::Expense, "5", "Coffee");
        view.records = vec![coffee.clone(), coffee.clone()];

        assert!(view.remove(&coffee));
        assert_eq!(view.records, vec![coffee]);
    }
}
