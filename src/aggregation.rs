//! Record aggregation for summaries and charts.
//!
//! Provides functions to total records by type, bucket them by day of month
//! for charting, and group them by date for display.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{DateKey, DatedRecord, Record, RecordType};

/// Income and expense totals over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// The sum of all income amounts.
    pub total_income: i64,
    /// The sum of all expense amounts.
    pub total_expense: i64,
    /// Income minus expenses. May be negative.
    pub net: i64,
}

/// Income and expense totals for each day of a month.
///
/// Index `i` of each series holds the total for day `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    /// Income per day.
    pub income_per_day: Vec<i64>,
    /// Expenses per day.
    pub expense_per_day: Vec<i64>,
}

impl DailySeries {
    /// A series of zeros for a month with `month_length` days.
    pub fn zeros(month_length: usize) -> Self {
        Self {
            income_per_day: vec![0; month_length],
            expense_per_day: vec![0; month_length],
        }
    }

    /// The number of days covered by the series.
    pub fn month_length(&self) -> usize {
        self.income_per_day.len()
    }

    /// The largest value across both series, or zero if the series is empty.
    pub fn max_value(&self) -> i64 {
        self.income_per_day
            .iter()
            .chain(&self.expense_per_day)
            .copied()
            .max()
            .unwrap_or(0)
    }
}

/// Sums record amounts by type.
///
/// Amounts that do not parse as integers count as zero. An empty input gives
/// all zeros.
pub fn sum_by_type<'a>(records: impl IntoIterator<Item = &'a Record>) -> MonthlySummary {
    let (total_income, total_expense) =
        records
            .into_iter()
            .fold((0i64, 0i64), |(income, expense), record| {
                match record.record_type() {
                    RecordType::Income => (income.saturating_add(record.amount_value()), expense),
                    RecordType::Expense => (income, expense.saturating_add(record.amount_value())),
                }
            });

    MonthlySummary {
        total_income,
        total_expense,
        net: total_income.saturating_sub(total_expense),
    }
}

/// Buckets dated records into per-day income and expense totals.
///
/// `records` are expected to all fall within the target month, which is the
/// case when they were fetched with the bounds from
/// [month_bounds](crate::navigation::month_bounds). A record whose day does not
/// fit in `month_length` days is logged and skipped.
pub fn to_daily_series(records: &[DatedRecord], month_length: usize) -> DailySeries {
    let mut series = DailySeries::zeros(month_length);

    for DatedRecord { date, record } in records {
        let index = date.day() as usize - 1;

        let per_day = match record.record_type() {
            RecordType::Income => &mut series.income_per_day,
            RecordType::Expense => &mut series.expense_per_day,
        };

        match per_day.get_mut(index) {
            Some(total) => *total = total.saturating_add(record.amount_value()),
            None => tracing::warn!(
                "Skipping record dated {date} outside of a {month_length} day month: {record}"
            ),
        }
    }

    series
}

/// Groups dated records by their date, keeping each day's order.
pub fn group_by_date(records: &[DatedRecord]) -> BTreeMap<DateKey, Vec<Record>> {
    let mut groups: BTreeMap<DateKey, Vec<Record>> = BTreeMap::new();

    for dated in records {
        groups
            .entry(dated.date)
            .or_default()
            .push(dated.record.clone());
    }

    groups
}
