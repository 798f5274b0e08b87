//! Ties the pure ledger engine to a storage gateway for one account.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    DateKey, DatedRecord, Error, Record,
    aggregation::{DailySeries, MonthlySummary, group_by_date, sum_by_type, to_daily_series},
    chart::{ChartGeometry, chart_geometry},
    fetch::{fetch_day, fetch_range},
    gateway::{AccountId, DayBucket, LedgerGateway},
    navigation::{MonthRange, month_bounds},
    view_state::HomeView,
};

/// The ledger of one account, backed by a [LedgerGateway].
///
/// Cloning is cheap and clones share the same gateway.
#[derive(Debug)]
pub struct Ledger<G> {
    gateway: Arc<G>,
    account: AccountId,
}

impl<G> Clone for Ledger<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            account: self.account.clone(),
        }
    }
}

impl<G: LedgerGateway> Ledger<G> {
    /// Create a ledger for `account`.
    pub fn new(gateway: Arc<G>, account: AccountId) -> Self {
        Self { gateway, account }
    }

    /// The account this ledger reads and writes.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Load the records for `date`. Failures give an empty bucket.
    pub async fn load_day(&self, date: DateKey) -> DayBucket {
        fetch_day(self.gateway.as_ref(), &self.account, date).await
    }

    /// Save `record` under `date`.
    ///
    /// # Errors
    /// Returns the gateway's error if the write failed. The failure is also logged.
    pub async fn add_record(&self, date: DateKey, record: &Record) -> Result<(), Error> {
        let account = &self.account;
        let result = self.gateway.append(account, date, record).await;

        if let Err(error) = &result {
            tracing::error!("Could not save {record} on {date} for {account}: {error}");
        }

        result
    }

    /// Delete one occurrence of `record` from `date`.
    ///
    /// # Errors
    /// Returns the gateway's error if the write failed. The failure is also logged.
    pub async fn delete_record(&self, date: DateKey, record: &Record) -> Result<(), Error> {
        let account = &self.account;
        let result = self.gateway.remove(account, date, record).await;

        if let Err(error) = &result {
            tracing::error!("Could not delete {record} on {date} for {account}: {error}");
        }

        result
    }

    /// Income, expense and net totals for the month containing `date`.
    pub async fn month_summary(&self, date: DateKey) -> MonthlySummary {
        let month = month_bounds(date);
        let records = self.fetch_month(month).await;

        sum_by_type(records.iter().map(|dated| &dated.record))
    }

    /// Per-day income and expense totals for the month containing `date`.
    pub async fn month_series(&self, date: DateKey) -> DailySeries {
        let month = month_bounds(date);
        let records = self.fetch_month(month).await;

        to_daily_series(&records, month.len() as usize)
    }

    /// Every record in the month containing `date`, grouped by day.
    ///
    /// Days without records are omitted.
    pub async fn month_ledger(&self, date: DateKey) -> BTreeMap<DateKey, Vec<Record>> {
        let month = month_bounds(date);
        let records = self.fetch_month(month).await;

        group_by_date(&records)
    }

    /// Chart geometry for the month containing `date` on a `width` by `height` canvas.
    pub async fn month_chart(&self, date: DateKey, width: f64, height: f64) -> ChartGeometry {
        let series = self.month_series(date).await;

        chart_geometry(&series, width, height)
    }

    async fn fetch_month(&self, month: MonthRange) -> Vec<DatedRecord> {
        fetch_range(self.gateway.clone(), &self.account, month.start, month.end).await
    }

    /// Load the records for the view's current date into the view.
    pub async fn refresh(&self, view: &mut HomeView) {
        let bucket = self.load_day(view.current_date).await;
        view.show_bucket(bucket);
    }

    /// Step the view by `offset` days and load the new day.
    pub async fn navigate(&self, view: &mut HomeView, offset: i64) {
        view.change_date(offset);
        self.refresh(view).await;
    }

    /// Submit the view's entry form and save the new record.
    ///
    /// The record is shown in the view straight away, before the write
    /// completes, and stays there even if the write fails.
    ///
    /// Returns `Ok(None)` if the form was incomplete.
    ///
    /// # Errors
    /// Returns the gateway's error if the write failed.
    pub async fn submit(&self, view: &mut HomeView) -> Result<Option<Record>, Error> {
        let Some(record) = view.submit() else {
            return Ok(None);
        };

        self.add_record(view.current_date, &record).await?;

        Ok(Some(record))
    }
}
