//! Loads the records for a range of days from a [LedgerGateway].
//!
//! Every day in the range is looked up concurrently and the results are joined
//! once all lookups have settled. A lookup that fails is logged and counted as
//! an empty day, so fetching never fails as a whole.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    DateKey, DatedRecord, Record,
    gateway::{AccountId, DayBucket, LedgerGateway},
    navigation::days_between,
};

/// Load the bucket for a single day.
///
/// A missing document gives an empty bucket. A failed lookup is logged and
/// also gives an empty bucket.
pub async fn fetch_day<G: LedgerGateway>(
    gateway: &G,
    account: &AccountId,
    date: DateKey,
) -> DayBucket {
    match gateway.get(account, date).await {
        Ok(Some(document)) => DayBucket::from_document(date, &document),
        Ok(None) => DayBucket::empty(date),
        Err(error) => {
            tracing::warn!("Could not load records for {account} on {date}, showing none: {error}");
            DayBucket::empty(date)
        }
    }
}

/// Load every record from `start` to `end` inclusive, tagged with its date.
///
/// One lookup per calendar day is spawned onto the tokio runtime and this
/// function returns once all of them have completed. Failed lookups, including
/// lookups that panic, contribute no records. The result is ordered by date, and records within a
/// day keep their stored order.
///
/// Returns an empty vector if `start` is after `end`.
pub async fn fetch_range<G: LedgerGateway>(
    gateway: Arc<G>,
    account: &AccountId,
    start: DateKey,
    end: DateKey,
) -> Vec<DatedRecord> {
    let mut lookups = JoinSet::new();

    for date in days_between(start, end) {
        let gateway = Arc::clone(&gateway);
        let account = account.clone();

        lookups.spawn(async move { fetch_day(gateway.as_ref(), &account, date).await });
    }

    let mut buckets = Vec::with_capacity(lookups.len());

    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok(bucket) => buckets.push(bucket),
            Err(error) => {
                tracing::warn!("A day lookup for {account} did not complete, skipping it: {error}")
            }
        }
    }

    buckets.sort_by_key(|bucket| bucket.date);

    let records: Vec<DatedRecord> = buckets
        .into_iter()
        .flat_map(|bucket| {
            let date = bucket.date;
            bucket
                .records
                .into_iter()
                .map(move |record| DatedRecord { date, record })
        })
        .collect();

    tracing::debug!(
        "Fetched {} records for {account} from {start} to {end}",
        records.len()
    );

    records
}

/// Load every record from `start` to `end` inclusive without date tags.
///
/// See [fetch_range] for the concurrency and failure policy.
pub async fn fetch_records<G: LedgerGateway>(
    gateway: Arc<G>,
    account: &AccountId,
    start: DateKey,
    end: DateKey,
) -> Vec<Record> {
    fetch_range(gateway, account, start, end)
        .await
        .into_iter()
        .map(|dated| dated.record)
        .collect()
}
