#![allow(missing_docs)]

use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    DateKey, Error, Record,
    gateway::{AccountId, DayDocument, LedgerGateway},
};

/// Wraps a gateway and fails every call that touches one of the `failing_dates`.
///
/// Lookups for any of the `panicking_dates` panic instead of returning an error.
pub(crate) struct FlakyGateway<G> {
    inner: G,
    failing_dates: HashSet<DateKey>,
    panicking_dates: HashSet<DateKey>,
    lookups: AtomicUsize,
}

impl<G: LedgerGateway> FlakyGateway<G> {
    pub(crate) fn new(inner: G, failing_dates: impl IntoIterator<Item = DateKey>) -> Self {
        Self {
            inner,
            failing_dates: failing_dates.into_iter().collect(),
            panicking_dates: HashSet::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_panicking_dates(
        mut self,
        panicking_dates: impl IntoIterator<Item = DateKey>,
    ) -> Self {
        self.panicking_dates = panicking_dates.into_iter().collect();
        self
    }

    /// The number of times [LedgerGateway::get] was called.
    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self, date: DateKey) -> Result<(), Error> {
        if self.failing_dates.contains(&date) {
            Err(Error::Gateway(format!("simulated outage on {date}")))
        } else {
            Ok(())
        }
    }
}

impl<G: LedgerGateway> LedgerGateway for FlakyGateway<G> {
    async fn get(&self, account: &AccountId, date: DateKey) -> Result<Option<DayDocument>, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.panicking_dates.contains(&date) {
            panic!("simulated crash while loading {date}");
        }

        self.check(date)?;
        self.inner.get(account, date).await
    }

    async fn append(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> Result<(), Error> {
        self.check(date)?;
        self.inner.append(account, date, record).await
    }

    async fn remove(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> Result<(), Error> {
        self.check(date)?;
        self.inner.remove(account, date, record).await
    }
}
