//! Implements an in-memory gateway, used for tests and for running without a database.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    DateKey, Error, Record,
    gateway::{AccountId, DayDocument, LedgerGateway},
};

type DocumentMap = HashMap<(AccountId, DateKey), DayDocument>;

/// Stores day documents in a shared hash map.
///
/// Clones share the same underlying storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    documents: Arc<Mutex<DocumentMap>>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw document stored for `account` on `date`.
    ///
    /// Useful for seeding documents that were not written through [LedgerGateway::append].
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn insert_document(
        &self,
        account: &AccountId,
        date: DateKey,
        document: DayDocument,
    ) -> Result<(), Error> {
        self.documents
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .insert((account.clone(), date), document);

        Ok(())
    }
}

impl LedgerGateway for MemoryGateway {
    async fn get(&self, account: &AccountId, date: DateKey) -> Result<Option<DayDocument>, Error> {
        let documents = self.documents.lock().map_err(|_| Error::DatabaseLockError)?;

        Ok(documents.get(&(account.clone(), date)).cloned())
    }

    async fn append(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> Result<(), Error> {
        let mut documents = self.documents.lock().map_err(|_| Error::DatabaseLockError)?;

        documents
            .entry((account.clone(), date))
            .or_default()
            .push(record)
    }

    async fn remove(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> Result<(), Error> {
        let mut documents = self.documents.lock().map_err(|_| Error::DatabaseLockError)?;

        if let Some(document) = documents.get_mut(&(account.clone(), date)) {
            document.remove_one(record);
        }

        Ok(())
    }
}
