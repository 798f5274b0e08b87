//! Implements a SQLite backed gateway that stores each day as a JSON document.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use crate::{
    DateKey, Error, Record,
    db::CreateTable,
    gateway::{AccountId, DayDocument, LedgerGateway},
};

/// Stores day documents in a SQLite database.
///
/// Each row holds the JSON document for one (account, date) pair. Call
/// [initialize](crate::initialize_db) on the connection before use.
///
/// The async methods do not yield: each call blocks its thread while it holds
/// the connection lock for a single primary key lookup or upsert, so concurrent
/// lookups from [fetch_range](crate::fetch::fetch_range) run one at a time.
#[derive(Debug, Clone)]
pub struct SQLiteGateway {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGateway {
    /// Create a new gateway for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLockError)
    }
}

impl CreateTable for SQLiteGateway {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS day_bucket (
                account TEXT NOT NULL,
                date TEXT NOT NULL,
                document TEXT NOT NULL,
                PRIMARY KEY (account, date)
                )",
            (),
        )?;

        Ok(())
    }
}

fn select_document(
    connection: &Connection,
    account: &AccountId,
    date: DateKey,
) -> Result<Option<DayDocument>, Error> {
    let text: Option<String> = connection
        .prepare("SELECT document FROM day_bucket WHERE account = ?1 AND date = ?2")?
        .query_row((account.as_str(), date.to_string()), |row| row.get(0))
        .optional()?;

    match text {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

fn upsert_document(
    connection: &Connection,
    account: &AccountId,
    date: DateKey,
    document: &DayDocument,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO day_bucket (account, date, document) VALUES (?1, ?2, ?3)
         ON CONFLICT(account, date) DO UPDATE SET document = excluded.document",
        (
            account.as_str(),
            date.to_string(),
            serde_json::to_string(document)?,
        ),
    )?;

    Ok(())
}

impl LedgerGateway for SQLiteGateway {
    /// Retrieve the document for `account` on `date`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - [Error::JSONSerializationError] if the stored document is not valid JSON,
    /// - or [Error::SqlError] if there is some other SQL error.
    async fn get(&self, account: &AccountId, date: DateKey) -> Result<Option<DayDocument>, Error> {
        let connection = self.lock()?;

        select_document(&connection, account, date)
    }

    /// Append `record` to the document for `account` on `date`.
    ///
    /// The read and write happen in one SQL transaction.
    async fn append(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> Result<(), Error> {
        let connection = self.lock()?;
        let transaction = connection.unchecked_transaction()?;

        let existing = select_document(&transaction, account, date)?;
        let mut document = existing.unwrap_or_default();
        document.push(record)?;
        upsert_document(&transaction, account, date, &document)?;

        transaction.commit()?;

        Ok(())
    }

    /// Remove one occurrence of `record` from the document for `account` on `date`.
    ///
    /// Nothing is written if the document or record does not exist.
    async fn remove(
        &self,
        account: &AccountId,
        date: DateKey,
        record: &Record,
    ) -> Result<(), Error> {
        let connection = self.lock()?;
        let transaction = connection.unchecked_transaction()?;

        let Some(mut document) = select_document(&transaction, account, date)? else {
            return Ok(());
        };

        if document.remove_one(record) {
            upsert_document(&transaction, account, date, &document)?;
            transaction.commit()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_gateway_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        DateKey, Error, Record, RecordType,
        db::initialize,
        gateway::{AccountId, DayBucket, LedgerGateway},
    };

    use super::SQLiteGateway;

    fn get_test_gateway() -> (SQLiteGateway, Arc<Mutex<Connection>>) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (SQLiteGateway::new(connection.clone()), connection)
    }

    fn account() -> AccountId {
        AccountId::new("user-1")
    }

    fn day() -> DateKey {
        DateKey::new(date!(2024 - 02 - 05))
    }

    /// Store a raw `document` for the test account and date, bypassing the gateway.
    fn insert_raw_document(connection: &Mutex<Connection>, document: &str) {
        connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO day_bucket (account, date, document) VALUES (?1, ?2, ?3)",
                ("user-1", "2024-02-05", document),
            )
            .unwrap();
    }

    #[tokio::test]
    async fn append_then_get_round_trips_records() {
        let (gateway, _) = get_test_gateway();
        let want = vec![
            Record::new(RecordType::Income, "100", "Pay"),
            Record::new(RecordType::Expense, "40", "Dinner"),
        ];

        for record in &want {
            gateway
                .append(&account(), day(), record)
                .await
                .expect("Could not append record");
        }

        let document = gateway.get(&account(), day()).await.unwrap().unwrap();
        let got = DayBucket::from_document(day(), &document).records;
        assert_eq!(want, got, "want records {want:?}, got {got:?}");
    }

    #[tokio::test]
    async fn get_missing_day_returns_none() {
        let (gateway, _) = get_test_gateway();

        let got = gateway.get(&account(), day()).await.unwrap();

        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn remove_deletes_one_occurrence() {
        let (gateway, _) = get_test_gateway();
        let coffee = Record::new(RecordType::Expense, "5", "Coffee");

        gateway.append(&account(), day(), &coffee).await.unwrap();
        gateway.append(&account(), day(), &coffee).await.unwrap();
        gateway.remove(&account(), day(), &coffee).await.unwrap();

        let document = gateway.get(&account(), day()).await.unwrap().unwrap();
        let got = DayBucket::from_document(day(), &document).records;
        assert_eq!(got, vec![coffee]);
    }

    #[tokio::test]
    async fn remove_on_missing_bucket_is_a_no_op() {
        let (gateway, _) = get_test_gateway();
        let coffee = Record::new(RecordType::Expense, "5", "Coffee");

        gateway
            .remove(&account(), day(), &coffee)
            .await
            .expect("removing from a missing bucket should succeed");

        let got = gateway.get(&account(), day()).await.unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn emptied_bucket_remains() {
        let (gateway, _) = get_test_gateway();
        let coffee = Record::new(RecordType::Expense, "5", "Coffee");

        gateway.append(&account(), day(), &coffee).await.unwrap();
        gateway.remove(&account(), day(), &coffee).await.unwrap();

        let document = gateway.get(&account(), day()).await.unwrap();
        assert_eq!(document.map(|document| document.records.len()), Some(0));
    }

    #[tokio::test]
    async fn malformed_entries_survive_append() {
        let (gateway, connection) = get_test_gateway();
        let refund = json!({"records": [{"type": "Refund", "amount": "3"}]});
        insert_raw_document(&connection, &refund.to_string());
        let found = Record::new(RecordType::Income, "1", "Found");

        gateway.append(&account(), day(), &found).await.unwrap();

        let document = gateway.get(&account(), day()).await.unwrap().unwrap();
        let parsed = DayBucket::from_document(day(), &document).records;
        assert_eq!(document.records.len(), 2);
        assert_eq!(parsed, vec![found]);
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let (gateway, connection) = get_test_gateway();
        insert_raw_document(&connection, "not json");

        let result = gateway.get(&account(), day()).await;

        assert!(matches!(result, Err(Error::JSONSerializationError(_))));
    }
}
