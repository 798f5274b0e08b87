/*! This module defines how the application's SQLite database is set up. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, gateway::SQLiteGateway};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// Implementations should not fail if the table already exists, so that
    /// opening an existing database is safe.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// Create all the tables the application needs.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteGateway::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
