//! Implements the settings shared by the command line binaries.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    DateKey, Error, Ledger,
    db::initialize,
    gateway::{AccountId, SQLiteGateway},
    timezone::{get_local_offset, today_in},
};

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// The size of the canvas that chart geometry is computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
        }
    }
}

/// Where the ledger lives and how dates and charts are resolved.
#[derive(Debug, Clone)]
pub struct Config {
    /// File path to the SQLite database.
    pub db_path: PathBuf,

    /// The account whose records are read and written.
    pub account: AccountId,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Determines which calendar day "today" is.
    pub local_timezone: String,

    /// The canvas that chart geometry is computed for.
    pub canvas: CanvasSize,

    /// An optional file that receives debug logs.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Create a config with the default timezone and canvas size.
    pub fn new(db_path: impl Into<PathBuf>, account: AccountId) -> Self {
        Self {
            db_path: db_path.into(),
            account,
            local_timezone: DEFAULT_TIMEZONE.to_owned(),
            canvas: CanvasSize::default(),
            log_file: None,
        }
    }

    /// Set the local timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a valid,
    /// canonical timezone name.
    pub fn with_timezone(mut self, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezone(local_timezone.to_owned()));
        }

        self.local_timezone = local_timezone.to_owned();
        Ok(self)
    }

    /// Set the chart canvas size.
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas = CanvasSize { width, height };
        self
    }

    /// Set the debug log file.
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    /// Today's date in the configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the configured timezone is unknown.
    pub fn today(&self) -> Result<DateKey, Error> {
        today_in(&self.local_timezone)
    }

    /// Open the database, creating its tables if needed, and return the account's ledger.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened or initialized.
    pub fn open_ledger(&self) -> Result<Ledger<SQLiteGateway>, Error> {
        let connection = Connection::open(&self.db_path)?;
        initialize(&connection)?;

        let gateway = SQLiteGateway::new(Arc::new(Mutex::new(connection)));

        Ok(Ledger::new(Arc::new(gateway), self.account.clone()))
    }
}
