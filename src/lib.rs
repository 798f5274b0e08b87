//! Daybook is a personal ledger of dated income and expense records.
//!
//! This library provides the engine behind a daily ledger screen: records are
//! stored per calendar day behind the [LedgerGateway] trait, and the engine
//! fetches ranges of days, totals them by type, buckets them per day of month
//! and maps those buckets onto chart coordinates.
//!
//! The engine never fails on the read path. Malformed stored entries are
//! dropped, days that cannot be loaded count as empty and an all-zero month
//! produces a flat chart.

#![warn(missing_docs)]

pub mod aggregation;
pub mod chart;
mod config;
mod currency;
mod date_key;
mod db;
mod error;
pub mod fetch;
pub mod gateway;
mod ledger;
pub mod logging;
pub mod navigation;
mod record;
mod timezone;
pub mod view_state;

#[cfg(test)]
mod test_utils;

pub use config::{CanvasSize, Config, DEFAULT_TIMEZONE};
pub use currency::format_currency;
pub use date_key::DateKey;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use gateway::{AccountId, DayBucket, DayDocument, LedgerGateway};
pub use ledger::Ledger;
pub use record::{DatedRecord, Record, RecordType};
pub use timezone::{get_local_offset, today_in};
