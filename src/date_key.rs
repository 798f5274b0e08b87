//! The calendar date key that addresses a day's bucket of records.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_KEY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// A calendar date serialized as `yyyy-MM-dd`.
///
/// There is no time-of-day component: every record on one calendar day shares
/// the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(Date);

impl DateKey {
    /// Wrap a calendar date.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Create a key from its calendar parts.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateKey] if the parts do not form a valid date,
    /// e.g. the 30th of February.
    pub fn from_calendar_date(year: i32, month: Month, day: u8) -> Result<Self, Error> {
        Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|_| Error::InvalidDateKey(format!("{year}-{:02}-{day:02}", month as u8)))
    }

    /// Parse a `yyyy-MM-dd` string.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateKey] if `text` is not a zero padded
    /// `yyyy-MM-dd` calendar date.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Date::parse(text, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidDateKey(text.to_owned()))
    }

    /// The wrapped calendar date.
    pub fn date(&self) -> Date {
        self.0
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.0.month()
    }

    /// The day of the month, starting at 1.
    pub fn day(&self) -> u8 {
        self.0.day()
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.format(DATE_KEY_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
