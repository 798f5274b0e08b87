//! Calendar arithmetic for moving between days and months.
//!
//! All functions work on calendar dates only, so the results do not depend on
//! the local timezone once a [DateKey] has been obtained.

use time::{Date, Month};

use crate::DateKey;

/// The first and last calendar day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// Day 1 of the month.
    pub start: DateKey,
    /// The last day of the month.
    pub end: DateKey,
}

impl MonthRange {
    /// The number of days in the month (28 to 31).
    pub fn len(&self) -> u8 {
        self.end.day()
    }

    /// A month always has at least 28 days.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = DateKey> + use<> {
        days_between(self.start, self.end)
    }
}

/// Move `date` by `offset` days, rolling over months and years.
///
/// Dates are clamped to the earliest/latest representable date.
pub fn step_day(date: DateKey, offset: i64) -> DateKey {
    let first = i64::from(Date::MIN.to_julian_day());
    let last = i64::from(Date::MAX.to_julian_day());

    let julian_day = i64::from(date.date().to_julian_day())
        .saturating_add(offset)
        .clamp(first, last);

    match i32::try_from(julian_day).map(Date::from_julian_day) {
        Ok(Ok(stepped)) => DateKey::new(stepped),
        _ => clamp_to_limit(offset),
    }
}

/// Move `date` by `offset` months.
///
/// The day of the month is kept when it exists in the target month, otherwise
/// it is clamped to the last day of that month, e.g. 31 January plus one month
/// is 28 or 29 February.
pub fn step_month(date: DateKey, offset: i32) -> DateKey {
    let month_index = date.year() as i64 * 12 + (date.month() as i64 - 1) + offset as i64;
    let year = month_index.div_euclid(12);
    let month_number = month_index.rem_euclid(12) as u8 + 1;

    let Ok(year) = i32::try_from(year) else {
        return clamp_to_limit(offset);
    };
    let Ok(month) = Month::try_from(month_number) else {
        return clamp_to_limit(offset);
    };

    let day = date.day().min(days_in_month(year, month));

    match Date::from_calendar_date(year, month, day) {
        Ok(stepped) => DateKey::new(stepped),
        Err(_) => clamp_to_limit(offset),
    }
}

/// The first and last day of the month that contains `date`.
pub fn month_bounds(date: DateKey) -> MonthRange {
    let (year, month) = (date.year(), date.month());
    let start = date.date().replace_day(1).unwrap_or(date.date());
    let end = date
        .date()
        .replace_day(days_in_month(year, month))
        .unwrap_or(date.date());

    MonthRange {
        start: DateKey::new(start),
        end: DateKey::new(end),
    }
}

/// Every calendar day from `start` to `end` inclusive.
///
/// Yields nothing when `start` is after `end`.
pub fn days_between(start: DateKey, end: DateKey) -> impl Iterator<Item = DateKey> {
    let end = end.date();

    std::iter::successors(Some(start.date()), |day| day.next_day())
        .take_while(move |day| *day <= end)
        .map(DateKey::new)
}

/// The number of days in `month` of `year`, accounting for leap years.
pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn clamp_to_limit(offset: impl Into<i64>) -> DateKey {
    if offset.into() < 0 {
        DateKey::new(Date::MIN)
    } else {
        DateKey::new(Date::MAX)
    }
}
