//! Resolves "today" in the viewer's local calendar.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{DateKey, Error};

/// Get the current UTC offset of `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// Returns `None` if the name is not a known canonical timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current calendar date in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known timezone.
pub fn today_in(canonical_timezone: &str) -> Result<DateKey, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))?;

    let today = OffsetDateTime::now_utc().to_offset(offset).date();

    Ok(DateKey::new(today))
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{get_local_offset, today_in};

    #[test]
    fn utc_has_zero_offset() {
        let offset = get_local_offset("UTC").expect("UTC should be a known timezone");

        assert!(offset.is_utc());
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let result = today_in("Middle/Earth");

        assert!(matches!(result, Err(Error::InvalidTimezone(name)) if name == "Middle/Earth"));
    }
}
