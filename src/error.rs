//! Defines the crate level error type.

/// The errors that may occur in the ledger engine and its storage backends.
///
/// Note that the aggregation paths (fetching a range, summing, charting) never
/// return these errors to the caller. Failures there are logged and degrade to
/// empty or zero-valued results instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A date key string was not a valid `yyyy-MM-dd` calendar date.
    ///
    /// Callers should pass in the string that could not be parsed.
    #[error("\"{0}\" is not a valid date, expected the format yyyy-MM-dd")]
    InvalidDateKey(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while serializing or deserializing a day document as JSON.
    #[error("could not (de)serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// A gateway reported a transport or permission failure.
    #[error("the ledger gateway failed: {0}")]
    Gateway(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn invalid_date_key_message_includes_input() {
        let error = Error::InvalidDateKey("2024-13-01".to_owned());

        assert_eq!(
            error.to_string(),
            "\"2024-13-01\" is not a valid date, expected the format yyyy-MM-dd"
        );
    }

    #[test]
    fn json_errors_convert_to_serialization_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let error = Error::from(json_error);

        assert!(matches!(error, Error::JSONSerializationError(_)));
    }
}
