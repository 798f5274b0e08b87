//! Formats whole-number amounts for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `amount` as a dollar amount with thousands separators, e.g. "-$1,200".
pub fn format_currency(amount: i64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(0)))
    });
    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(0)))
    });

    let formatter = if amount < 0 {
        negative_fmt
    } else {
        positive_fmt
    };

    match (amount, formatter) {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        (0, _) => "$0".to_owned(),
        (amount, Some(formatter)) => formatter.fmt_string(amount.unsigned_abs() as f64),
        (amount, None) if amount < 0 => format!("-${}", amount.unsigned_abs()),
        (amount, None) => format!("${amount}"),
    }
}
