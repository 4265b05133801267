use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use flexisure_shared::{Amount, DateFormat, Preferences};

/// Rendered in place of a date that could not be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Prefix the amount with the active currency symbol.
///
/// The magnitude is printed as-is: no rounding, no grouping and no
/// exchange-rate conversion, whichever currency is selected.
pub fn format_currency(amount: Amount, preferences: &Preferences) -> String {
    format!("{}{}", preferences.currency.symbol(), display_amount(amount))
}

/// Shortest round-trip rendering, following the usual number-to-string rules:
/// `-0` prints as `0`, magnitudes from 1e21 or below 1e-6 switch to exponent form.
fn display_amount(amount: Amount) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if amount == 0.0 {
        return "0".to_string();
    }

    let magnitude = amount.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", amount);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        }
    } else {
        amount.to_string()
    }
}

/// Render a date in the preferred convention. Accepts ISO (`2024-12-15`),
/// slashed (`2024/12/15`, `12/15/2024`), month-name (`Dec 15, 2024`,
/// `15 December 2024`) and RFC 3339 or naive ISO timestamps.
///
/// `MM/DD/YYYY` renders US style without zero padding (`12/5/2024`),
/// `DD/MM/YYYY` renders GB style with padding (`05/12/2024`).
pub fn format_date(date: &str, preferences: &Preferences) -> String {
    let Some(parsed) = parse_date(date) else {
        return INVALID_DATE.to_string();
    };

    match preferences.date_format {
        DateFormat::MonthFirst => {
            format!("{}/{}/{}", parsed.month(), parsed.day(), parsed.year())
        }
        DateFormat::DayFirst => {
            format!("{:02}/{:02}/{}", parsed.day(), parsed.month(), parsed.year())
        }
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn parse_date(date: &str) -> Option<NaiveDate> {
    let trimmed = date.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}
