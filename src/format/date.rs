use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime};

use crate::error::FormatError;

/// Locale used for published dates unless configured otherwise
pub const DEFAULT_LOCALE: Locale = Locale::pt_BR;

/// Day without padding, abbreviated month, two-digit year ("22 jan 21")
const SHORT_DATE_PATTERN: &str = "%-d %b %y";

/// Offset-less layouts the API is known to emit; read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolve a locale name such as "pt_BR" or "en_US"
pub fn parse_locale(name: &str) -> Result<Locale, FormatError> {
    Locale::try_from(name).map_err(|_| FormatError::UnknownLocale(name.to_string()))
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339, date-times without an offset (with either `T` or a
/// space between date and time) and bare dates.
pub fn parse_timestamp(date_str: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    let trimmed = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
        .map_err(|e| FormatError::InvalidDate {
            date_str: date_str.to_string(),
            reason: e.to_string(),
        })
}

/// Format an ISO-8601 timestamp as a localized short date
///
/// The calendar date is taken in the timestamp's own offset, so the result
/// does not depend on the host time zone.
pub fn format_date(date_str: &str, locale: Locale) -> Result<String, FormatError> {
    let published = parse_timestamp(date_str)?;
    Ok(published
        .format_localized(SHORT_DATE_PATTERN, locale)
        .to_string())
}
