mod date;
mod duration;

pub use date::{DEFAULT_LOCALE, format_date, parse_locale, parse_timestamp};
pub use duration::{duration_as_string, seconds_from_number, seconds_from_str};
