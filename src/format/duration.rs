use crate::error::FormatError;

const SECONDS_PER_HOUR: u64 = 60 * 60;
const SECONDS_PER_MINUTE: u64 = 60;

/// Format a duration in seconds as "HHh MMm SSs"
///
/// Each field is zero-padded to two digits. Hours keep growing past 99
/// instead of wrapping.
pub fn duration_as_string(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = seconds % SECONDS_PER_MINUTE;

    format!("{:02}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Convert a numeric duration from the API into whole seconds
///
/// Fractional values are truncated. Negative and non-finite values are
/// rejected.
pub fn seconds_from_number(value: f64) -> Result<u64, FormatError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FormatError::InvalidDuration {
            value: value.to_string(),
        });
    }

    Ok(value.trunc() as u64)
}

/// Convert a textual duration from the API ("5898", "5898.4") into whole seconds
pub fn seconds_from_str(value: &str) -> Result<u64, FormatError> {
    let trimmed = value.trim();

    if let Ok(seconds) = trimmed.parse::<u64>() {
        return Ok(seconds);
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| FormatError::InvalidDuration {
            value: value.to_string(),
        })
        .and_then(seconds_from_number)
}
