use thiserror::Error;

/// Errors that can occur when talking to the upstream episode API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request to {url} failed: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse JSON from {url}: {source}")]
    JsonParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while deriving display fields
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to parse date '{date_str}': {reason}")]
    InvalidDate { date_str: String, reason: String },

    #[error("Invalid episode duration: {value}")]
    InvalidDuration { value: String },

    #[error("Unknown date locale: {0}")]
    UnknownLocale(String),
}

/// Top-level errors for generating a page
#[derive(Error, Debug)]
pub enum PageError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Failed to embed page data: {0}")]
    Render(#[from] serde_json::Error),
}

impl PageError {
    /// Whether the upstream reported the requested record as missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PageError::Api(ApiError::HttpStatus { status: 404, .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_only_for_upstream_404() {
        let missing = PageError::Api(ApiError::HttpStatus {
            url: "http://api/episodes/x".to_string(),
            status: 404,
        });
        let broken = PageError::Api(ApiError::HttpStatus {
            url: "http://api/episodes".to_string(),
            status: 500,
        });
        let bad_date = PageError::Format(FormatError::InvalidDate {
            date_str: "yesterday".to_string(),
            reason: "unknown format".to_string(),
        });

        assert!(missing.is_not_found());
        assert!(!broken.is_not_found());
        assert!(!bad_date.is_not_found());
    }

    #[test]
    fn messages_name_the_failing_url() {
        let err = ApiError::HttpStatus {
            url: "http://localhost:3333/episodes".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "HTTP error 503 for http://localhost:3333/episodes"
        );
    }
}
