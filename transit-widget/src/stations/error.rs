//! Station lookup error types.

/// Errors that can occur when querying the station search index.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TRIPPOINT_API_KEY and TRIPPOINT_APP_ID")]
    Unauthorized,

    /// Rate limited by the search index
    #[error("rate limited by station search")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The top hit carried an identifier we cannot use
    #[error("invalid trip point id {raw:?} for {name:?}")]
    InvalidId { name: String, raw: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::Api {
            status: 400,
            message: "bad filter".into(),
        };
        assert_eq!(err.to_string(), "API error 400: bad filter");

        let err = StationError::InvalidId {
            name: "Union Station GO".into(),
            raw: "UN".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid trip point id \"UN\" for \"Union Station GO\""
        );

        let err = StationError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert!(err.to_string().contains("expected value"));
    }
}
