//! Trip planner client error types.

/// Errors from the trip planner HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TripPlannerError {
    /// Network failure, timeout or connection refused
    #[error("trip planner request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("invalid trip planner response: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        /// Raw body, truncated
        body: Option<String>,
    },

    #[error("trip planner returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("rate limited by trip planner")]
    RateLimited,

    /// Rejected by the API gateway
    #[error("unauthorized by trip planner")]
    Unauthorized,
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
