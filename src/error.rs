//! Error types for the OpenDota client

use thiserror::Error;


pub type Result<T> = std::result::Result<T, OpenDotaError>;

#[derive(Error, Debug)]
pub enum OpenDotaError {
    #[error("Resource not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("Rate limit exceeded: {endpoint}")]
    RateLimited { endpoint: String },

    /// Any other non-success status, or a transport failure (`status` is
    /// `None` when the call never produced a response).
    #[error("API request failed{}: {message}", fmt_status(.status))]
    Api {
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The body decoded fine but does not match the record we expected.
    #[error("Unexpected response shape for {record}: {source}")]
    Shape {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid client configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid fantasy key: {key}")]
    InvalidFantasyKey { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl OpenDotaError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, OpenDotaError::NotFound { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, OpenDotaError::RateLimited { .. })
    }

    /// HTTP status associated with this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            OpenDotaError::NotFound { .. } => Some(404),
            OpenDotaError::RateLimited { .. } => Some(429),
            OpenDotaError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// Transport failures (timeouts, refused connections, undecodable bodies)
/// all land in the generic API error.
impl From<reqwest::Error> for OpenDotaError {
    fn from(err: reqwest::Error) -> Self {
        OpenDotaError::Api {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            source: Some(err),
        }
    }
}
