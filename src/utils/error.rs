use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    /// The content API answered with a non-success HTTP status.
    #[error("API responded with {status} {status_text}")]
    Api { status: u16, status_text: String },

    #[error("request timed out")]
    Timeout,

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Mail delivery failed: {message}")]
    MailError { message: String },

    #[error("Unexpected payload: {message}")]
    PayloadError { message: String },
}

impl SiteError {
    /// Only server-side (5xx) API errors count as transient. Timeouts, 4xx
    /// responses and raw transport failures (DNS, connection refused) are
    /// never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, SiteError::Api { status, .. } if *status >= 500)
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = SiteError::Api {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn client_errors_and_timeouts_are_not_transient() {
        let not_found = SiteError::Api {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert!(!not_found.is_transient());
        assert!(!SiteError::Timeout.is_transient());
    }
}
