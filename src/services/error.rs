//! Error type shared by all upstream service adapters.

use thiserror::Error;

/// Failure reported by an upstream API.
///
/// The message travels back to the caller verbatim; the status code is kept
/// separately for callers that want to branch on it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct UpstreamError {
    /// HTTP status code, when the upstream responded at all.
    pub status: Option<u16>,

    /// Human-readable failure description.
    pub message: String,
}

impl UpstreamError {
    /// Create an upstream error without an HTTP status (transport failure,
    /// malformed payload, missing data).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Create an upstream error from a non-success HTTP response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: format!("Request failed: {} - {}", status, body.into()),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = UpstreamError::status(502, "bad gateway");
        assert_eq!(err.status, Some(502));
        assert_eq!(err.to_string(), "Request failed: 502 - bad gateway");
    }

    #[test]
    fn test_plain_error_has_no_status() {
        let err = UpstreamError::new("no historical data");
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "no historical data");
    }
}
