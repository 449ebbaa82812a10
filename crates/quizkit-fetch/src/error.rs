//! Question-bank fetch errors.
//!
//! Typed so callers can classify failures for retry decisions without
//! string matching.

use thiserror::Error;

/// Errors that can occur when fetching from a remote question bank.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API returned a non-success HTTP status.
    #[error("question bank returned HTTP {status}")]
    Http { status: u16 },

    /// HTTP 200, but the body's status field was not "success".
    #[error("fetch returned HTTP 200 but body status was {0:?}")]
    BadStatus(String),

    /// The response body did not match the wire format.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl FetchError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        match self {
            FetchError::BadStatus(_) | FetchError::MalformedBody(_) => true,
            FetchError::Http { status } => (400..500).contains(status),
            FetchError::Network(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(FetchError::BadStatus("failure".into()).is_permanent());
        assert!(FetchError::Http { status: 404 }.is_permanent());
        assert!(!FetchError::Http { status: 503 }.is_permanent());
        assert!(!FetchError::Network("reset".into()).is_permanent());
    }
}
