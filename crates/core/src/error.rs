//! Normalized fetch failures

use thiserror::Error;

/// Every way a fetch can fail, collapsed into one cloneable value.
///
/// The value lives inside published `FetchState`, so it carries messages
/// rather than source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connection reset, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The body was not valid JSON for the requested type.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Human-readable message for error panels.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_contains_code() {
        let err = FetchError::Status { status: 404 };
        assert!(err.message().contains("404"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_decode_from_serde() {
        let err: FetchError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.status(), None);
    }
}
