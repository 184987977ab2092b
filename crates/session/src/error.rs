//! Error types for authentication flows

use thiserror::Error;

/// Errors surfaced by the identity backend and session plumbing
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Form input rejected before reaching the backend
    #[error("{0}")]
    Validation(String),

    /// The identity service answered with an error
    #[error("{message} (status {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// Request never got a response
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not what the service documents
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Operation requires a signed-in session
    #[error("not signed in")]
    NotSignedIn,

    /// Backend URL or key missing/invalid
    #[error("auth configuration error: {0}")]
    Config(String),

    /// Session persistence failed
    #[error("session store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Short message suitable for a form's error banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) => "Could not reach the sign-in service. Check your connection.".to_string(),
            Self::NotSignedIn => "Please sign in first.".to_string(),
            Self::Decode(_) | Self::Config(_) | Self::Store(_) => {
                "An unexpected error occurred.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type alias for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
