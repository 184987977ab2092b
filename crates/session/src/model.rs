//! Session and user records as the identity service returns them

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds before expiry at which a session is treated as expired
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form profile data (`full_name` is set at sign-up)
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl User {
    /// Display name from metadata, falling back to the email
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .get("full_name")
            .and_then(serde_json::Value::as_str)
            .or(self.email.as_deref())
    }
}

/// Tokens plus the user they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds, as issued
    #[serde(default)]
    pub expires_in: i64,
    /// Unix timestamp of expiry
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the service omitted it
    pub fn stamp_expiry(mut self) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(Utc::now().timestamp() + self.expires_in);
        }
        self
    }

    /// Whether the access token is (about to be) expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now().timestamp() + EXPIRY_MARGIN_SECS >= at,
            None => false,
        }
    }
}

/// Third-party sign-in providers offered by the auth screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Azure,
}

impl OAuthProvider {
    /// Provider id understood by the identity service
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Azure => "azure",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "azure" | "microsoft" => Ok(Self::Azure),
            other => Err(format!("unsupported provider: {other}")),
        }
    }
}

/// Outcome of a sign-up request
#[derive(Debug, Clone, PartialEq)]
pub enum SignUp {
    /// Confirmation disabled: the user is signed in right away
    SignedIn(Session),
    /// A confirmation email was sent; no session yet
    ConfirmationSent(User),
}
