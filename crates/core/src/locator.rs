//! Request locators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified request URL. The empty locator means "no query".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Wrap a URL string
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The "no query" signal
    pub fn none() -> Self {
        Self(String::new())
    }

    /// True when there is nothing to fetch
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<String> for Locator {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for Locator {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
