//! Network seam for the fetch hook
//!
//! The hook never talks to reqwest directly; it goes through `Transport`
//! so views can be driven by in-memory transports in tests.

use async_trait::async_trait;
use bytes::Bytes;
use sc_core::{FetchError, Locator};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// User agent string for outgoing requests
const USER_AGENT_VALUE: &str = concat!("showcase/", env!("CARGO_PKG_VERSION"));

/// Performs a GET against a locator and returns the raw success body
#[async_trait]
pub trait Transport: Send + Sync {
    /// Non-success statuses must come back as `FetchError::Status`.
    async fn get(&self, locator: &Locator) -> Result<Bytes, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, locator: &Locator) -> Result<Bytes, FetchError> {
        (**self).get(locator).await
    }
}

/// GET the locator and decode the body as JSON
pub async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    locator: &Locator,
) -> Result<T, FetchError> {
    let body = transport.get(locator).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client with the default user agent. No request timeout is set.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, locator: &Locator) -> Result<Bytes, FetchError> {
        debug!("GET {}", locator);

        let response = self
            .client
            .get(locator.as_str())
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} -> {}", locator, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(network_error)
    }
}

fn network_error(err: reqwest::Error) -> FetchError {
    FetchError::Network(err.to_string())
}
