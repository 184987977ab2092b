//! In-memory transports for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use query::Transport;
use sc_core::{FetchError, Locator};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

type Responder = Box<dyn Fn(&str) -> Result<Bytes, FetchError> + Send + Sync>;

/// Answers immediately and records every call with its (tokio) time
pub struct RecordingTransport {
    respond: Responder,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl RecordingTransport {
    pub fn new(respond: impl Fn(&str) -> Result<Bytes, FetchError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every locator fetched so far, in call order
    pub fn locators(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(l, _)| l.clone()).collect()
    }

    /// Calls with their timestamps
    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, locator: &Locator) -> Result<Bytes, FetchError> {
        self.calls
            .lock()
            .push((locator.as_str().to_string(), Instant::now()));
        (self.respond)(locator.as_str())
    }
}

/// Holds every request until the test releases it
#[derive(Default)]
pub struct GatedTransport {
    gates: Mutex<HashMap<String, oneshot::Sender<Result<Bytes, FetchError>>>>,
}

impl GatedTransport {
    /// Wait until a request for `locator` is parked
    pub async fn wait_registered(&self, locator: &str) {
        for _ in 0..1_000 {
            if self.gates.lock().contains_key(locator) {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("no request for {locator} was issued");
    }

    /// Resolve the parked request for `locator`; false if its caller is gone
    pub async fn release(&self, locator: &str, result: Result<Bytes, FetchError>) -> bool {
        self.wait_registered(locator).await;
        let gate = self.gates.lock().remove(locator);
        match gate {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    /// Wait until the caller of a parked request has gone away
    pub async fn wait_abandoned(&self, locator: &str) -> bool {
        for _ in 0..1_000 {
            let closed = self
                .gates
                .lock()
                .get(locator)
                .map_or(true, oneshot::Sender::is_closed);
            if closed {
                return true;
            }
            tokio::task::yield_now().await;
        }
        false
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn get(&self, locator: &Locator) -> Result<Bytes, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(locator.as_str().to_string(), tx);
        rx.await
            .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string())))
    }
}

/// JSON body `{"value": n}`
pub fn value_body(n: u32) -> Bytes {
    Bytes::from(serde_json::json!({ "value": n }).to_string())
}

/// A product listing page with `count` items out of `total`
pub fn page_body(total: u64, skip: u64, count: u64) -> Bytes {
    let products: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": skip + i + 1,
                "title": format!("Product {}", skip + i + 1),
                "description": "demo",
                "category": "smartphones",
                "price": 99.0,
                "discountPercentage": 0.0,
                "rating": 4.5,
                "stock": 20,
                "thumbnail": "",
                "images": []
            })
        })
        .collect();

    Bytes::from(
        serde_json::json!({
            "products": products,
            "total": total,
            "skip": skip,
            "limit": count
        })
        .to_string(),
    )
}

/// Let spawned tasks run without advancing paused time much
pub async fn settle_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(Duration::from_millis(1)).await;
}
