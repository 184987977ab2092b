//! Fetch-state hook
//!
//! `FetchHandle` turns a `(locator, deps)` pair into a published
//! `FetchState<T>`. Each identity change starts a new generation; results
//! from older generations are discarded, whatever order they arrive in.
//! Dropping the handle retires the scope so nothing lands afterwards.

use crate::transport::{fetch_json, Transport};
use parking_lot::Mutex;
use sc_core::{FetchState, Generation, Locator, RequestSequence};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// State plus the generation guard protecting it
///
/// `gate` serializes minting a generation with applying a result, so the
/// currency check and the write are one step.
struct StateCell<T> {
    state: watch::Sender<FetchState<T>>,
    sequence: RequestSequence,
    gate: Mutex<()>,
}

impl<T> StateCell<T> {
    fn new() -> Self {
        let (state, _) = watch::channel(FetchState::new());
        Self {
            state,
            sequence: RequestSequence::new(),
            gate: Mutex::new(()),
        }
    }

    /// Start a generation: supersede older ones, mark loading
    fn begin(&self) -> Generation {
        let _gate = self.gate.lock();
        let generation = self.sequence.advance();
        if !self.sequence.is_retired() {
            self.state.send_modify(FetchState::begin);
        }
        generation
    }

    /// Apply `update` if `generation` is still authoritative
    fn apply(&self, generation: Generation, update: impl FnOnce(&mut FetchState<T>)) -> bool {
        let _gate = self.gate.lock();
        if !self.sequence.is_current(generation) {
            return false;
        }
        self.state.send_modify(update);
        true
    }

    fn retire(&self) {
        let _gate = self.gate.lock();
        self.sequence.retire();
    }
}

/// Retires a `FetchHandle`'s scope from outside the task that owns it
pub struct TeardownHandle<T> {
    cell: Arc<StateCell<T>>,
}

impl<T> TeardownHandle<T> {
    /// Stop every current and future generation from touching the state
    pub fn retire(&self) {
        self.cell.retire();
    }
}

/// Owning scope of one query's `FetchState`
///
/// `D` is the dependency set; a change in either the locator or `D`
/// triggers a new fetch.
pub struct FetchHandle<T, D = ()> {
    transport: Arc<dyn Transport>,
    cell: Arc<StateCell<T>>,
    key: Option<(Locator, D)>,
    in_flight: Option<JoinHandle<()>>,
    abort_in_flight: bool,
}

impl<T, D> FetchHandle<T, D>
where
    T: DeserializeOwned + Send + Sync + 'static,
    D: PartialEq,
{
    /// New scope in its initial `{None, loading, None}` state
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cell: Arc::new(StateCell::new()),
            key: None,
            in_flight: None,
            abort_in_flight: true,
        }
    }

    /// Whether superseded or torn-down requests also get their transfer
    /// aborted (default). With `false` they run to completion and their
    /// results are discarded by the generation check alone.
    pub fn abort_in_flight(mut self, abort: bool) -> Self {
        self.abort_in_flight = abort;
        self
    }

    /// Re-evaluate with the current locator and deps
    ///
    /// Does nothing when both equal the previous call's. Otherwise starts a
    /// new generation and returns it.
    pub fn update(&mut self, locator: impl Into<Locator>, deps: D) -> Option<Generation> {
        let locator = locator.into();
        if let Some((last_locator, last_deps)) = &self.key {
            if *last_locator == locator && *last_deps == deps {
                return None;
            }
        }

        let generation = self.cell.begin();
        self.cancel_in_flight();

        if locator.is_empty() {
            debug!("{}: empty locator, nothing to fetch", generation);
            self.cell.apply(generation, FetchState::settle_idle);
        } else {
            debug!("{}: fetching {}", generation, locator);
            let task = tokio::spawn(run_generation(
                Arc::clone(&self.cell),
                Arc::clone(&self.transport),
                locator.clone(),
                generation,
            ));
            self.in_flight = Some(task);
        }

        self.key = Some((locator, deps));
        Some(generation)
    }

    /// Receiver notified on every applied state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.cell.state.subscribe()
    }

    /// Handle that retires this scope even while the handle itself is
    /// owned by another task
    pub fn teardown_handle(&self) -> TeardownHandle<T> {
        TeardownHandle {
            cell: Arc::clone(&self.cell),
        }
    }

    /// Locator of the authoritative generation
    pub fn locator(&self) -> Option<&Locator> {
        self.key.as_ref().map(|(locator, _)| locator)
    }

    fn cancel_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            if self.abort_in_flight {
                task.abort();
            }
        }
    }
}

impl<T: Clone, D> FetchHandle<T, D> {
    /// Copy of the current state
    pub fn snapshot(&self) -> FetchState<T> {
        self.cell.state.borrow().clone()
    }
}

impl<T, D> Drop for FetchHandle<T, D> {
    fn drop(&mut self) {
        self.cell.retire();
        if let Some(task) = self.in_flight.take() {
            if self.abort_in_flight {
                task.abort();
            }
        }
    }
}

async fn run_generation<T>(
    cell: Arc<StateCell<T>>,
    transport: Arc<dyn Transport>,
    locator: Locator,
    generation: Generation,
) where
    T: DeserializeOwned,
{
    let outcome = fetch_json::<T>(transport.as_ref(), &locator).await;
    let failed = outcome.as_ref().err().map(ToString::to_string);

    let applied = cell.apply(generation, |state| match outcome {
        Ok(data) => state.settle_ok(data),
        Err(err) => state.settle_err(err),
    });

    match (applied, failed) {
        (false, _) => debug!("{}: discarding superseded response for {}", generation, locator),
        (true, Some(message)) => debug!("{}: {} failed: {}", generation, locator, message),
        (true, None) => debug!("{}: {} settled", generation, locator),
    }
}

/// Wait until the state is no longer loading and return a copy of it
pub async fn settled<T: Clone>(rx: &mut watch::Receiver<FetchState<T>>) -> Option<FetchState<T>> {
    rx.wait_for(|state| !state.loading)
        .await
        .ok()
        .map(|state| state.clone())
}
