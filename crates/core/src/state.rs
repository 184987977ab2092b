//! Published state of a single query

use crate::FetchError;

/// What a view renders for one query.
///
/// Transitions are restricted to the methods below so that
/// `loading` never coexists with an error.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Last successfully decoded payload
    pub data: Option<T>,
    /// True while the authoritative request is outstanding
    pub loading: bool,
    /// Outcome of the last failed request
    pub error: Option<FetchError>,
}

/// Render branch derived from a `FetchState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Request in flight (data may still hold the previous page)
    Loading,
    /// Settled with data
    Ready,
    /// Settled with an error
    Failed,
    /// Settled with nothing to show (empty locator)
    Idle,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchState<T> {
    /// Initial state before the first update: loading, nothing yet
    pub fn new() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// A new generation started. Prior data is kept for display.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Empty locator: nothing to fetch
    pub fn settle_idle(&mut self) {
        self.loading = false;
    }

    /// Request succeeded
    pub fn settle_ok(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    /// Request failed
    pub fn settle_err(&mut self, error: FetchError) {
        self.data = None;
        self.loading = false;
        self.error = Some(error);
    }

    /// Which branch a view should render
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.data.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Borrow the payload
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Borrow the error
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }
}
