//! Auth-state change notifications
//!
//! `subscribe(handler)` hands back a `Subscription`; dropping it (or
//! calling `unsubscribe`) stops delivery.

use crate::model::Session;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

/// What changed about the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Session restored from storage
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    /// Signed in through a password-recovery link
    PasswordRecovery,
}

type Handler = Arc<dyn Fn(AuthEvent, Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Hub {
    next_id: AtomicU64,
    handlers: Mutex<BTreeMap<u64, Handler>>,
}

/// Fan-out point for auth events
#[derive(Clone, Default)]
pub struct AuthEvents {
    hub: Arc<Hub>,
}

impl AuthEvents {
    /// Hub with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future event
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static,
    {
        let id = self.hub.next_id.fetch_add(1, Ordering::Relaxed);
        self.hub.handlers.lock().insert(id, Arc::new(handler));
        trace!("auth subscriber {} registered", id);

        Subscription {
            hub: Arc::downgrade(&self.hub),
            id,
        }
    }

    /// Deliver `event` to every subscriber, in registration order
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        // Handlers run outside the lock so they may subscribe/unsubscribe
        let handlers: Vec<Handler> = self.hub.handlers.lock().values().cloned().collect();
        trace!("emitting {:?} to {} subscribers", event, handlers.len());
        for handler in handlers {
            handler(event, session);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.hub.handlers.lock().len()
    }
}

/// Live registration of one handler
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<Hub>,
    id: u64,
}

impl Subscription {
    /// Stop receiving events
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.handlers.lock().remove(&self.id);
            trace!("auth subscriber {} removed", self.id);
        }
    }
}
