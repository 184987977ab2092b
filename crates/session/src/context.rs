//! Scoped session context
//!
//! A `SessionContext` is created by whoever owns the auth-aware scope and
//! passed down explicitly. It subscribes to backend events on `init` and
//! unsubscribes on `teardown` (or drop); after that nothing it published
//! changes again.

use crate::backend::IdentityBackend;
use crate::error::{AuthError, Result};
use crate::events::Subscription;
use crate::model::Session;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What the auth shell renders from
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    /// True until the initial session lookup (or any auth event) resolves
    pub loading: bool,
}

impl SessionSnapshot {
    fn initial() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

struct Shared {
    state: watch::Sender<SessionSnapshot>,
    live: AtomicBool,
}

impl Shared {
    /// Publish under the channel's write lock so `retire` cannot interleave
    fn publish(&self, session: Option<Session>, initial_lookup: bool) -> bool {
        self.state.send_if_modified(|snapshot| {
            if !self.live.load(Ordering::Acquire) {
                return false;
            }
            // An auth event that beat the initial lookup is newer
            if initial_lookup && !snapshot.loading {
                return false;
            }
            snapshot.session = session;
            snapshot.loading = false;
            true
        })
    }

    fn retire(&self) {
        self.state.send_if_modified(|_| {
            self.live.store(false, Ordering::Release);
            false
        });
    }
}

/// Current session plus change notifications for one scope
pub struct SessionContext {
    backend: Arc<dyn IdentityBackend>,
    shared: Arc<Shared>,
    subscription: Option<Subscription>,
    initial: Option<JoinHandle<()>>,
}

impl SessionContext {
    /// Subscribe to `backend` and start loading the initial session
    ///
    /// Must be called inside a tokio runtime.
    pub fn init(backend: Arc<dyn IdentityBackend>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::initial());
        let shared = Arc::new(Shared {
            state,
            live: AtomicBool::new(true),
        });

        let subscription = {
            let shared = Arc::clone(&shared);
            backend.events().subscribe(move |event, session| {
                debug!("auth event {:?}", event);
                shared.publish(session.cloned(), false);
            })
        };

        let initial = {
            let shared = Arc::clone(&shared);
            let backend = Arc::clone(&backend);
            tokio::spawn(async move {
                let session = match backend.get_session().await {
                    Ok(session) => session,
                    Err(err) => {
                        warn!("failed to load session: {}", err);
                        None
                    }
                };
                shared.publish(session, true);
            })
        };

        Self {
            backend,
            shared,
            subscription: Some(subscription),
            initial: Some(initial),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.state.subscribe()
    }

    /// Wait for the initial lookup to resolve
    pub async fn ready(&self) -> SessionSnapshot {
        let mut rx = self.watch();
        let snapshot = match rx.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        snapshot
    }

    pub fn backend(&self) -> &Arc<dyn IdentityBackend> {
        &self.backend
    }

    pub fn is_authenticated(&self) -> bool {
        self.shared.state.borrow().session.is_some()
    }

    /// Current session, or `NotSignedIn` (protected routes)
    pub fn require_session(&self) -> Result<Session> {
        self.shared
            .state
            .borrow()
            .session
            .clone()
            .ok_or(AuthError::NotSignedIn)
    }

    /// Unsubscribe and stop publishing
    pub fn teardown(self) {
        // Drop does the work
    }

    fn shutdown(&mut self) {
        self.shared.retire();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(initial) = self.initial.take() {
            initial.abort();
        }
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
