//! In-process identity backend for unit tests

use crate::backend::IdentityBackend;
use crate::error::{AuthError, Result};
use crate::events::{AuthEvent, AuthEvents};
use crate::model::{OAuthProvider, Session, SignUp, User};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

pub(crate) fn session_for(email: &str) -> Session {
    Session {
        access_token: format!("at-{email}"),
        token_type: "bearer".into(),
        expires_in: 3600,
        expires_at: None,
        refresh_token: format!("rt-{email}"),
        user: User {
            id: format!("id-{email}"),
            email: Some(email.to_string()),
            user_metadata: serde_json::Value::Null,
        },
    }
}

pub(crate) struct FakeBackend {
    stored: Mutex<Option<Session>>,
    events: AuthEvents,
    calls: AtomicUsize,
    last_sign_up: Mutex<Option<(String, Option<String>)>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FakeBackend {
    pub(crate) fn new(stored: Option<Session>) -> Self {
        Self {
            stored: Mutex::new(stored),
            events: AuthEvents::new(),
            calls: AtomicUsize::new(0),
            last_sign_up: Mutex::new(None),
            gate: Mutex::new(None),
        }
    }

    /// Backend whose first `get_session` waits for the returned sender
    pub(crate) fn gated(stored: Option<Session>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let backend = Self::new(stored);
        *backend.gate.lock() = Some(rx);
        (backend, tx)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_sign_up(&self) -> Option<(String, Option<String>)> {
        self.last_sign_up.lock().clone()
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityBackend for FakeBackend {
    async fn get_session(&self) -> Result<Option<Session>> {
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self.stored.lock().clone())
    }

    async fn sign_up(&self, email: &str, _password: &str, full_name: Option<&str>) -> Result<SignUp> {
        self.record();
        *self.last_sign_up.lock() = Some((email.to_string(), full_name.map(str::to_string)));
        Ok(SignUp::ConfirmationSent(session_for(email).user))
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<Session> {
        self.record();
        let session = session_for(email);
        *self.stored.lock() = Some(session.clone());
        self.events.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    fn oauth_url(&self, provider: OAuthProvider, redirect_to: &str) -> Result<String> {
        Ok(format!("fake://authorize?provider={provider}&redirect_to={redirect_to}"))
    }

    async fn session_from_redirect(&self, _redirect_url: &str) -> Result<Session> {
        self.record();
        Err(AuthError::Validation("redirect url carries no session".into()))
    }

    async fn reset_password_for_email(&self, _email: &str, _redirect_to: &str) -> Result<()> {
        self.record();
        Ok(())
    }

    async fn update_password(&self, _password: &str) -> Result<User> {
        self.record();
        let session = self.stored.lock().clone().ok_or(AuthError::NotSignedIn)?;
        self.events.emit(AuthEvent::UserUpdated, Some(&session));
        Ok(session.user)
    }

    async fn sign_out(&self) -> Result<()> {
        self.record();
        *self.stored.lock() = None;
        self.events.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn events(&self) -> &AuthEvents {
        &self.events
    }
}
