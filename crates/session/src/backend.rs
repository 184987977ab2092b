//! Identity backend seam

use crate::error::Result;
use crate::events::AuthEvents;
use crate::model::{OAuthProvider, Session, SignUp, User};
use async_trait::async_trait;

/// Operations the auth screens need from the identity service
///
/// Implementations emit on `events()` whenever the session changes.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Current session, refreshing an expired one when possible
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Create an account with email and password
    async fn sign_up(&self, email: &str, password: &str, full_name: Option<&str>) -> Result<SignUp>;

    /// Email/password sign-in
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// URL the user must visit to sign in with `provider`
    fn oauth_url(&self, provider: OAuthProvider, redirect_to: &str) -> Result<String>;

    /// Adopt the session carried in a redirect URL fragment (OAuth or recovery link)
    async fn session_from_redirect(&self, redirect_url: &str) -> Result<Session>;

    /// Send a password-reset email
    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<()>;

    /// Change the signed-in user's password
    async fn update_password(&self, password: &str) -> Result<User>;

    /// End the session locally and on the service
    async fn sign_out(&self) -> Result<()>;

    /// Notification hub for session changes
    fn events(&self) -> &AuthEvents;
}
