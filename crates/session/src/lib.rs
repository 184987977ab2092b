//! Authentication session plumbing
//!
//! This crate provides:
//! - The identity backend seam and a GoTrue REST client
//! - Auth event subscriptions with explicit unsubscribe
//! - A scoped session context (no ambient singleton)
//! - Session persistence and auth form validation

pub mod backend;
pub mod context;
pub mod error;
pub mod events;
pub mod forms;
pub mod gotrue;
pub mod model;
pub mod store;

#[cfg(test)]
mod testing;

// Re-exports
pub use backend::IdentityBackend;
pub use context::{SessionContext, SessionSnapshot};
pub use error::{AuthError, Result};
pub use events::{AuthEvent, AuthEvents, Subscription};
pub use forms::{validate_email, ForgotPasswordForm, PasswordResetForm, SignInForm, SignUpForm};
pub use gotrue::GoTrueClient;
pub use model::{OAuthProvider, Session, SignUp, User};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
