//! Auth form validation and submission
//!
//! Each `submit` validates locally first; the backend is only contacted
//! once the input is acceptable.

use crate::backend::IdentityBackend;
use crate::error::{AuthError, Result};
use crate::model::{Session, SignUp, User};

/// Reject an email that is blank or lacks an `@`
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation("Please enter a valid email address".to_string()));
    }
    Ok(())
}

fn validate_password_pair(password: &str, confirm_password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }
    if password != confirm_password {
        return Err(AuthError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

/// Email/password sign-in
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }
        Ok(())
    }

    pub async fn submit(&self, backend: &dyn IdentityBackend) -> Result<Session> {
        self.validate()?;
        backend.sign_in_with_password(self.email.trim(), &self.password).await
    }
}

/// Account creation
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_password_pair(&self.password, &self.confirm_password)
    }

    pub async fn submit(&self, backend: &dyn IdentityBackend) -> Result<SignUp> {
        self.validate()?;
        let full_name = Some(self.full_name.trim()).filter(|name| !name.is_empty());
        backend.sign_up(self.email.trim(), &self.password, full_name).await
    }
}

/// "Forgot password" request
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub async fn submit(&self, backend: &dyn IdentityBackend, redirect_to: &str) -> Result<()> {
        validate_email(&self.email)?;
        backend.reset_password_for_email(self.email.trim(), redirect_to).await
    }
}

/// New password after following a recovery link
#[derive(Debug, Clone, Default)]
pub struct PasswordResetForm {
    pub password: String,
    pub confirm_password: String,
}

impl PasswordResetForm {
    pub fn validate(&self) -> Result<()> {
        validate_password_pair(&self.password, &self.confirm_password)
    }

    pub async fn submit(&self, backend: &dyn IdentityBackend) -> Result<User> {
        self.validate()?;
        backend.update_password(&self.password).await
    }
}
