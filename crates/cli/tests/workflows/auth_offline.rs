//! Auth commands that resolve before any request leaves the machine

use crate::common::Sandbox;
use crate::showcase;
use anyhow::Result;

/// Points at a closed local port; nothing here may reach it
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn test_missing_auth_config_is_reported() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "auth", "session").assert_failure()?;
    assert!(result.contains_stderr("SHOWCASE_SUPABASE_URL"));
    Ok(())
}

#[test]
fn test_session_when_signed_out() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "auth", "session")
        .env("SHOWCASE_SUPABASE_URL", UNREACHABLE)
        .env("SHOWCASE_SUPABASE_PUBKEY", "anon")
        .assert_success()?;
    assert!(result.contains_stdout("Not signed in."));
    Ok(())
}

#[test]
fn test_signup_password_mismatch() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(
        sandbox,
        "auth",
        "signup",
        "--email",
        "sarah@techcorp.com",
        "--password",
        "hunter22",
        "--confirm-password",
        "hunter23"
    )
    .env("SHOWCASE_SUPABASE_URL", UNREACHABLE)
    .env("SHOWCASE_SUPABASE_PUBKEY", "anon")
    .assert_failure()?;
    assert!(result.contains_stderr("Passwords do not match"));
    Ok(())
}

#[test]
fn test_passwords_read_from_stdin() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "auth", "signup", "--email", "sarah@techcorp.com")
        .env("SHOWCASE_SUPABASE_URL", UNREACHABLE)
        .env("SHOWCASE_SUPABASE_PUBKEY", "anon")
        .stdin("first\nsecond\n")
        .assert_failure()?;
    assert!(result.contains_stderr("Passwords do not match"));
    Ok(())
}

#[test]
fn test_invalid_email_rejected() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "auth", "forgot", "--email", "not-an-email")
        .env("SHOWCASE_SUPABASE_URL", UNREACHABLE)
        .env("SHOWCASE_SUPABASE_PUBKEY", "anon")
        .assert_failure()?;
    assert!(result.contains_stderr("valid email"));
    Ok(())
}

#[test]
fn test_oauth_url_is_printed() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "auth", "oauth", "microsoft")
        .env("SHOWCASE_SUPABASE_URL", UNREACHABLE)
        .env("SHOWCASE_SUPABASE_PUBKEY", "anon")
        .assert_success()?;
    assert!(result.contains_stdout(
        "http://127.0.0.1:9/auth/v1/authorize?provider=azure&redirect_to=http%3A%2F%2Flocalhost%3A5173"
    ));
    Ok(())
}

#[test]
fn test_logout_when_signed_out() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "auth", "logout")
        .env("SHOWCASE_SUPABASE_URL", UNREACHABLE)
        .env("SHOWCASE_SUPABASE_PUBKEY", "anon")
        .assert_success()?;
    assert!(result.contains_stdout("Signed out."));
    Ok(())
}
