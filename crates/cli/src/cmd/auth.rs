//! Account commands against the hosted auth service
//!
//! Every command runs inside a `SessionContext`, so the session shown
//! afterwards is whatever the auth events delivered.

use anyhow::{Context, Result};
use cli_lib::system_config::{self, SystemConfig};
use owo_colors::OwoColorize;
use session::{
    AuthError, FileSessionStore, ForgotPasswordForm, GoTrueClient, IdentityBackend, OAuthProvider,
    PasswordResetForm, Session, SessionContext, SignInForm, SignUp, SignUpForm,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::debug;

/// `auth` subcommand arguments, decoupled from clap
#[derive(Debug, Clone)]
pub enum AuthAction {
    SignUp {
        email: String,
        name: Option<String>,
        password: Option<String>,
        confirm_password: Option<String>,
    },
    Login {
        email: String,
        password: Option<String>,
    },
    OAuth {
        provider: String,
        complete: Option<String>,
    },
    Forgot {
        email: String,
    },
    Reset {
        link: Option<String>,
        password: Option<String>,
        confirm_password: Option<String>,
    },
    Session,
    Logout,
}

pub async fn run(action: AuthAction) -> Result<()> {
    let config = system_config::load()?;
    let context = SessionContext::init(connect(&config)?);
    context.ready().await;

    let outcome = dispatch(&context, &config, action).await;
    context.teardown();
    outcome
}

fn connect(config: &SystemConfig) -> Result<Arc<dyn IdentityBackend>> {
    let path = system_config::session_file_path().context("Could not determine session file path")?;
    let store = Arc::new(FileSessionStore::new(path));
    let client = GoTrueClient::new(&config.auth.supabase_url, &config.auth.supabase_pubkey, store)
        .with_context(|| {
            format!(
                "Set auth.supabase_url / auth.supabase_pubkey or {} / {}",
                system_config::SUPABASE_URL_ENV,
                system_config::SUPABASE_PUBKEY_ENV
            )
        })?;
    Ok(Arc::new(client))
}

async fn dispatch(context: &SessionContext, config: &SystemConfig, action: AuthAction) -> Result<()> {
    let backend = context.backend().as_ref();
    let mut prompt = Prompt::new();
    let redirect = config.auth.redirect_url.trim_end_matches('/');

    match action {
        AuthAction::SignUp {
            email,
            name,
            password,
            confirm_password,
        } => {
            let password = prompt.secret(password, "Password").await?;
            let confirm_password = prompt.secret(confirm_password, "Confirm password").await?;
            let form = SignUpForm {
                full_name: name.unwrap_or_default(),
                email,
                password,
                confirm_password,
            };
            match form.submit(backend).await.map_err(auth_failure)? {
                SignUp::SignedIn(_) => print_signed_in(context),
                SignUp::ConfirmationSent(user) => println!(
                    "{} Check {} for a confirmation link.",
                    "✓".green(),
                    user.email.as_deref().unwrap_or("your inbox").cyan()
                ),
            }
        }
        AuthAction::Login { email, password } => {
            let password = prompt.secret(password, "Password").await?;
            let form = SignInForm { email, password };
            form.submit(backend).await.map_err(auth_failure)?;
            print_signed_in(context);
        }
        AuthAction::OAuth { provider, complete } => match complete {
            None => {
                let provider: OAuthProvider = provider.parse().map_err(anyhow::Error::msg)?;
                let url = backend.oauth_url(provider, redirect).map_err(auth_failure)?;
                println!("Open this URL to continue with {}:", provider.as_str().cyan());
                println!("{}", url);
                println!(
                    "{}",
                    "Then run `showcase auth oauth <provider> --complete <redirected URL>`.".dimmed()
                );
            }
            Some(redirect_url) => {
                backend
                    .session_from_redirect(&redirect_url)
                    .await
                    .map_err(auth_failure)?;
                print_signed_in(context);
            }
        },
        AuthAction::Forgot { email } => {
            let form = ForgotPasswordForm { email };
            let target = format!("{}/auth/reset-password", redirect);
            form.submit(backend, &target).await.map_err(auth_failure)?;
            println!(
                "{} If an account exists for {}, a reset link is on its way.",
                "✓".green(),
                form.email.trim().cyan()
            );
        }
        AuthAction::Reset {
            link,
            password,
            confirm_password,
        } => {
            if let Some(link) = link {
                backend.session_from_redirect(&link).await.map_err(auth_failure)?;
            }
            context.require_session().map_err(auth_failure)?;

            let password = prompt.secret(password, "New password").await?;
            let confirm_password = prompt.secret(confirm_password, "Confirm new password").await?;
            let form = PasswordResetForm {
                password,
                confirm_password,
            };
            form.submit(backend).await.map_err(auth_failure)?;
            println!("{} Password updated.", "✓".green());
        }
        AuthAction::Session => match context.snapshot().session {
            Some(session) => print_session(&session),
            None => println!("{}", "Not signed in.".yellow()),
        },
        AuthAction::Logout => {
            backend.sign_out().await.map_err(auth_failure)?;
            println!("{} Signed out.", "✓".green());
        }
    }
    Ok(())
}

/// Report the form-banner message; details go to the debug log
fn auth_failure(err: AuthError) -> anyhow::Error {
    debug!("auth error: {:?}", err);
    anyhow::Error::msg(err.user_message())
}

fn print_signed_in(context: &SessionContext) {
    match context.snapshot().session {
        Some(session) => {
            let name = session.user.display_name().unwrap_or(&session.user.id);
            println!("{} Signed in as {}", "✓".green(), name.cyan());
        }
        None => println!("{}", "Sign-in did not produce a session.".yellow()),
    }
}

fn print_session(session: &Session) {
    println!("{}", "Session".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if let Some(name) = session.user.display_name() {
        println!("User:     {}", name.cyan());
    }
    if let Some(email) = &session.user.email {
        println!("Email:    {}", email);
    }
    println!("User ID:  {}", session.user.id.dimmed());
    if let Some(expires_at) = session
        .expires_at
        .and_then(|at| chrono::DateTime::from_timestamp(at, 0))
    {
        println!("Expires:  {}", expires_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

/// Reads answers line by line from stdin
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Value from the command line, or the next stdin line
    async fn secret(&mut self, value: Option<String>, label: &str) -> Result<String> {
        if let Some(value) = value {
            return Ok(value);
        }

        let mut stderr = tokio::io::stderr();
        stderr.write_all(format!("{}: ", label).as_bytes()).await?;
        stderr.flush().await?;

        let line = self
            .lines
            .next_line()
            .await
            .context("Failed to read from stdin")?;
        Ok(line.unwrap_or_default())
    }
}
