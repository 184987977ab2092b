//! GoTrue (Supabase auth) REST client

use crate::backend::IdentityBackend;
use crate::error::{AuthError, Result};
use crate::events::{AuthEvent, AuthEvents};
use crate::model::{OAuthProvider, Session, SignUp, User};
use crate::store::SessionStore;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User agent string for auth requests
const USER_AGENT_VALUE: &str = concat!("showcase-session/", env!("CARGO_PKG_VERSION"));

/// Error body shapes the service uses across endpoints
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Sign-up answers with a session or, when confirmation is on, a bare user
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(User),
}

/// Tokens carried in an OAuth or recovery redirect
#[derive(Debug, Clone, PartialEq)]
struct RedirectTokens {
    access_token: String,
    refresh_token: String,
    token_type: String,
    expires_in: i64,
    expires_at: Option<i64>,
    recovery: bool,
}

/// Client for a hosted GoTrue instance
pub struct GoTrueClient {
    client: reqwest::Client,
    /// `{project_url}/auth/v1/`
    base: Url,
    api_key: String,
    store: Arc<dyn SessionStore>,
    events: AuthEvents,
}

impl GoTrueClient {
    /// Client for the project at `project_url` using its public (anon) key
    pub fn new(project_url: &str, api_key: &str, store: Arc<dyn SessionStore>) -> Result<Self> {
        if project_url.trim().is_empty() {
            return Err(AuthError::Config("auth url is not set".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(AuthError::Config("auth public key is not set".to_string()));
        }

        let root = format!("{}/", project_url.trim_end_matches('/'));
        let base = Url::parse(&root)
            .and_then(|url| url.join("auth/v1/"))
            .map_err(|e| AuthError::Config(format!("invalid auth url {project_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key)
                .map_err(|e| AuthError::Config(format!("invalid auth key: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| AuthError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            api_key: api_key.to_string(),
            store,
            events: AuthEvents::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| AuthError::Config(format!("invalid endpoint {path}: {e}")))
    }

    /// Bearer header: the user's token when signed in, the anon key otherwise
    fn authorized(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let token = access_token.unwrap_or(&self.api_key);
        request.header(AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Persist `session` and announce it
    fn adopt(&self, session: Session, event: AuthEvent) -> Result<Session> {
        let session = session.stamp_expiry();
        self.store.save(&session)?;
        self.events.emit(event, Some(&session));
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "refresh_token");
        let request = self
            .authorized(self.client.post(url), None)
            .json(&json!({ "refresh_token": refresh_token }));
        self.send(request).await
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User> {
        let request = self.authorized(self.client.get(self.endpoint("user")?), Some(access_token));
        self.send(request).await
    }
}

#[async_trait]
impl IdentityBackend for GoTrueClient {
    async fn get_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.store.load()? else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        debug!("stored session expired, refreshing");
        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => Ok(Some(self.adopt(fresh, AuthEvent::TokenRefreshed)?)),
            Err(AuthError::Api { status, message }) => {
                warn!("session refresh rejected ({}): {}", status, message);
                self.store.clear()?;
                self.events.emit(AuthEvent::SignedOut, None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: Option<&str>) -> Result<SignUp> {
        let request = self.authorized(self.client.post(self.endpoint("signup")?), None).json(&json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        }));

        match self.send::<SignUpResponse>(request).await? {
            SignUpResponse::Session(session) => {
                info!("signed up and signed in as {}", email);
                Ok(SignUp::SignedIn(self.adopt(session, AuthEvent::SignedIn)?))
            }
            SignUpResponse::User(user) => {
                info!("sign-up confirmation sent to {}", email);
                Ok(SignUp::ConfirmationSent(user))
            }
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self
            .authorized(self.client.post(url), None)
            .json(&json!({ "email": email, "password": password }));

        let session: Session = self.send(request).await?;
        info!("signed in as {}", email);
        self.adopt(session, AuthEvent::SignedIn)
    }

    fn oauth_url(&self, provider: OAuthProvider, redirect_to: &str) -> Result<String> {
        let mut url = self.endpoint("authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }

    async fn session_from_redirect(&self, redirect_url: &str) -> Result<Session> {
        let tokens = parse_redirect(redirect_url)?;
        let user = self.fetch_user(&tokens.access_token).await?;
        let event = if tokens.recovery {
            AuthEvent::PasswordRecovery
        } else {
            AuthEvent::SignedIn
        };

        let session = Session {
            access_token: tokens.access_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            expires_at: tokens.expires_at,
            refresh_token: tokens.refresh_token,
            user,
        };
        self.adopt(session, event)
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<()> {
        let mut url = self.endpoint("recover")?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        let request = self
            .authorized(self.client.post(url), None)
            .json(&json!({ "email": email }));

        self.send_empty(request).await?;
        info!("password reset email requested for {}", email);
        Ok(())
    }

    async fn update_password(&self, password: &str) -> Result<User> {
        let mut session = self.store.load()?.ok_or(AuthError::NotSignedIn)?;
        let request = self
            .authorized(self.client.put(self.endpoint("user")?), Some(&session.access_token))
            .json(&json!({ "password": password }));

        let user: User = self.send(request).await?;
        session.user = user.clone();
        self.store.save(&session)?;
        self.events.emit(AuthEvent::UserUpdated, Some(&session));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.store.load()? {
            let request = self.authorized(self.client.post(self.endpoint("logout")?), Some(&session.access_token));
            // The token may already be revoked; local sign-out proceeds regardless
            if let Err(err) = self.send_empty(request).await {
                warn!("remote sign-out failed: {}", err);
            }
        }
        self.store.clear()?;
        self.events.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn events(&self) -> &AuthEvents {
        &self.events
    }
}

/// Map an error response to `AuthError::Api`
fn api_error(status: u16, body: &[u8]) -> AuthError {
    let parsed: ApiErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                format!("request failed with status {status}")
            } else {
                text
            }
        });
    AuthError::Api { status, message }
}

/// Pull tokens out of a redirect URL's fragment (or query string)
fn parse_redirect(redirect_url: &str) -> Result<RedirectTokens> {
    let url = Url::parse(redirect_url)
        .map_err(|e| AuthError::Validation(format!("invalid redirect url: {e}")))?;

    // Tokens normally travel in the fragment; reuse the query parser on it
    let params = match url.fragment().filter(|f| !f.is_empty()) {
        Some(fragment) => {
            let mut carrier = url.clone();
            carrier.set_fragment(None);
            carrier.set_query(Some(fragment));
            carrier
        }
        None => url,
    };

    let mut tokens = RedirectTokens {
        access_token: String::new(),
        refresh_token: String::new(),
        token_type: "bearer".to_string(),
        expires_in: 0,
        expires_at: None,
        recovery: false,
    };
    let mut error = None;

    for (key, value) in params.query_pairs() {
        match key.as_ref() {
            "access_token" => tokens.access_token = value.into_owned(),
            "refresh_token" => tokens.refresh_token = value.into_owned(),
            "token_type" => tokens.token_type = value.into_owned(),
            "expires_in" => tokens.expires_in = value.parse().unwrap_or(0),
            "expires_at" => tokens.expires_at = value.parse().ok(),
            "type" => tokens.recovery = value == "recovery",
            "error_description" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(message) = error {
        return Err(AuthError::Api { status: 400, message });
    }
    if tokens.access_token.is_empty() || tokens.refresh_token.is_empty() {
        return Err(AuthError::Validation(
            "redirect url carries no session".to_string(),
        ));
    }
    Ok(tokens)
}
