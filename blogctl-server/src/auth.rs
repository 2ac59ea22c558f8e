//! Single-admin session gate
//!
//! A successful login mints an opaque token, remembered server-side and
//! handed to the browser in the `blogctl_session` cookie. Each request
//! resolves that cookie into an [`AuthContext`] before a handler runs.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AdminCredentials;
use crate::http::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "blogctl_session";

/// Opaque session token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value that installs this token.
    pub fn set_cookie(&self) -> HeaderValue {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.0
        );
        // uuid text is always a valid header value
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    /// Read the session cookie out of request headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| Self(value.to_owned()))
            .filter(|token| !token.0.is_empty())
    }
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("blogctl_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Per-client session state: who the client claims to be.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<String>,
}

/// Checks credentials against the configured admin and tracks live sessions.
#[derive(Clone)]
pub struct SessionGate {
    admin: Arc<AdminCredentials>,
    sessions: Arc<RwLock<HashMap<SessionToken, String>>>,
}

impl SessionGate {
    pub fn new(admin: AdminCredentials) -> Self {
        Self {
            admin: Arc::new(admin),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start a session when both username and password match the admin.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<SessionToken> {
        if username != self.admin.username || password != self.admin.password {
            tracing::warn!(username, "rejected dashboard login");
            return None;
        }

        let token = SessionToken::generate();
        self.sessions
            .write()
            .await
            .insert(token.clone(), username.to_owned());
        tracing::debug!(username, "admin session started");
        Some(token)
    }

    /// Session bound to `token`; anonymous for unknown tokens.
    pub async fn session(&self, token: &SessionToken) -> Session {
        Session {
            user: self.sessions.read().await.get(token).cloned(),
        }
    }

    /// True iff the session belongs to the configured admin.
    pub fn is_authorized(&self, session: &Session) -> bool {
        session.user.as_deref() == Some(self.admin.username.as_str())
    }

    /// Forget a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &SessionToken) {
        if self.sessions.write().await.remove(token).is_some() {
            tracing::debug!("admin session ended");
        }
    }
}

/// Request-scoped authentication state
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub token: Option<SessionToken>,
    pub session: Session,
    authorized: bool,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.authorized
    }
}

impl FromRequestParts<Arc<AppState>> for AuthContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = SessionToken::from_headers(&parts.headers) else {
            return Ok(Self::default());
        };

        let session = state.sessions.session(&token).await;
        let authorized = state.sessions.is_authorized(&session);

        Ok(Self {
            token: Some(token),
            session,
            authorized,
        })
    }
}

/// Attach a `Set-Cookie` header to an outgoing header map.
pub fn append_cookie(headers: &mut HeaderMap, value: HeaderValue) {
    headers.append(SET_COOKIE, value);
}
