//! Auth provider contract
//!
//! The catalog treats authentication as an opaque session provider:
//! current-session lookup, sign-in by credential, sign-out, and an
//! observable auth-state stream used to gate admin surfaces.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

/// Auth error type
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Auth provider unavailable: {0}")]
    Unavailable(String),
}

/// An authenticated session as issued by the provider
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
    /// Token expiry (Unix seconds), when the token carries one
    pub expires_at: Option<u64>,
    pub signed_in_at: u64,
}

impl Session {
    /// Extract the expiry claim from a JWT token (Unix seconds)
    pub fn parse_jwt_exp(token: &str) -> Option<u64> {
        // JWT layout: header.payload.signature
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
        let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
        let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
        payload.get("exp")?.as_u64()
    }

    /// Whether the session's token has expired at `now` (Unix seconds)
    pub fn is_expired_at(&self, now: u64) -> bool {
        matches!(self.expires_at, Some(exp) if now > exp)
    }
}

/// Opaque session provider contract
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Currently signed-in session, if any
    async fn current_user(&self) -> Option<Session>;

    /// Sign in with credentials
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Sign out the current session
    async fn sign_out(&self);

    /// Subscribe to auth-state changes; the receiver yields the new
    /// session (or `None` after sign-out)
    fn watch(&self) -> watch::Receiver<Option<Session>>;
}

/// In-memory auth provider for tests and demos
pub struct MemoryAuth {
    users: RwLock<HashMap<String, String>>,
    state_tx: watch::Sender<Option<Session>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(None);
        Self {
            users: RwLock::new(HashMap::new()),
            state_tx,
        }
    }

    /// Register an account
    pub fn with_user(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.write().insert(email.into(), password.into());
        self
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn current_user(&self) -> Option<Session> {
        self.state_tx.borrow().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let valid = self
            .users
            .read()
            .get(email)
            .map(|p| p == password)
            .unwrap_or(false);
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = format!("session-{}", Uuid::new_v4());
        let session = Session {
            user_id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            expires_at: Session::parse_jwt_exp(&token),
            token,
            signed_in_at: chrono::Utc::now().timestamp() as u64,
        };

        tracing::info!(email = %email, "Signed in");
        let _ = self.state_tx.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) {
        tracing::info!("Signed out");
        let _ = self.state_tx.send(None);
    }

    fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.state_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    fn fake_jwt(exp: u64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("{}.{}.sig", header, payload)
    }

    #[test]
    fn test_parse_jwt_exp() {
        assert_eq!(Session::parse_jwt_exp(&fake_jwt(1_700_000_000)), Some(1_700_000_000));
        assert_eq!(Session::parse_jwt_exp("not-a-jwt"), None);
        assert_eq!(Session::parse_jwt_exp("a.b.c"), None);
    }

    #[test]
    fn test_is_expired_at() {
        let session = Session {
            user_id: "u1".to_string(),
            email: "a@b.c".to_string(),
            token: String::new(),
            expires_at: Some(100),
            signed_in_at: 50,
        };
        assert!(!session.is_expired_at(100));
        assert!(session.is_expired_at(101));
    }

    #[tokio::test]
    async fn test_sign_in_and_watch() {
        let auth = MemoryAuth::new().with_user("admin@shop.test", "secret");
        let mut rx = auth.watch();

        assert!(auth.current_user().await.is_none());
        assert!(auth.sign_in("admin@shop.test", "wrong").await.is_err());

        let session = auth.sign_in("admin@shop.test", "secret").await.unwrap();
        assert_eq!(session.email, "admin@shop.test");
        assert!(rx.changed().await.is_ok());
        assert!(rx.borrow().is_some());

        auth.sign_out().await;
        assert!(auth.current_user().await.is_none());
    }
}
