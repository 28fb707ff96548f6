//! Admin access gating

use shared::error::{AppError, AppResult, ErrorCode};
use vitrine_store::{AuthProvider, Session};

/// Resolve the current session, rejecting anonymous or expired ones.
///
/// Every admin operation calls this before touching the store; the auth
/// provider itself is opaque.
pub async fn require_admin(auth: &dyn AuthProvider) -> AppResult<Session> {
    let session = auth
        .current_user()
        .await
        .ok_or_else(AppError::not_authenticated)?;

    let now = chrono::Utc::now().timestamp() as u64;
    if session.is_expired_at(now) {
        return Err(AppError::new(ErrorCode::SessionExpired));
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_store::MemoryAuth;

    #[tokio::test]
    async fn test_anonymous_is_rejected() {
        let auth = MemoryAuth::new();
        let err = require_admin(&auth).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_signed_in_passes() {
        let auth = MemoryAuth::new().with_user("admin@shop.test", "secret");
        auth.sign_in("admin@shop.test", "secret").await.unwrap();
        let session = require_admin(&auth).await.unwrap();
        assert_eq!(session.email, "admin@shop.test");
    }
}
