use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use super::domain::UserId;
use super::session::{bearer_token, AuthError, SessionTokens};

/// Extractor for routes that require a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<SessionTokens>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = Arc::<SessionTokens>::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        sessions.verify(token).map(AuthenticatedUser)
    }
}
