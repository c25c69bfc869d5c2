use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::domain::UserId;
use crate::config::AuthConfig;
use crate::error::error_response;

/// Issues and verifies HS256 session tokens.
///
/// Secret and lifetime are fixed at construction; nothing here reads process-wide state.
#[derive(Debug)]
pub struct SessionTokens {
    secret: SecretString,
    ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            secret: SecretString::from(secret.to_owned()),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.expose_secret(), config.token_ttl)
    }

    pub fn issue(&self, user_id: &UserId) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: &UserId, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|_| AuthError::Issue)
    }

    /// Validates signature and expiry, returning the subject.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let decoded = decode::<Claims>(token, &key, &validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            }
        })?;

        UserId::parse(&decoded.claims.sub).ok_or(AuthError::InvalidToken)
    }
}

/// Extracts the token from `Authorization`, accepting `Bearer <token>` or a bare token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::Missing)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?
        .trim();

    let token = match raw.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => raw,
    };
    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}

/// Authentication failures; all surface as 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization required")]
    Missing,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    Expired,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token could not be issued")]
    Issue,
}

impl AuthError {
    fn kind(&self) -> &'static str {
        match self {
            AuthError::Issue => "internal_error",
            _ => "auth_error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Issue => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        error_response(status, self.kind(), self.to_string())
    }
}
