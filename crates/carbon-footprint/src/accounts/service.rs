use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use super::domain::{
    normalize_email, Credentials, PasswordChange, ProfileUpdate, Registration, Session, User,
    UserId, UserView,
};
use super::password::{CredentialHasher, HashError};
use super::repository::UserRepository;
use super::session::{AuthError, SessionTokens};
use crate::error::error_response;
use crate::storage::StoreError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Service composing the user repository, credential hasher, and token issuer.
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    sessions: Arc<SessionTokens>,
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    pub fn new(users: Arc<U>, hasher: Arc<H>, sessions: Arc<SessionTokens>) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionTokens> {
        &self.sessions
    }

    /// Create an account and open a session for it.
    pub fn register(&self, registration: Registration) -> Result<Session, AccountError> {
        let email = validated_email(&registration.email)?;
        let username = validated_username(&registration.username)?;
        validate_password(&registration.password)?;

        let user = User {
            id: UserId::new(),
            email,
            username,
            password_hash: self.hasher.hash(&registration.password)?,
        };

        let user = self.users.create(user).map_err(account_store_error)?;
        info!(user_id = %user.id, "user registered");
        self.open_session(&user)
    }

    /// Exchange credentials for a session. Unknown emails and wrong passwords are
    /// indistinguishable to the caller.
    pub fn login(&self, credentials: Credentials) -> Result<Session, AccountError> {
        let email = normalize_email(&credentials.email).ok_or(AuthError::InvalidCredentials)?;
        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&credentials.password, &user.password_hash) {
            warn!(user_id = %user.id, "rejected login attempt");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "user logged in");
        self.open_session(&user)
    }

    /// Resolve a token to the user it was issued for.
    pub fn verify(&self, token: &str) -> Result<UserView, AccountError> {
        let user_id = self.sessions.verify(token)?;
        self.profile(&user_id)
    }

    pub fn profile(&self, user_id: &UserId) -> Result<UserView, AccountError> {
        self.load(user_id).map(|user| user.view())
    }

    pub fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserView, AccountError> {
        let email = validated_email(&update.email)?;
        let username = validated_username(&update.username)?;

        self.users
            .update_profile(user_id, &username, &email)
            .map_err(account_store_error)?;
        info!(%user_id, "profile updated");

        Ok(UserView {
            id: *user_id,
            email,
            username,
        })
    }

    pub fn change_password(
        &self,
        user_id: &UserId,
        change: PasswordChange,
    ) -> Result<(), AccountError> {
        let user = self.load(user_id)?;
        if !self
            .hasher
            .verify(&change.current_password, &user.password_hash)
        {
            warn!(%user_id, "password change rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
        validate_password(&change.new_password)?;

        let password_hash = self.hasher.hash(&change.new_password)?;
        self.users
            .update_password_hash(user_id, &password_hash)
            .map_err(account_store_error)?;
        info!(%user_id, "password changed");
        Ok(())
    }

    fn load(&self, user_id: &UserId) -> Result<User, AccountError> {
        // A valid token for a user that no longer exists is treated as an invalid session.
        self.users
            .find(user_id)?
            .ok_or(AccountError::Auth(AuthError::InvalidToken))
    }

    fn open_session(&self, user: &User) -> Result<Session, AccountError> {
        let token = self.sessions.issue(&user.id)?;
        Ok(Session {
            token,
            user: user.view(),
        })
    }
}

fn validated_email(raw: &str) -> Result<String, AccountError> {
    normalize_email(raw)
        .ok_or_else(|| AccountError::Validation("a valid email address is required".to_string()))
}

fn validated_username(raw: &str) -> Result<String, AccountError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AccountError::Validation("username is required".to_string()));
    }
    Ok(username.to_string())
}

fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn account_store_error(err: StoreError) -> AccountError {
    match err {
        StoreError::Conflict => AccountError::Conflict,
        StoreError::NotFound => AccountError::Auth(AuthError::InvalidToken),
        other => AccountError::Store(other),
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),
    #[error("an account with this email already exists")]
    Conflict,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        match self {
            AccountError::Validation(message) => {
                error_response(StatusCode::BAD_REQUEST, "validation_error", message)
            }
            AccountError::Conflict => error_response(
                StatusCode::CONFLICT,
                "conflict",
                "an account with this email already exists".to_string(),
            ),
            AccountError::Auth(err) => err.into_response(),
            AccountError::Hash(err) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                err.to_string(),
            ),
            AccountError::Store(err) => err.into_response(),
        }
    }
}
