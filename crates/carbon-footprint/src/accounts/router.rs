use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::HeaderMap,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{Credentials, PasswordChange, ProfileUpdate, Registration, Session, UserView};
use super::extract::AuthenticatedUser;
use super::password::CredentialHasher;
use super::repository::UserRepository;
use super::service::{AccountError, AccountService};
use super::session::{bearer_token, SessionTokens};
use crate::extract::JsonBody;

/// Shared state for the account routes.
pub struct AccountState<U, H> {
    pub service: Arc<AccountService<U, H>>,
}

impl<U, H> Clone for AccountState<U, H> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<U, H> FromRef<AccountState<U, H>> for Arc<SessionTokens>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    fn from_ref(state: &AccountState<U, H>) -> Self {
        state.service.sessions().clone()
    }
}

/// Router builder exposing registration, login, and profile endpoints.
pub fn account_router<U, H>(service: Arc<AccountService<U, H>>) -> Router
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    Router::new()
        .route("/api/register", post(register_handler::<U, H>))
        .route("/api/login", post(login_handler::<U, H>))
        .route("/api/verify", get(verify_handler::<U, H>))
        .route("/api/user/profile", put(update_profile_handler::<U, H>))
        .route("/api/user/password", put(change_password_handler::<U, H>))
        .with_state(AccountState { service })
}

pub(crate) async fn register_handler<U, H>(
    State(state): State<AccountState<U, H>>,
    JsonBody(registration): JsonBody<Registration>,
) -> Result<Json<Session>, AccountError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    state.service.register(registration).map(Json)
}

pub(crate) async fn login_handler<U, H>(
    State(state): State<AccountState<U, H>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<Session>, AccountError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    state.service.login(credentials).map(Json)
}

pub(crate) async fn verify_handler<U, H>(
    State(state): State<AccountState<U, H>>,
    headers: HeaderMap,
) -> Result<Json<UserView>, AccountError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let token = bearer_token(&headers)?;
    state.service.verify(token).map(Json)
}

pub(crate) async fn update_profile_handler<U, H>(
    State(state): State<AccountState<U, H>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<UserView>, AccountError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    state.service.update_profile(&user_id, update).map(Json)
}

pub(crate) async fn change_password_handler<U, H>(
    State(state): State<AccountState<U, H>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    JsonBody(change): JsonBody<PasswordChange>,
) -> Result<Json<Value>, AccountError>
where
    U: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    state.service.change_password(&user_id, change)?;
    Ok(Json(json!({ "status": "password updated" })))
}
