use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    routing::get,
    Json, Router,
};

use super::domain::{ResultSubmission, ResultView, SavedResult};
use super::repository::ResultRepository;
use super::service::{ResultService, ResultServiceError};
use crate::accounts::{AuthenticatedUser, SessionTokens};
use crate::extract::JsonBody;

/// Shared state for the result routes.
pub struct ResultsState<R> {
    pub service: Arc<ResultService<R>>,
    pub sessions: Arc<SessionTokens>,
}

impl<R> Clone for ResultsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R> FromRef<ResultsState<R>> for Arc<SessionTokens> {
    fn from_ref(state: &ResultsState<R>) -> Self {
        state.sessions.clone()
    }
}

/// Router builder exposing save and list for the caller's own results.
pub fn results_router<R>(service: Arc<ResultService<R>>, sessions: Arc<SessionTokens>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/results",
            get(list_results_handler::<R>).post(save_result_handler::<R>),
        )
        .with_state(ResultsState { service, sessions })
}

pub(crate) async fn save_result_handler<R>(
    State(state): State<ResultsState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    JsonBody(submission): JsonBody<ResultSubmission>,
) -> Result<Json<SavedResult>, ResultServiceError>
where
    R: ResultRepository + 'static,
{
    state.service.save(&user_id, submission).map(Json)
}

pub(crate) async fn list_results_handler<R>(
    State(state): State<ResultsState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<ResultView>>, ResultServiceError>
where
    R: ResultRepository + 'static,
{
    let records = state.service.list(&user_id)?;
    Ok(Json(records.iter().map(|record| record.view()).collect()))
}
