use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{
    NewResult, Period, ResultId, ResultRecord, ResultSubmission, SavedResult, ValidationError,
};
use super::repository::ResultRepository;
use crate::accounts::UserId;
use crate::calculator::Category;
use crate::error::error_response;
use crate::storage::StoreError;

/// Validates submissions and persists them one row per `(user, category, period)`.
pub struct ResultService<R> {
    repository: Arc<R>,
}

impl<R> ResultService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn save(
        &self,
        user_id: &UserId,
        submission: ResultSubmission,
    ) -> Result<SavedResult, ResultServiceError> {
        self.save_at(user_id, submission, Utc::now())
    }

    /// Save with an explicit timestamp; resubmitting the same natural key overwrites the
    /// value, inputs, and timestamp but keeps the original id.
    pub fn save_at(
        &self,
        user_id: &UserId,
        submission: ResultSubmission,
        now: DateTime<Utc>,
    ) -> Result<SavedResult, ResultServiceError> {
        let new = validate(user_id, submission, now)?;
        let (category, period) = (new.category, new.period);

        let id = self.repository.upsert(new)?;
        info!(%user_id, %category, %period, result_id = %id, "result saved");

        Ok(SavedResult { id, status: "saved" })
    }

    pub fn list(&self, user_id: &UserId) -> Result<Vec<ResultRecord>, ResultServiceError> {
        let mut records = self.repository.list_for_user(user_id)?;
        records.sort_by(ResultRecord::listing_order);
        Ok(records)
    }
}

fn validate(
    user_id: &UserId,
    submission: ResultSubmission,
    now: DateTime<Utc>,
) -> Result<NewResult, ValidationError> {
    let category = Category::parse(&submission.category)
        .ok_or_else(|| ValidationError::Category(submission.category.clone()))?;
    let period = Period::parse(&submission.period)?;
    if !submission.value.is_finite() {
        return Err(ValidationError::Value);
    }

    Ok(NewResult {
        id: ResultId::new(),
        user_id: *user_id,
        category,
        value: submission.value,
        inputs: submission.inputs,
        period,
        created_at: now,
    })
}

/// Error raised by the result service.
#[derive(Debug, thiserror::Error)]
pub enum ResultServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ResultServiceError {
    fn into_response(self) -> Response {
        match self {
            ResultServiceError::Validation(err) => {
                error_response(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
            }
            ResultServiceError::Store(err) => err.into_response(),
        }
    }
}
