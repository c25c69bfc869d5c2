use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Duration;
use serde_json::{json, Value};

use crate::accounts::{SessionTokens, UserId};
use crate::calculator::{Category, InputBag};
use crate::results::domain::{NewResult, Period, ResultId, ResultRecord, ResultSubmission};
use crate::results::repository::ResultRepository;
use crate::results::service::ResultService;
use crate::storage::StoreError;

pub(super) fn sessions() -> Arc<SessionTokens> {
    Arc::new(SessionTokens::new("results-test-secret", Duration::hours(24)))
}

pub(super) fn submission(category: &str, value: f64, period: &str) -> ResultSubmission {
    ResultSubmission {
        category: category.to_string(),
        value,
        inputs: InputBag::try_from(json!({ "redMeatKg": 0.5, "shortCircuit": "partial" }))
            .expect("object inputs"),
        period: period.to_string(),
    }
}

pub(super) fn build_service() -> (ResultService<MemoryResults>, Arc<MemoryResults>) {
    let repository = Arc::new(MemoryResults::default());
    (ResultService::new(repository.clone()), repository)
}

type NaturalKey = (UserId, Category, Period);

/// Keeps rows in a hash map so listing order is arbitrary until the service sorts it.
#[derive(Default, Clone)]
pub(super) struct MemoryResults {
    pub(super) rows: Arc<Mutex<HashMap<NaturalKey, ResultRecord>>>,
}

impl ResultRepository for MemoryResults {
    fn upsert(&self, result: NewResult) -> Result<ResultId, StoreError> {
        let mut guard = self.rows.lock().expect("results mutex poisoned");
        let key = (result.user_id, result.category, result.period);
        let id = guard.get(&key).map(|existing| existing.id).unwrap_or(result.id);
        guard.insert(
            key,
            ResultRecord {
                id,
                user_id: result.user_id,
                category: result.category,
                value: result.value,
                inputs: result.inputs,
                period: result.period,
                created_at: result.created_at,
            },
        );
        Ok(id)
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ResultRecord>, StoreError> {
        let guard = self.rows.lock().expect("results mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.user_id == *user_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableResults;

impl ResultRepository for UnavailableResults {
    fn upsert(&self, _result: NewResult) -> Result<ResultId, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<ResultRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
