use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::engine::{Adjustment, CalculationEngine, Term};
use super::factors::FactorTable;
use super::inputs::InputBag;
use crate::accounts::{AuthenticatedUser, SessionTokens};
use crate::extract::JsonBody;

/// Shared state for the calculator routes.
#[derive(Clone)]
pub struct CalculatorState {
    pub engine: CalculationEngine,
    pub sessions: Arc<SessionTokens>,
}

impl FromRef<CalculatorState> for Arc<SessionTokens> {
    fn from_ref(state: &CalculatorState) -> Self {
        state.sessions.clone()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub category: String,
    #[serde(default)]
    pub user_inputs: InputBag,
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub category: String,
    pub result: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors_version: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<Term>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<Vec<Adjustment>>,
}

/// Public factor snapshot plus the authenticated calculation endpoint.
pub fn calculator_router(state: CalculatorState) -> Router {
    Router::new()
        .route("/api/factors", get(factors_handler))
        .route("/api/calculate", post(calculate_handler))
        .with_state(state)
}

pub(crate) async fn factors_handler(
    State(state): State<CalculatorState>,
) -> Json<&'static FactorTable> {
    Json(state.engine.factors())
}

pub(crate) async fn calculate_handler(
    State(state): State<CalculatorState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    JsonBody(request): JsonBody<CalculateRequest>,
) -> Json<CalculateResponse> {
    let CalculateRequest {
        category,
        user_inputs,
        detailed,
    } = request;

    let calculation = state.engine.compute_detailed(&category, &user_inputs);
    info!(%user_id, %category, result = calculation.total, "carbon calculation");

    let (factors_version, terms, adjustments) = if detailed {
        (
            Some(state.engine.factors().version),
            Some(calculation.terms),
            Some(calculation.adjustments),
        )
    } else {
        (None, None, None)
    };

    Json(CalculateResponse {
        category,
        result: calculation.total,
        factors_version,
        terms,
        adjustments,
    })
}
