use carbon_footprint::accounts::{AccountService, Argon2Hasher, SessionTokens};
use carbon_footprint::calculator::{CalculationEngine, CalculatorState};
use carbon_footprint::results::ResultService;
use carbon_footprint::storage::SqliteStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Services backed by one SQLite store and one token issuer.
pub(crate) struct Services {
    pub(crate) calculator: CalculatorState,
    pub(crate) accounts: Arc<AccountService<SqliteStore, Argon2Hasher>>,
    pub(crate) results: Arc<ResultService<SqliteStore>>,
    pub(crate) sessions: Arc<SessionTokens>,
}

impl Services {
    pub(crate) fn new(store: Arc<SqliteStore>, sessions: Arc<SessionTokens>) -> Self {
        Self {
            calculator: CalculatorState {
                engine: CalculationEngine::default(),
                sessions: sessions.clone(),
            },
            accounts: Arc::new(AccountService::new(
                store.clone(),
                Arc::new(Argon2Hasher),
                sessions.clone(),
            )),
            results: Arc::new(ResultService::new(store)),
            sessions,
        }
    }
}
