use crate::cli::ServeArgs;
use crate::infra::{AppState, Services};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use carbon_footprint::accounts::SessionTokens;
use carbon_footprint::config::AppConfig;
use carbon_footprint::error::AppError;
use carbon_footprint::storage::SqliteStore;
use carbon_footprint::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(database) = args.database.take() {
        config.storage.database_path = database;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(SqliteStore::open(&config.storage.database_path)?);
    let sessions = Arc::new(SessionTokens::from_config(&config.auth));
    let services = Services::new(store, sessions);

    let app = with_api_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = %config.storage.database_path,
        token_ttl_hours = config.auth.token_ttl.num_hours(),
        "carbon footprint service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
