use crate::cli::ServeArgs;
use crate::infra::{load_roster, AppState, InMemoryStudentStore};
use crate::routes::with_roster_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mock_placement::config::AppConfig;
use mock_placement::error::AppError;
use mock_placement::placement::PlacementEngine;
use mock_placement::roster::RosterService;
use mock_placement::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let directory = config.placement.load_directory()?;
    let engine = Arc::new(PlacementEngine::new(Arc::new(directory)));

    let roster = match args.roster.take() {
        Some(path) => load_roster(&path)?,
        None => Vec::new(),
    };
    info!(students = roster.len(), "roster loaded");
    let store = Arc::new(InMemoryStudentStore::seeded(roster));
    let roster_service = Arc::new(
        RosterService::new(store, engine.clone())
            .with_top_performers(config.placement.top_performers),
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine,
    };

    let app = with_roster_routes(roster_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mock placement service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
