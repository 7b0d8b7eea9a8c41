use crate::cli::ServeArgs;
use crate::demo::{demo_roster, load_corpus};
use crate::infra::{AppState, InMemoryScholarshipCatalog, InMemoryStudentDirectory};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholar_fit::config::AppConfig;
use scholar_fit::error::AppError;
use scholar_fit::matching::MatchService;
use scholar_fit::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let corpus = load_corpus(config.corpus.csv_path.clone())?;
    info!(
        scholarships = corpus.len(),
        source = ?config.corpus.csv_path,
        normalization = config.matching.weight_normalization.label(),
        "scholarship corpus loaded"
    );

    let students = Arc::new(InMemoryStudentDirectory::with_students(demo_roster()));
    let catalog = Arc::new(InMemoryScholarshipCatalog::with_scholarships(corpus));
    let match_service = Arc::new(MatchService::new(students, catalog, config.matching.clone()));

    let app = with_operational_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship fit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
