use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredStore};
use crate::routes::with_diagnostic_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use goodtime_diagnostic::config::{AppConfig, DiagnosticConfig, EngineKind};
use goodtime_diagnostic::diagnostic::{
    DiagnosticService, DiagnosticServiceError, LanguageModelAnalyst, NarrativeEngine,
    OpenAiCompletionClient,
};
use goodtime_diagnostic::error::AppError;
use goodtime_diagnostic::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) fn narrative_engine(config: &DiagnosticConfig) -> Result<NarrativeEngine, AppError> {
    match (config.engine, &config.completion) {
        (EngineKind::LanguageModel, Some(completion)) => {
            let client = OpenAiCompletionClient::new(completion)
                .map_err(DiagnosticServiceError::from)?;
            info!(
                model = %completion.model,
                endpoint = client.endpoint(),
                "language model engine enabled"
            );
            Ok(NarrativeEngine::LanguageModel(LanguageModelAnalyst::new(
                Arc::new(client),
            )))
        }
        _ => Ok(NarrativeEngine::Deterministic),
    }
}

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

    let store = ConfiguredStore::from_dir(config.diagnostic.store_dir.as_deref())?;
    let store_kind = store.kind();
    let engine = narrative_engine(&config.diagnostic)?;
    let diagnostic_service = Arc::new(DiagnosticService::new(Arc::new(store), engine));

    let app = with_diagnostic_routes(diagnostic_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        engine = config.diagnostic.engine.as_str(),
        store = store_kind,
        "goodtime diagnostic api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
