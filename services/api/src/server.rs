use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_diagnostic_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use reform_diagnostic::config::AppConfig;
use reform_diagnostic::error::AppError;
use reform_diagnostic::telemetry;
use reform_diagnostic::workflows::diagnostic::{HttpLeadGateway, LeadSubmissionService};
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

    let gateway = Arc::new(HttpLeadGateway::new(&config.lead));
    let lead_service = Arc::new(LeadSubmissionService::new(gateway));

    let app = with_diagnostic_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lead_endpoint = %config.lead.endpoint_url,
        "reform diagnostic service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
