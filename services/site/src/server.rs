use crate::cli::{prepare, ServeArgs};
use crate::infra::{AppState, RatingsSource};
use crate::routes::ratings_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use retro_ratings::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = prepare(args.data.take())?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let source = Arc::new(RatingsSource::new(&config.ratings));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        source: source.clone(),
    };

    let app = ratings_router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data = %source.data_path().display(),
        "ratings site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
