use crate::infra::AppState;
use crate::table::EMPTY_STATE;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use retro_ratings::error::AppError;
use retro_ratings::ratings::{RejectedEntry, RenderRow};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Serialize)]
pub(crate) struct RatingsTableResponse {
    pub(crate) rendered_at: DateTime<Utc>,
    pub(crate) total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<&'static str>,
    pub(crate) skipped: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) rejected: Vec<RejectedEntry>,
    pub(crate) rows: Vec<RenderRow>,
}

pub(crate) fn ratings_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/ratings", get(ratings_endpoint))
        .route("/api/v1/ratings/:index", get(rating_row_endpoint))
        .route("/assets/*path", get(asset_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn ratings_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<RatingsTableResponse>, AppError> {
    let table = state.source.load().await?;
    let message = table.rows.is_empty().then_some(EMPTY_STATE);
    let skipped = table.skipped();

    Ok(Json(RatingsTableResponse {
        rendered_at: Utc::now(),
        total: table.rows.len(),
        message,
        skipped,
        rejected: table.dataset.rejected,
        rows: table.rows,
    }))
}

pub(crate) async fn rating_row_endpoint(
    Extension(state): Extension<AppState>,
    Path(index): Path<usize>,
) -> Result<Response, AppError> {
    let table = state.source.load().await?;
    let response = match table.rows.into_iter().nth(index) {
        Some(row) => (StatusCode::OK, Json(row)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no rating row at index {index}") })),
        )
            .into_response(),
    };
    Ok(response)
}

pub(crate) async fn asset_endpoint(
    Extension(state): Extension<AppState>,
    Path(requested): Path<String>,
) -> Response {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "asset not found" })),
        )
            .into_response()
    };

    let Some(path) = state.source.asset_path(&requested) else {
        debug!(requested = %requested, "rejected asset path");
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "asset unavailable");
            not_found()
        }
    }
}
