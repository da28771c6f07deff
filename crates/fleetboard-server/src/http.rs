// SPDX-License-Identifier: Apache-2.0

use crate::api::{
    columns_from_schema, ApiError, ApiErrorCode, DashboardResponseDto, MetaResponseDto,
    ProjectResponseDto, API_VERSION,
};
use crate::state::{unix_now, AppState, DashboardSnapshot};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fleetboard_engine::{elapsed_description, refreshed_banner};
use fleetboard_model::ProjectId;
use serde_json::json;
use std::sync::Arc;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .route("/v1/meta", get(meta_handler))
        .route("/v1/dashboard", get(dashboard_handler))
        .route("/v1/projects/:project_id", get(project_handler))
        .with_state(state)
}

#[must_use]
fn api_error_status(code: ApiErrorCode) -> StatusCode {
    match code {
        ApiErrorCode::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        ApiErrorCode::InvalidProjectId => StatusCode::BAD_REQUEST,
        ApiErrorCode::ProjectNotFound => StatusCode::NOT_FOUND,
        ApiErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[must_use]
fn api_error_response(code: ApiErrorCode, message: &str) -> Response {
    let body = Json(json!({"error": ApiError {
        code,
        message: message.to_string(),
    }}));
    (api_error_status(code), body).into_response()
}

async fn landing_handler() -> Response {
    Json(json!({
        "service": crate::CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": API_VERSION,
    }))
    .into_response()
}

async fn healthz_handler() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

async fn readyz_handler(State(state): State<AppState>) -> Response {
    if state.is_ready() {
        Json(json!({"status": "ready"})).into_response()
    } else {
        api_error_response(ApiErrorCode::NotReady, "no snapshot loaded yet")
    }
}

async fn meta_handler(State(state): State<AppState>) -> Response {
    let Some(snapshot) = state.snapshot().await else {
        return api_error_response(ApiErrorCode::NotReady, "no snapshot loaded yet");
    };
    let now = unix_now();
    Json(MetaResponseDto {
        api_version: API_VERSION.to_string(),
        last_updated: snapshot.meta.last_updated,
        console_domain: snapshot.meta.console_domain.clone(),
        freshness: elapsed_description(snapshot.meta.last_updated, now),
        banner: refreshed_banner(snapshot.meta.last_updated, now),
        degraded_sources: snapshot.report.degraded.clone(),
        content_hash: snapshot.content_hash.clone(),
    })
    .into_response()
}

async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let Some(snapshot) = state.snapshot().await else {
        return api_error_response(ApiErrorCode::NotReady, "no snapshot loaded yet");
    };
    Json(DashboardResponseDto {
        api_version: API_VERSION.to_string(),
        freshness: freshness_of(&snapshot),
        columns: columns_from_schema(state.schema()),
        rows: snapshot.rows.clone(),
        degraded_sources: snapshot.report.degraded.clone(),
    })
    .into_response()
}

async fn project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Response {
    let Some(snapshot) = state.snapshot().await else {
        return api_error_response(ApiErrorCode::NotReady, "no snapshot loaded yet");
    };
    let Ok(project) = ProjectId::parse(&project_id) else {
        return api_error_response(ApiErrorCode::InvalidProjectId, "malformed project id");
    };
    match snapshot.rows.iter().find(|row| row.project == project) {
        Some(row) => Json(ProjectResponseDto {
            api_version: API_VERSION.to_string(),
            freshness: freshness_of(&snapshot),
            row: row.clone(),
        })
        .into_response(),
        None => api_error_response(
            ApiErrorCode::ProjectNotFound,
            &format!("unknown project: {project}"),
        ),
    }
}

fn freshness_of(snapshot: &Arc<DashboardSnapshot>) -> String {
    elapsed_description(snapshot.meta.last_updated, unix_now())
}
