//! Sync endpoints: push, pull, and status.
//!
//! These are the entry points of the offline-first protocol. The
//! handlers stay thin: authenticate, hand the request to the sync
//! engine, serialize its outcome. Table-name validation happens inside
//! the engine and surfaces here as a 400.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use finbook_core::sync::{PullResponse, PushRequest, PushResponse, SyncStatusResponse};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Debug, Deserialize)]
pub struct PullParams {
    table: String,
    since: Option<String>,
}

async fn push(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<PushRequest>,
) -> ApiResult<Json<PushResponse>> {
    let response = state.sync_service.push(user_id, request).await?;
    Ok(Json(response))
}

async fn pull(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PullParams>,
) -> ApiResult<Json<PullResponse>> {
    let response = state
        .sync_service
        .pull(user_id, &params.table, params.since.as_deref())
        .await?;
    Ok(Json(response))
}

async fn status(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<SyncStatusResponse>> {
    Ok(Json(state.sync_service.status(user_id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync/push", post(push))
        .route("/sync/pull", get(pull))
        .route("/sync/status", get(status))
}
