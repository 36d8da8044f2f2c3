//! HTTP routing.

pub mod sync;
pub mod user_data;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::main_lib::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(sync::router())
        .merge(user_data::router())
        .route("/health", get(health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
