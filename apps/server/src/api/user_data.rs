//! Account-wide data wipe.
//!
//! Lets a user reset their server copy before re-uploading from a
//! device. This is the only hard delete in the system; regular sync
//! deletions are always soft.

use std::sync::Arc;

use axum::{extract::State, routing::delete, Json, Router};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn delete_user_data(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Value>> {
    let deleted = state.sync_service.purge_all(user_id).await?;
    tracing::info!("user {} data wiped: {:?}", user_id, deleted);

    Ok(Json(json!({
        "success": true,
        "deleted": deleted,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/user/data", delete(delete_user_data))
}
