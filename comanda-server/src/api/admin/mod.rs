//! Admin API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/admin/reset | DELETE | wipe orders, items and shifts; purge tombstoned catalog rows |

use axum::{Json, Router, extract::State, routing::delete};

use crate::core::ServerState;
use crate::db::repository::admin::{self, ResetSummary};
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/reset", delete(reset))
}

/// DELETE /api/admin/reset
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<ResetSummary>> {
    let summary = admin::reset_operations(&state.pool).await?;
    Ok(Json(summary))
}
