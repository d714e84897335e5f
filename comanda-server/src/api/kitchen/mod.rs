//! Kitchen API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/kitchen/queue | GET | items still to prepare or deliver, oldest first |

use axum::{Json, Router, extract::State, routing::get};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::AppResult;
use shared::models::KitchenTicket;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/kitchen/queue", get(queue))
}

/// GET /api/kitchen/queue
pub async fn queue(State(state): State<ServerState>) -> AppResult<Json<Vec<KitchenTicket>>> {
    let tickets = order::kitchen_queue(&state.pool).await?;
    Ok(Json(tickets))
}
