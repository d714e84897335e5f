//! Cash shift API (arqueo)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/toggle", post(handler::toggle))
        .route("/current", get(handler::current))
        .route("/history", get(handler::history))
        .route("/{id}", get(handler::get_by_id))
}
