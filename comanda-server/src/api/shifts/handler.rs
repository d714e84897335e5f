//! Shift API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::validation::validate_amount;
use crate::utils::{AppError, AppResult};
use shared::models::{BalanceSnapshot, ShiftHistoryPage, ShiftToggle, ShiftToggleResult};

const MAX_PAGE_SIZE: i64 = 100;

/// POST /api/shifts/toggle - open the drawer, or close it when nothing is pending
pub async fn toggle(
    State(state): State<ServerState>,
    payload: Option<Json<ShiftToggle>>,
) -> AppResult<Json<ShiftToggleResult>> {
    let opening_float = payload.and_then(|Json(p)| p.opening_float);
    if let Some(amount) = opening_float {
        validate_amount(amount, "openingFloat")?;
    }

    let result = state.shifts.toggle(opening_float).await?;
    Ok(Json(result))
}

/// GET /api/shifts/current - balance of the latest shift
pub async fn current(State(state): State<ServerState>) -> AppResult<Json<BalanceSnapshot>> {
    Ok(Json(state.shifts.current().await?))
}

/// Query params for shift history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub date: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    5
}

/// GET /api/shifts/history - paginated snapshots, newest first
pub async fn history(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<ShiftHistoryPage>> {
    if query.page < 1 {
        return Err(AppError::validation(format!(
            "page must be at least 1, got {}",
            query.page
        )));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&query.limit) {
        return Err(AppError::validation(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}, got {}",
            query.limit
        )));
    }

    let date = query.date.as_deref().filter(|d| !d.trim().is_empty());
    let page = state.shifts.history(date, query.page, query.limit).await?;
    Ok(Json(page))
}

/// GET /api/shifts/:id - detailed balance of one shift
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BalanceSnapshot>> {
    Ok(Json(state.shifts.by_id(id).await?))
}
