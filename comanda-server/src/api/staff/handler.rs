//! Staff API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{RepoError, staff};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{StaffCreate, StaffMember, StaffRole, StaffStats, StaffUpdate};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::StaffNotFound, format!("Staff member {id} not found"))
}

fn username_taken(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::StaffUsernameExists, msg),
        other => other.into(),
    }
}

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub role: Option<StaffRole>,
}

/// GET /api/staff?role=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<StaffListQuery>,
) -> AppResult<Json<Vec<StaffMember>>> {
    Ok(Json(staff::find_all(&state.pool, query.role).await?))
}

/// GET /api/staff/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffMember>> {
    let member = staff::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(member))
}

/// POST /api/staff
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffMember>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.photo, "photo", MAX_URL_LEN)?;

    let member = staff::create(&state.pool, payload)
        .await
        .map_err(username_taken)?;
    tracing::info!(staff_id = member.id, username = %member.username, "Staff member created");
    Ok(Json(member))
}

/// PUT /api/staff/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<StaffMember>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(username) = &payload.username {
        validate_required_text(username, "username", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.photo, "photo", MAX_URL_LEN)?;

    staff::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let member = staff::update(&state.pool, id, payload)
        .await
        .map_err(username_taken)?;
    Ok(Json(member))
}

/// DELETE /api/staff/:id - deactivate
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    staff::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let changed = staff::deactivate(&state.pool, id).await?;
    if changed {
        tracing::info!(staff_id = id, "Staff member deactivated");
    }
    Ok(Json(changed))
}

/// GET /api/staff/stats - waiter sales and cook throughput
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<StaffStats>> {
    let waiters = staff::waiter_stats(&state.pool).await?;
    let cooks = staff::cook_stats(&state.pool).await?;
    Ok(Json(StaffStats { waiters, cooks }))
}
