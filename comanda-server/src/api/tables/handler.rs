//! Dining Table API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::{RepoError, dining_table, order};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    DiningTable, DiningTableCreate, OrderDetail, TableOverview, TableStatus, TableStatusUpdate,
    TableTransfer,
};

const MAX_CAPACITY: i64 = 50;

async fn load_table(state: &ServerState, id: i64) -> AppResult<DiningTable> {
    dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found")))
}

/// GET /api/tables - every table with its active order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TableOverview>>> {
    let tables = dining_table::find_all(&state.pool).await?;
    let active = order::find_active(&state.pool).await?;
    let mut by_table: HashMap<i64, OrderDetail> = convert::order_details(&state.pool, active)
        .await?
        .into_iter()
        .map(|d| (d.order.table_id, d))
        .collect();

    let overview = tables
        .into_iter()
        .map(|table| TableOverview {
            active_order: by_table.remove(&table.id),
            table,
        })
        .collect();
    Ok(Json(overview))
}

/// GET /api/tables/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TableOverview>> {
    let table = load_table(&state, id).await?;
    let active_order = match order::find_active_by_table(&state.pool, id).await? {
        Some(o) => Some(convert::order_detail(&state.pool, o).await?),
        None => None,
    };
    Ok(Json(TableOverview {
        table,
        active_order,
    }))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    if payload.number < 1 {
        return Err(AppError::validation(format!(
            "number must be positive, got {}",
            payload.number
        )));
    }
    if let Some(capacity) = payload.capacity
        && !(1..=MAX_CAPACITY).contains(&capacity)
    {
        return Err(AppError::validation(format!(
            "capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"
        )));
    }

    let number = payload.number;
    let table = dining_table::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::with_message(
                ErrorCode::TableNumberExists,
                format!("Table number {number} already exists"),
            ),
            other => other.into(),
        })?;

    tracing::info!(table_id = table.id, number = table.number, "Table created");
    Ok(Json(table))
}

/// PUT /api/tables/:id/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    load_table(&state, id).await?;
    let table = dining_table::update_status(&state.pool, id, payload.status).await?;
    Ok(Json(table))
}

/// POST /api/tables/transfer - move the active order to a free table
pub async fn transfer(
    State(state): State<ServerState>,
    Json(payload): Json<TableTransfer>,
) -> AppResult<Json<OrderDetail>> {
    let TableTransfer {
        from_table_id,
        to_table_id,
    } = payload;
    if from_table_id == to_table_id {
        return Err(AppError::validation("Source and destination tables must differ"));
    }

    load_table(&state, from_table_id).await?;
    let destination = load_table(&state, to_table_id).await?;
    if destination.status != TableStatus::Free {
        return Err(AppError::with_message(
            ErrorCode::TableNotFree,
            format!("Table {} is occupied", destination.number),
        ));
    }
    if order::find_active_by_table(&state.pool, from_table_id)
        .await?
        .is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::TableNotOccupied,
            format!("Table {from_table_id} has no active order"),
        ));
    }

    let moved = dining_table::transfer(&state.pool, from_table_id, to_table_id).await?;
    tracing::info!(
        order_id = moved.id,
        from_table_id,
        to_table_id,
        "Order transferred"
    );
    Ok(Json(convert::order_detail(&state.pool, moved).await?))
}
