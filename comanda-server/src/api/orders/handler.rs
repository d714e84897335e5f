//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::{dining_table, order, product, staff};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_quantity};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    Order, OrderDetail, OrderItem, OrderItemUpdate, OrderListQuery, OrderStatus,
    OrderStatusUpdate, OrderSubmit,
};

async fn load_order(state: &ServerState, id: i64) -> AppResult<Order> {
    order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found")))
}

/// Item together with a check that its order can still change
async fn load_open_item(state: &ServerState, item_id: i64) -> AppResult<OrderItem> {
    let item = order::find_item(&state.pool, item_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::OrderItemNotFound,
            format!("Order item {item_id} not found"),
        )
    })?;
    let parent = load_order(state, item.order_id).await?;
    if parent.status == OrderStatus::Closed {
        return Err(AppError::with_message(
            ErrorCode::OrderAlreadyClosed,
            format!("Order {} is already closed", parent.id),
        ));
    }
    Ok(item)
}

/// GET /api/orders?status= - kitchen board (SENT, PREPARING, READY by default)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let statuses = match query.status {
        Some(status) => vec![status],
        None => OrderStatus::ACTIVE_KITCHEN.to_vec(),
    };
    let orders = order::find_by_statuses(&state.pool, &statuses).await?;
    Ok(Json(convert::order_details(&state.pool, orders).await?))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let o = load_order(&state, id).await?;
    Ok(Json(convert::order_detail(&state.pool, o).await?))
}

/// POST /api/orders - submit a round (creates the table's order or appends)
pub async fn submit(
    State(state): State<ServerState>,
    Json(mut payload): Json<OrderSubmit>,
) -> AppResult<Json<OrderDetail>> {
    if payload.items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "A round needs at least one item",
        ));
    }
    for item in &payload.items {
        validate_quantity(item.quantity, "quantity")?;
        validate_optional_text(&item.note, "note", MAX_NOTE_LEN)?;
    }

    dining_table::find_by_id(&state.pool, payload.table_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::TableNotFound,
                format!("Table {} not found", payload.table_id),
            )
        })?;

    let waiter = staff::find_by_id(&state.pool, payload.waiter_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::StaffNotFound,
                format!("Staff member {} not found", payload.waiter_id),
            )
        })?;
    if !waiter.is_active {
        return Err(AppError::with_message(
            ErrorCode::StaffInactive,
            format!("Staff member {} is inactive", waiter.name),
        ));
    }

    for item in &payload.items {
        let p = product::find_by_id(&state.pool, item.product_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", item.product_id),
                )
            })?;
        if !p.is_active {
            return Err(AppError::with_message(
                ErrorCode::ProductUnavailable,
                format!("Product {} is not available", p.name),
            )
            .with_detail("productId", p.id));
        }
    }

    // Blank notes do not split lines
    for item in &mut payload.items {
        if item.note.as_deref().is_some_and(|n| n.trim().is_empty()) {
            item.note = None;
        }
    }

    let (placed, created) = order::submit_round(&state.pool, &payload).await?;
    tracing::info!(
        order_id = placed.id,
        table_id = placed.table_id,
        items = payload.items.len(),
        created,
        "Round submitted"
    );
    Ok(Json(convert::order_detail(&state.pool, placed).await?))
}

/// PUT /api/orders/:id/status
///
/// Closing goes through checkout, never through here.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    if payload.status == OrderStatus::Closed {
        return Err(AppError::validation(
            "Orders are closed through checkout",
        ));
    }
    let current = load_order(&state, id).await?;
    if current.status == OrderStatus::Closed {
        return Err(AppError::with_message(
            ErrorCode::OrderAlreadyClosed,
            format!("Order {id} is already closed"),
        ));
    }

    let updated = order::update_status(&state.pool, id, payload.status).await?;
    Ok(Json(updated))
}

/// PUT /api/orders/items/:id - item status, quantity or cook
pub async fn update_item(
    State(state): State<ServerState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    if let Some(quantity) = payload.quantity {
        validate_quantity(quantity, "quantity")?;
    }
    load_open_item(&state, item_id).await?;

    if let Some(cook_id) = payload.cook_id {
        staff::find_by_id(&state.pool, cook_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::StaffNotFound,
                format!("Staff member {cook_id} not found"),
            )
        })?;
    }

    let item = order::update_item(&state.pool, item_id, &payload).await?;
    Ok(Json(item))
}

/// DELETE /api/orders/items/:id
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<bool>> {
    load_open_item(&state, item_id).await?;
    let deleted = order::delete_item(&state.pool, item_id).await?;
    Ok(Json(deleted))
}
