//! Checkout API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::order::{self, CheckoutData};
use crate::db::repository::dining_table;
use crate::utils::money::{to_decimal, to_f64};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CheckoutReceipt, CheckoutRequest, DEFAULT_DOC_TYPE, PaymentMethod};

pub const MSG_PAID: &str = "Pago registrado";

fn validate_payment_amount(value: f64, field: &str) -> AppResult<()> {
    validate_amount(value, field)
        .map_err(|e| AppError::with_message(ErrorCode::PaymentInvalidAmount, e.message))
}

fn no_active_order(table_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::TableHasNoActiveOrder,
        format!("Table {table_id} has no active order"),
    )
}

/// POST /api/checkout/:table_id - close the table's order and free the table
pub async fn checkout(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutReceipt>> {
    let tip = payload.tip.unwrap_or(0.0);
    let total_received = payload.total_received.unwrap_or(0.0);
    validate_payment_amount(tip, "tip")?;
    validate_payment_amount(total_received, "total_received")?;
    validate_optional_text(&payload.doc_type, "doc_type", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    dining_table::find_by_id(&state.pool, table_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::TableNotFound, format!("Table {table_id} not found"))
        })?;
    if order::find_active_by_table(&state.pool, table_id)
        .await?
        .is_none()
    {
        return Err(no_active_order(table_id));
    }

    let payment_method = PaymentMethod::classify(payload.payment_method.as_deref().unwrap_or(""));
    let doc_type = payload
        .doc_type
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DOC_TYPE.to_string());

    let closed = order::checkout(
        &state.pool,
        table_id,
        CheckoutData {
            payment_method,
            doc_type,
            total_received: to_f64(to_decimal(total_received)),
            tip: to_f64(to_decimal(tip)),
            notes: payload.notes,
            customer_email: payload.email.filter(|e| !e.trim().is_empty()),
        },
    )
    .await?
    .ok_or_else(|| no_active_order(table_id))?;

    let items = order::find_items(&state.pool, closed.id).await?;
    let subtotal = convert::subtotal(&items);
    let total = to_f64(to_decimal(subtotal) + to_decimal(closed.tip));

    tracing::info!(
        order_id = closed.id,
        table_id,
        method = payment_method.as_str(),
        total,
        "Order paid"
    );

    Ok(Json(CheckoutReceipt {
        order: closed,
        subtotal,
        total,
        message: MSG_PAID.to_string(),
    }))
}
