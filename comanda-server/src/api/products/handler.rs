//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::{category, product};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductListQuery, ProductUpdate};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
}

/// Price must be finite and non-negative
fn validate_price(price: f64) -> AppResult<()> {
    crate::utils::validation::validate_amount(price, "price").map_err(|e| {
        AppError::with_message(ErrorCode::ProductInvalidPrice, e.message)
    })
}

async fn ensure_category(state: &ServerState, category_id: i64) -> AppResult<()> {
    category::find_by_id(&state.pool, category_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("Category {category_id} not found"),
            )
        })?;
    Ok(())
}

/// GET /api/products?category_id= - active products
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(product::find_all(&state.pool, query.category_id).await?))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let p = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(p))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_price(payload.price)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    ensure_category(&state, payload.category_id).await?;

    let p = product::create(&state.pool, payload).await?;
    tracing::info!(product_id = p.id, name = %p.name, price = p.price, "Product created");
    Ok(Json(p))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    if let Some(category_id) = payload.category_id {
        ensure_category(&state, category_id).await?;
    }

    product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let p = product::update(&state.pool, id, payload).await?;
    Ok(Json(p))
}

/// DELETE /api/products/:id - tombstone
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !product::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(true))
}
