//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str = "SELECT c.id, c.name, c.color, c.icon, c.sort_order, c.is_active, c.send_to_kitchen, (SELECT COUNT(*) FROM product p WHERE p.category_id = c.id AND p.is_active = 1 AND p.is_deleted = 0) AS product_count, c.created_at, c.updated_at FROM category c";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE c.is_deleted = 0 ORDER BY c.sort_order, c.id");
    let categories = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE c.id = ? AND c.is_deleted = 0");
    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let sort_order = match data.sort_order {
        Some(order) => order,
        None => {
            let max: Option<i64> =
                sqlx::query_scalar("SELECT MAX(sort_order) FROM category WHERE is_deleted = 0")
                    .fetch_one(pool)
                    .await?;
            max.map_or(0, |m| m + 1)
        }
    };

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO category (name, color, icon, sort_order, is_active, send_to_kitchen, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.color)
    .bind(&data.icon)
    .bind(sort_order)
    .bind(data.is_active.unwrap_or(true))
    .bind(data.send_to_kitchen.unwrap_or(true))
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), color = COALESCE(?2, color), icon = COALESCE(?3, icon), sort_order = COALESCE(?4, sort_order), is_active = COALESCE(?5, is_active), send_to_kitchen = COALESCE(?6, send_to_kitchen), updated_at = ?7 WHERE id = ?8 AND is_deleted = 0",
    )
    .bind(&data.name)
    .bind(&data.color)
    .bind(&data.icon)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(data.send_to_kitchen)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Tombstone a category together with its products.
///
/// Rows stay so closed orders keep resolving product names.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE category SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("UPDATE product SET is_deleted = 1, updated_at = ? WHERE category_id = ?")
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
