//! Maintenance operations

use super::RepoResult;
use sqlx::SqlitePool;

/// Rows removed by [`reset_operations`]
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ResetSummary {
    pub orders: u64,
    pub order_items: u64,
    pub shifts: u64,
    pub products: u64,
    pub categories: u64,
}

/// Wipe the operational history in one transaction.
///
/// Orders, their items and shifts are deleted and their id counters
/// restarted. Tombstoned catalog rows are purged, every table is freed.
/// Staff and the live catalog stay.
pub async fn reset_operations(pool: &SqlitePool) -> RepoResult<ResetSummary> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    let mut summary = ResetSummary::default();

    summary.order_items = sqlx::query("DELETE FROM order_item")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    summary.orders = sqlx::query("DELETE FROM orders")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    summary.shifts = sqlx::query("DELETE FROM shift")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    summary.products = sqlx::query(
        "DELETE FROM product WHERE is_deleted = 1 OR category_id IN (SELECT id FROM category WHERE is_deleted = 1)",
    )
    .execute(&mut *tx)
    .await?
    .rows_affected();
    summary.categories = sqlx::query("DELETE FROM category WHERE is_deleted = 1")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('order_item', 'orders', 'shift')")
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE dining_table SET status = 'FREE', updated_at = ?")
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::warn!(
        orders = summary.orders,
        shifts = summary.shifts,
        products = summary.products,
        categories = summary.categories,
        "Operational data reset"
    );
    Ok(summary)
}
