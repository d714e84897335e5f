//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, Order, TableStatus};
use sqlx::SqlitePool;

const TABLE_COLUMNS: &str = "id, number, capacity, status, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_table ORDER BY number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_table WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &SqlitePool, number: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_table WHERE number = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(number)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if find_by_number(pool, data.number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table number {} already exists",
            data.number
        )));
    }

    let now = shared::util::now_millis();
    let sql = format!(
        "INSERT INTO dining_table (number, capacity, status, created_at, updated_at) VALUES (?1, ?2, 'FREE', ?3, ?3) RETURNING {TABLE_COLUMNS}"
    );
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(data.number)
        .bind(data.capacity.unwrap_or(4))
        .bind(now)
        .fetch_one(pool)
        .await?;
    Ok(table)
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: TableStatus,
) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE dining_table SET status = ?1, updated_at = ?2 WHERE id = ?3 RETURNING {TABLE_COLUMNS}"
    );
    sqlx::query_as::<_, DiningTable>(&sql)
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Move the active order of `from_id` onto the free table `to_id`.
///
/// One transaction: occupy destination, re-point the order, free the source.
pub async fn transfer(pool: &SqlitePool, from_id: i64, to_id: i64) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let occupied = sqlx::query(
        "UPDATE dining_table SET status = 'OCCUPIED', updated_at = ? WHERE id = ? AND status = 'FREE'",
    )
    .bind(now)
    .bind(to_id)
    .execute(&mut *tx)
    .await?;
    if occupied.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Destination table {to_id} must be free"
        )));
    }

    let order = super::order::find_active_by_table_conn(&mut tx, from_id)
        .await?
        .ok_or_else(|| {
            RepoError::Conflict(format!("Source table {from_id} has no active order"))
        })?;

    sqlx::query("UPDATE orders SET table_id = ?, updated_at = ? WHERE id = ?")
        .bind(to_id)
        .bind(now)
        .bind(order.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE dining_table SET status = 'FREE', updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(from_id)
        .execute(&mut *tx)
        .await?;

    let moved = super::order::find_by_id_conn(&mut tx, order.id)
        .await?
        .ok_or_else(|| RepoError::Database("Order vanished during transfer".into()))?;

    tx.commit().await?;
    Ok(moved)
}
