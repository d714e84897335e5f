//! Staff Repository

use super::{RepoError, RepoResult};
use crate::utils::money;
use shared::models::{CookStats, StaffCreate, StaffMember, StaffRole, StaffUpdate, WaiterStats};
use sqlx::SqlitePool;

const STAFF_COLUMNS: &str = "id, name, username, role, photo, is_active, created_at, updated_at";

/// All staff, optionally only one role
pub async fn find_all(pool: &SqlitePool, role: Option<StaffRole>) -> RepoResult<Vec<StaffMember>> {
    let staff = match role {
        Some(role) => {
            let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE role = ? ORDER BY name");
            sqlx::query_as::<_, StaffMember>(&sql)
                .bind(role)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("SELECT {STAFF_COLUMNS} FROM staff ORDER BY name");
            sqlx::query_as::<_, StaffMember>(&sql).fetch_all(pool).await?
        }
    };
    Ok(staff)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StaffMember>> {
    let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = ?");
    let member = sqlx::query_as::<_, StaffMember>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(member)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<StaffMember>> {
    let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE username = ?");
    let member = sqlx::query_as::<_, StaffMember>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(member)
}

pub async fn create(pool: &SqlitePool, data: StaffCreate) -> RepoResult<StaffMember> {
    if find_by_username(pool, &data.username).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username '{}' already exists",
            data.username
        )));
    }

    let now = shared::util::now_millis();
    let sql = format!(
        "INSERT INTO staff (name, username, role, photo, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5) RETURNING {STAFF_COLUMNS}"
    );
    let member = sqlx::query_as::<_, StaffMember>(&sql)
        .bind(&data.name)
        .bind(&data.username)
        .bind(data.role)
        .bind(&data.photo)
        .bind(now)
        .fetch_one(pool)
        .await?;
    Ok(member)
}

pub async fn update(pool: &SqlitePool, id: i64, data: StaffUpdate) -> RepoResult<StaffMember> {
    if let Some(username) = &data.username
        && let Some(existing) = find_by_username(pool, username).await?
        && existing.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Username '{username}' already exists"
        )));
    }

    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE staff SET name = COALESCE(?1, name), username = COALESCE(?2, username), role = COALESCE(?3, role), photo = COALESCE(?4, photo), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7 RETURNING {STAFF_COLUMNS}"
    );
    sqlx::query_as::<_, StaffMember>(&sql)
        .bind(&data.name)
        .bind(&data.username)
        .bind(data.role)
        .bind(&data.photo)
        .bind(data.is_active)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Staff member {id} not found")))
}

/// Deactivate; orders keep their waiter reference
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE staff SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct WaiterRow {
    id: i64,
    name: String,
    total_tables: i64,
    total_sales: f64,
}

/// Closed orders and their subtotal per waiter (every waiter, zero included)
pub async fn waiter_stats(pool: &SqlitePool) -> RepoResult<Vec<WaiterStats>> {
    let rows = sqlx::query_as::<_, WaiterRow>(
        "SELECT s.id, s.name, (SELECT COUNT(*) FROM orders o WHERE o.waiter_id = s.id AND o.status = 'CLOSED') AS total_tables, COALESCE((SELECT SUM(oi.quantity * oi.unit_price) FROM order_item oi JOIN orders o ON o.id = oi.order_id WHERE o.waiter_id = s.id AND o.status = 'CLOSED'), 0.0) AS total_sales FROM staff s WHERE s.role = 'WAITER' ORDER BY total_sales DESC, s.name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| WaiterStats {
            id: r.id,
            name: r.name,
            total_tables: r.total_tables,
            total_sales: money::to_f64(money::to_decimal(r.total_sales)),
        })
        .collect())
}

#[derive(sqlx::FromRow)]
struct CookRow {
    id: i64,
    name: String,
    total_dishes: i64,
    avg_ms: Option<f64>,
}

/// Items marked ready per cook, with mean preparation minutes
pub async fn cook_stats(pool: &SqlitePool) -> RepoResult<Vec<CookStats>> {
    let rows = sqlx::query_as::<_, CookRow>(
        "SELECT s.id, s.name, (SELECT COUNT(*) FROM order_item oi WHERE oi.cook_id = s.id AND oi.ready_at IS NOT NULL) AS total_dishes, (SELECT AVG(oi.ready_at - oi.prep_started_at) FROM order_item oi WHERE oi.cook_id = s.id AND oi.ready_at IS NOT NULL AND oi.prep_started_at IS NOT NULL AND oi.ready_at > oi.prep_started_at) AS avg_ms FROM staff s WHERE s.role = 'COOK' ORDER BY total_dishes DESC, s.name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| CookStats {
            id: r.id,
            name: r.name,
            total_dishes: r.total_dishes,
            avg_time_min: r
                .avg_ms
                .map(|ms| money::to_f64(money::to_decimal(ms / 60_000.0)))
                .unwrap_or(0.0),
        })
        .collect())
}
