//! Shift Repository

use super::{RepoError, RepoResult};
use shared::models::Shift;
use sqlx::{SqliteConnection, SqlitePool};

const SHIFT_COLUMNS: &str =
    "id, opening_float, status, start_time, end_time, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shift>> {
    let sql = format!("SELECT {SHIFT_COLUMNS} FROM shift WHERE id = ?");
    let shift = sqlx::query_as::<_, Shift>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(shift)
}

/// Most recently created shift (by id, not by clock)
pub async fn find_latest(conn: &mut SqliteConnection) -> RepoResult<Option<Shift>> {
    let sql = format!("SELECT {SHIFT_COLUMNS} FROM shift ORDER BY id DESC LIMIT 1");
    let shift = sqlx::query_as::<_, Shift>(&sql)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(shift)
}

/// Insert a new OPEN shift starting now
pub async fn open(conn: &mut SqliteConnection, opening_float: f64) -> RepoResult<Shift> {
    if opening_float < 0.0 {
        return Err(RepoError::Validation(format!(
            "Opening float cannot be negative: {opening_float}"
        )));
    }
    let now = shared::util::now_millis();
    let sql = format!(
        "INSERT INTO shift (opening_float, status, start_time, created_at, updated_at) VALUES (?1, 'OPEN', ?2, ?2, ?2) RETURNING {SHIFT_COLUMNS}"
    );
    let shift = sqlx::query_as::<_, Shift>(&sql)
        .bind(opening_float)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;
    Ok(shift)
}

/// Close an OPEN shift, stamping the end time
pub async fn close(conn: &mut SqliteConnection, id: i64) -> RepoResult<Shift> {
    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE shift SET status = 'CLOSED', end_time = ?1, updated_at = ?1 WHERE id = ?2 AND status = 'OPEN' RETURNING {SHIFT_COLUMNS}"
    );
    sqlx::query_as::<_, Shift>(&sql)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {id} not found or already closed")))
}

/// Count shifts, optionally only those starting in `[start, end)`
pub async fn count(pool: &SqlitePool, range: Option<(i64, i64)>) -> RepoResult<i64> {
    let total: i64 = match range {
        Some((start, end)) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM shift WHERE start_time >= ? AND start_time < ?")
                .bind(start)
                .bind(end)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM shift")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(total)
}

/// One page of shifts, newest start first
pub async fn find_page(
    pool: &SqlitePool,
    range: Option<(i64, i64)>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Shift>> {
    let shifts = match range {
        Some((start, end)) => {
            let sql = format!(
                "SELECT {SHIFT_COLUMNS} FROM shift WHERE start_time >= ? AND start_time < ? ORDER BY start_time DESC, id DESC LIMIT ? OFFSET ?"
            );
            sqlx::query_as::<_, Shift>(&sql)
                .bind(start)
                .bind(end)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "SELECT {SHIFT_COLUMNS} FROM shift ORDER BY start_time DESC, id DESC LIMIT ? OFFSET ?"
            );
            sqlx::query_as::<_, Shift>(&sql)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(shifts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use shared::models::ShiftStatus;

    #[tokio::test]
    async fn test_open_close_cycle() {
        let pool = test_support::pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(find_latest(&mut conn).await.unwrap().is_none());

        let opened = open(&mut conn, 100.0).await.unwrap();
        assert_eq!(opened.status, ShiftStatus::Open);
        assert_eq!(opened.opening_float, 100.0);
        assert!(opened.end_time.is_none());

        let closed = close(&mut conn, opened.id).await.unwrap();
        assert_eq!(closed.status, ShiftStatus::Closed);
        assert!(closed.end_time.unwrap() >= closed.start_time);

        // closing twice is rejected
        assert!(matches!(
            close(&mut conn, opened.id).await,
            Err(RepoError::NotFound(_))
        ));

        let latest = find_latest(&mut conn).await.unwrap().unwrap();
        assert_eq!(latest.id, opened.id);
    }

    #[tokio::test]
    async fn test_second_open_shift_is_duplicate() {
        let pool = test_support::pool().await;
        let mut conn = pool.acquire().await.unwrap();
        open(&mut conn, 0.0).await.unwrap();
        assert!(matches!(
            open(&mut conn, 0.0).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_page_and_count_with_range() {
        let pool = test_support::pool().await;
        for start in [1_000_i64, 2_000, 3_000] {
            sqlx::query(
                "INSERT INTO shift (opening_float, status, start_time, end_time, created_at, updated_at) VALUES (0, 'CLOSED', ?1, ?1, ?1, ?1)",
            )
            .bind(start)
            .execute(&pool)
            .await
            .unwrap();
        }

        assert_eq!(count(&pool, None).await.unwrap(), 3);
        assert_eq!(count(&pool, Some((1_000, 3_000))).await.unwrap(), 2);

        let page = find_page(&pool, None, 2, 0).await.unwrap();
        let starts: Vec<i64> = page.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![3_000, 2_000]);

        let page = find_page(&pool, Some((1_000, 3_000)), 5, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].start_time, 1_000);
    }
}
