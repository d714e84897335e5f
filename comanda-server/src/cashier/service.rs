//! Shift lifecycle service

use std::sync::Arc;

use chrono_tz::Tz;
use shared::models::{BalanceSnapshot, PageMeta, ShiftHistoryPage, ShiftToggleResult};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use super::balance::compute_balance;
use crate::db::repository::{RepoError, order, shift};
use crate::utils::time;
use crate::utils::{AppError, AppResult, ErrorCode};

pub const MSG_OPENED: &str = "Caja Abierta";
pub const MSG_CLOSED: &str = "Caja Cerrada";

/// Owns every write to the shift table.
///
/// Toggles are serialised by `lock` and each runs in one transaction, so the
/// read of the latest shift and the write that flips it cannot interleave
/// with another toggle.
#[derive(Clone, Debug)]
pub struct ShiftService {
    pool: SqlitePool,
    tz: Tz,
    lock: Arc<Mutex<()>>,
}

impl ShiftService {
    pub fn new(pool: SqlitePool, tz: Tz) -> Self {
        Self {
            pool,
            tz,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Open a shift if none is open, otherwise close the open one.
    ///
    /// Closing is refused while any order is not closed; the error carries
    /// `pendingCount`.
    pub async fn toggle(&self, opening_float: Option<f64>) -> AppResult<ShiftToggleResult> {
        let _guard = self.lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let latest = shift::find_latest(&mut tx).await?;
        let result = match latest {
            Some(current) if current.is_open() => {
                let pending = order::count_pending(&mut tx).await?;
                if pending > 0 {
                    tracing::warn!(shift_id = current.id, pending, "Shift close blocked by pending orders");
                    return Err(AppError::new(ErrorCode::ShiftCloseBlocked)
                        .with_detail("pendingCount", pending));
                }
                let closed = shift::close(&mut tx, current.id).await?;
                tracing::info!(shift_id = closed.id, "Shift closed");
                ShiftToggleResult {
                    message: MSG_CLOSED.to_string(),
                    arqueo: closed,
                }
            }
            _ => {
                let opened = shift::open(&mut tx, opening_float.unwrap_or(0.0))
                    .await
                    .map_err(|e| match e {
                        RepoError::Duplicate(_) => AppError::new(ErrorCode::ShiftAlreadyOpen),
                        other => other.into(),
                    })?;
                tracing::info!(shift_id = opened.id, opening_float = opened.opening_float, "Shift opened");
                ShiftToggleResult {
                    message: MSG_OPENED.to_string(),
                    arqueo: opened,
                }
            }
        };

        tx.commit().await.map_err(db_error)?;
        Ok(result)
    }

    /// Snapshot of the latest shift, or the zero snapshot if none exists
    pub async fn current(&self) -> AppResult<BalanceSnapshot> {
        let latest = {
            let mut conn = self.pool.acquire().await.map_err(db_error)?;
            shift::find_latest(&mut conn).await?
        };
        match latest {
            Some(s) => Ok(compute_balance(&self.pool, &s, shared::util::now_millis()).await?),
            None => Ok(BalanceSnapshot::empty()),
        }
    }

    /// Snapshot of one shift
    pub async fn by_id(&self, id: i64) -> AppResult<BalanceSnapshot> {
        let s = shift::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {id} not found")))?;
        Ok(compute_balance(&self.pool, &s, shared::util::now_millis()).await?)
    }

    /// One page of shift snapshots, newest first, optionally limited to a
    /// local calendar day (`YYYY-MM-DD`)
    pub async fn history(
        &self,
        date: Option<&str>,
        page: i64,
        limit: i64,
    ) -> AppResult<ShiftHistoryPage> {
        let range = match date {
            Some(date) => {
                let day = time::parse_date(date)?;
                Some((time::day_start_millis(day, self.tz), time::day_end_millis(day, self.tz)))
            }
            None => None,
        };

        let offset = (page - 1).checked_mul(limit).ok_or_else(|| {
            AppError::validation(format!("page {page} is out of range for limit {limit}"))
        })?;
        let total = shift::count(&self.pool, range).await?;
        let shifts = shift::find_page(&self.pool, range, limit, offset).await?;

        let now = shared::util::now_millis();
        let mut data = Vec::with_capacity(shifts.len());
        for s in &shifts {
            data.push(compute_balance(&self.pool, s, now).await?);
        }

        Ok(ShiftHistoryPage {
            data,
            meta: PageMeta {
                total,
                page,
                total_pages: shared::util::total_pages(total, limit),
            },
        })
    }
}

fn db_error(e: sqlx::Error) -> AppError {
    tracing::error!(target: "database", error = %e, "Shift transaction failed");
    AppError::database(e.to_string())
}
