//! Dining Table Model (mesas)

use serde::{Deserialize, Serialize};

use super::order::OrderDetail;

/// Table occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TableStatus {
    Free,
    Occupied,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub number: i64,
    pub capacity: i64,
    pub status: TableStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub number: i64,
    pub capacity: Option<i64>,
}

/// Update table status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}

/// Move the active order of one table to a free one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableTransfer {
    pub from_table_id: i64,
    pub to_table_id: i64,
}

/// Table with its active order, for the floor view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOverview {
    #[serde(flatten)]
    pub table: DiningTable,
    pub active_order: Option<OrderDetail>,
}
