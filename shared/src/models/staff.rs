//! Staff Model (mozos, cocina, caja)

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StaffRole {
    Waiter,
    Cook,
    Cashier,
    Admin,
}

/// Staff member (no credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: StaffRole,
    pub photo: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub name: String,
    pub username: String,
    pub role: StaffRole,
    pub photo: Option<String>,
}

/// Update staff payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub role: Option<StaffRole>,
    pub photo: Option<String>,
    pub is_active: Option<bool>,
}

/// Waiter performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiterStats {
    pub id: i64,
    pub name: String,
    /// Closed orders served
    pub total_tables: i64,
    /// Σ subtotal of those orders
    pub total_sales: f64,
}

/// Cook performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookStats {
    pub id: i64,
    pub name: String,
    /// Items marked ready
    pub total_dishes: i64,
    /// Mean minutes from preparation start to ready
    pub avg_time_min: f64,
}

/// Staff performance report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffStats {
    pub waiters: Vec<WaiterStats>,
    pub cooks: Vec<CookStats>,
}
