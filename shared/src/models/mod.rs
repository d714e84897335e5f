//! Data models
//!
//! Shared between comanda-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod category;
pub mod dining_table;
pub mod order;
pub mod product;
pub mod shift;
pub mod staff;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use order::*;
pub use product::*;
pub use shift::*;
pub use staff::*;
