//! Shared types for ComandaGo
//!
//! Wire models, the unified error system and small utilities used by the
//! server and its API clients.

pub mod error;
pub mod models;
pub mod serde_helpers;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
