//! Utilities - error re-exports, logging, time, money and validation helpers

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

// Re-export error types from shared
pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
