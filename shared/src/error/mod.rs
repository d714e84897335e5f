//! Unified error system
//!
//! - [`ErrorCode`]: numeric codes grouped by domain range
//! - [`ErrorCategory`]: classification by range
//! - [`AppError`]: error with code, message and details
//! - [`ErrorBody`]: JSON body sent to clients
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Cash shift errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors
//! - 7xxx: Table errors
//! - 8xxx: Staff errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ShiftCloseBlocked).with_detail("pendingCount", 2);
//! let body = ErrorBody::from_error(&err);
//! assert_eq!(body.code, 1002);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
