//! Cash shift (arqueo) core
//!
//! - [`ShiftService`] - open/close the drawer, single writer
//! - [`balance`] - snapshot aggregation over the order ledger

pub mod balance;
mod service;

pub use balance::compute_balance;
pub use service::{MSG_CLOSED, MSG_OPENED, ShiftService};
