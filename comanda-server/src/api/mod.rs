//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness and database ping
//! - [`shifts`] - cash shift toggle, balance and history
//! - [`tables`] - tables, status and transfer
//! - [`orders`] - comandas and line items
//! - [`kitchen`] - kitchen queue
//! - [`checkout`] - payment and table release
//! - [`categories`] - category management
//! - [`products`] - product management
//! - [`staff`] - staff management and performance
//! - [`admin`] - maintenance

pub mod convert;

pub mod health;

pub mod admin;
pub mod categories;
pub mod checkout;
pub mod kitchen;
pub mod orders;
pub mod products;
pub mod shifts;
pub mod staff;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
