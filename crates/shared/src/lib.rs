//! Shared types, errors, and configuration for Innkeep.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed IDs for type-safe entity references
//! - The injected clock
//! - Staff identity and permissions
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{Actor, Permission, StaffRole};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
