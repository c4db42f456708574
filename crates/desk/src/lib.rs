//! Front desk service for Innkeep.
//!
//! Wraps the settlement engine in `innkeep-core` with staff permission checks,
//! versioned persistence through `innkeep-store`, and structured logging.
//!
//! # Modules
//!
//! - `front_desk` - [`FrontDesk`] and every hotel operation it exposes
//! - `error` - [`DeskError`] and its mapping onto `AppError`

pub mod error;
pub mod front_desk;


pub use error::DeskError;
pub use front_desk::{DeskResult, FrontDesk};
