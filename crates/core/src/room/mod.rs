//! Room status machine and housekeeping bookkeeping.
//!
//! Any status may move to any other; what this module guarantees is that
//! every change goes through [`RoomService::set_status`], so the audit
//! fields are always written and a stricter graph would be a one-place change.

pub mod error;
pub mod service;
pub mod types;

pub use error::RoomError;
pub use service::RoomService;
pub use types::{
    Bed, BedKind, CreateRoomInput, Housekeeping, Room, RoomRate, RoomStatus, RoomStatusRecord,
    RoomType,
};
