//! Settlement engine for Innkeep.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every operation is a synchronous transformation of an in-memory booking, room,
//! invoice or guest; persisting the result is the caller's job.
//!
//! # Modules
//!
//! - `pricing` - Line-item and room-rate tax arithmetic
//! - `room` - Room status machine and housekeeping bookkeeping
//! - `booking` - Booking lifecycle, nights and cancellation terms
//! - `invoice` - Folio line items, payments and derived settlement state
//! - `guest` - Guest statistics and loyalty tiers
//! - `numbering` - Booking and invoice number formats
//! - `stay` - Check-in/check-out composed across the entities above

pub mod booking;
pub mod guest;
pub mod invoice;
pub mod numbering;
pub mod pricing;
pub mod room;
pub mod stay;
