//! Casita Core - pricing and availability engine for homestay bookings.
//!
//! This crate computes policy-driven nightly prices, aggregates them into
//! stay quotes, guards the reservation calendar against double-booking,
//! and runs the booking lifecycle state machine with tiered cancellation
//! refunds. It is storage-agnostic and defines traits that are implemented
//! by the `storage-memory` crate; payments go through an injected
//! `PaymentAuthorityTrait`.

pub mod availability;
pub mod bookings;
pub mod constants;
pub mod errors;
pub mod payments;
pub mod pricing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
