//! Engine error types.
//!
//! This module defines storage-agnostic error types. Storage-specific
//! failures (locking, serialization, connectivity) are converted into
//! these variants by the storage layer.

use thiserror::Error;

use crate::bookings::BookingStatus;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the booking engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Check-out is not strictly after check-in, or the stay exceeds the
    /// configured maximum. Local validation, never retried.
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// The candidate range overlaps an active booking or a blocked date.
    /// The caller may retry the whole operation after re-reading
    /// availability; the engine never retries on its own.
    #[error("Requested dates are unavailable ({} conflicting booking(s))", conflicting_booking_ids.len())]
    Conflict { conflicting_booking_ids: Vec<String> },

    /// The booking state machine forbids the requested transition. Permanent.
    #[error("Cannot {action} a booking in status {status:?}")]
    InvalidTransition {
        status: BookingStatus,
        action: &'static str,
    },

    /// The requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The persistence store failed; surfaced as-is, no fallback to stale data.
    #[error("Persistence store unavailable: {0}")]
    StoreUnavailable(String),

    /// The payment authority rejected or failed a refund instruction.
    #[error("Payment authority error: {0}")]
    Payment(String),

    /// User-supplied data failed validation (empty ids, bad policy values).
    #[error("Input validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Whether the caller may recover by retrying the full request
    /// (the check-then-write as one unit, not just the write).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict { .. } | Error::StoreUnavailable(_))
    }
}
