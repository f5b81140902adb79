//! Booking repository and service traits.
//!
//! The repository trait is the whole persistence-store contract: bookings,
//! availability overrides and pricing policies are all held there. It is
//! storage-agnostic; concrete implementations live in storage crates.

use async_trait::async_trait;

use super::bookings_model::{
    Booking, CancellationOutcome, NewBooking, RescheduleOutcome,
};
use crate::availability::{AvailabilityRecord, DateRange};
use crate::errors::Result;
use crate::pricing::PricingPolicy;

/// Persistence store contract.
///
/// Implementations must provide per-resource mutual exclusion for the
/// check-then-write sequences: `create_booking` and `update_booking`
/// re-verify the overlap invariant atomically and reject a second writer
/// with a conflict, which the engine surfaces as retryable.
#[async_trait]
pub trait BookingRepositoryTrait: Send + Sync {
    /// Active-status bookings on `resource_id` whose range overlaps
    /// `range`, excluding `exclude_booking_id` when given.
    async fn find_overlapping(
        &self,
        resource_id: &str,
        range: &DateRange,
        exclude_booking_id: Option<&str>,
    ) -> Result<Vec<Booking>>;

    /// Per-date override records falling inside `range`.
    async fn find_availability_overrides(
        &self,
        resource_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AvailabilityRecord>>;

    /// The resource's pricing policy.
    async fn get_pricing_policy(&self, resource_id: &str) -> Result<PricingPolicy>;

    /// Retrieves a booking by its id.
    async fn get_booking(&self, booking_id: &str) -> Result<Booking>;

    /// Atomic check-then-insert. Returns the stored booking with its
    /// initial version.
    async fn create_booking(&self, booking: Booking) -> Result<Booking>;

    /// Conditional write: fails with a conflict when the stored version
    /// differs from `booking.version`, or when the (possibly changed)
    /// range overlaps another active booking.
    async fn update_booking(&self, booking: Booking) -> Result<Booking>;
}

/// Booking lifecycle contract exposed to the request-handling layer.
#[async_trait]
pub trait BookingServiceTrait: Send + Sync {
    /// Validates, checks availability, prices and persists a new PENDING
    /// booking.
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking>;

    /// PENDING -> CONFIRMED once the caller reports a successful payment
    /// authorization. No price recomputation.
    async fn confirm_booking(&self, booking_id: &str, payment_reference: &str) -> Result<Booking>;

    /// CONFIRMED -> CHECKED_IN on arrival.
    async fn check_in_booking(&self, booking_id: &str) -> Result<Booking>;

    /// CHECKED_IN -> COMPLETED on departure.
    async fn complete_booking(&self, booking_id: &str) -> Result<Booking>;

    /// Moves a PENDING/CONFIRMED booking to a new range, replacing the
    /// pricing snapshot and reporting the price difference.
    async fn reschedule_booking(
        &self,
        booking_id: &str,
        new_range: DateRange,
        occupancy_ratio: f64,
    ) -> Result<RescheduleOutcome>;

    /// Cancels an active booking and emits a tiered refund instruction.
    async fn cancel_booking(&self, booking_id: &str) -> Result<CancellationOutcome>;
}
