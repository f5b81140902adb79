//! Availability service trait.

use async_trait::async_trait;

use super::availability_model::{AvailabilityCheck, DateRange, DayAvailability};
use crate::errors::Result;

/// The single consolidated conflict detector. Creation, reschedule and
/// admin call sites all go through this contract rather than carrying
/// their own interval test.
#[async_trait]
pub trait AvailabilityServiceTrait: Send + Sync {
    /// Decides whether `range` is free on `resource_id`, optionally
    /// excluding one booking id (reschedule self-exclusion). Blocked when
    /// an active booking overlaps or an override marks a date unavailable.
    async fn check(
        &self,
        resource_id: &str,
        range: &DateRange,
        exclude_booking_id: Option<&str>,
    ) -> Result<AvailabilityCheck>;

    /// Read-only per-date view of the calendar for the caller's rendering.
    async fn calendar(&self, resource_id: &str, range: &DateRange)
        -> Result<Vec<DayAvailability>>;
}
