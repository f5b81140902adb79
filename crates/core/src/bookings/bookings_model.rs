//! Booking domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::availability::DateRange;
use crate::errors::{Error, Result};
use crate::pricing::PricingBreakdown;

/// Booking lifecycle states.
///
/// `PENDING -> CONFIRMED -> CHECKED_IN -> COMPLETED`, with `CANCELLED`
/// reachable from the first three. Terminal states have no exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that occupy calendar dates for conflict detection.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// The full transition table of the lifecycle state machine.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, Completed)
                | (CheckedIn, Cancelled)
        )
    }

    /// Date changes are allowed before the guest has arrived.
    pub fn allows_reschedule(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A reservation of one resource for one guest over one date range.
///
/// Mutated only through the lifecycle service; never hard-deleted -
/// cancellation is a terminal status, not a row removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub resource_id: String,
    pub guest_id: String,
    pub date_range: DateRange,
    pub guest_count: u32,
    pub status: BookingStatus,
    /// Frozen pricing snapshot; replaced wholesale on reschedule, never
    /// silently recomputed when the policy is edited later.
    pub pricing: PricingBreakdown,
    /// Opaque reference from the payment authority's authorization.
    pub payment_reference: Option<String>,
    /// Optimistic-concurrency token bumped by the store on every accepted write.
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a booking. The occupancy ratio is the
/// caller-supplied demand signal; the engine clamps but never computes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub resource_id: String,
    pub guest_id: String,
    pub date_range: DateRange,
    pub guest_count: u32,
    pub occupancy_ratio: f64,
}

impl NewBooking {
    pub fn validate(&self) -> Result<()> {
        if self.resource_id.trim().is_empty() {
            return Err(Error::Validation(
                "Resource id cannot be empty".to_string(),
            ));
        }
        if self.guest_id.trim().is_empty() {
            return Err(Error::Validation("Guest id cannot be empty".to_string()));
        }
        if self.guest_count == 0 {
            return Err(Error::Validation(
                "Guest count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a reschedule: the updated booking plus what the guest now
/// owes (positive) or is owed (negative).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleOutcome {
    pub booking: Booking,
    pub price_difference: Decimal,
}

/// Result of a cancellation. The refund amount is computed here; the
/// transfer itself is the payment authority's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationOutcome {
    pub booking: Booking,
    pub refund_amount: Decimal,
    pub refund_transaction_id: Option<String>,
}
