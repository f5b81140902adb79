//! Booking lifecycle management.
//!
//! The state machine that creates, confirms, reschedules and cancels
//! bookings. Every date-changing transition runs the conflict detector
//! before the write and the pricing aggregator before finalizing money;
//! the store's write-time rejection is surfaced as a retryable conflict.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime, Utc};
use log::{info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::bookings_constants::REFUND_TIERS;
use super::bookings_model::{
    Booking, BookingStatus, CancellationOutcome, NewBooking, RescheduleOutcome,
};
use super::bookings_traits::{BookingRepositoryTrait, BookingServiceTrait};
use crate::availability::{AvailabilityService, AvailabilityServiceTrait, DateRange};
use crate::errors::{Error, Result};
use crate::payments::PaymentAuthorityTrait;
use crate::pricing::{round_to_minor_unit, ChargeSchedule, PricingService};

/// Refund percent for a cancellation made `hours_until_check_in` whole
/// hours before the check-in instant. Non-increasing as the gap shrinks;
/// a check-in already in the past refunds nothing.
pub fn refund_percentage(hours_until_check_in: i64) -> u32 {
    REFUND_TIERS
        .iter()
        .find(|(bound, _)| hours_until_check_in >= *bound)
        .map(|(_, percent)| *percent)
        .unwrap_or(0)
}

/// Service driving the booking lifecycle state machine.
pub struct BookingService {
    store: Arc<dyn BookingRepositoryTrait>,
    payments: Arc<dyn PaymentAuthorityTrait>,
    availability: AvailabilityService,
    pricing: PricingService,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn BookingRepositoryTrait>,
        payments: Arc<dyn PaymentAuthorityTrait>,
    ) -> Self {
        Self {
            availability: AvailabilityService::new(store.clone()),
            pricing: PricingService::new(store.clone()),
            store,
            payments,
        }
    }

    /// Overrides the default tax/fee schedule for this deployment.
    pub fn with_charge_schedule(
        store: Arc<dyn BookingRepositoryTrait>,
        payments: Arc<dyn PaymentAuthorityTrait>,
        schedule: ChargeSchedule,
    ) -> Self {
        Self {
            availability: AvailabilityService::new(store.clone()),
            pricing: PricingService::with_schedule(store.clone(), schedule),
            store,
            payments,
        }
    }

    /// Create with an explicit "now"; the public method captures it once.
    pub async fn create_booking_at(
        &self,
        new_booking: NewBooking,
        now: NaiveDateTime,
    ) -> Result<Booking> {
        new_booking.validate()?;
        let range = new_booking.date_range;

        let check = self
            .availability
            .check(&new_booking.resource_id, &range, None)
            .await?;
        if !check.is_available {
            warn!(
                "Create rejected for resource {}: {} conflicting booking(s)",
                new_booking.resource_id,
                check.conflicting_booking_ids.len()
            );
            return Err(Error::Conflict {
                conflicting_booking_ids: check.conflicting_booking_ids,
            });
        }

        let pricing = self
            .pricing
            .quote_at(
                &new_booking.resource_id,
                &range,
                new_booking.guest_count,
                new_booking.occupancy_ratio,
                now.date(),
            )
            .await?;

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            resource_id: new_booking.resource_id,
            guest_id: new_booking.guest_id,
            date_range: range,
            guest_count: new_booking.guest_count,
            status: BookingStatus::Pending,
            pricing,
            payment_reference: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        // A second writer that slipped past the check is rejected by the
        // store inside the same atomic unit and surfaces as Conflict.
        let stored = self.store.create_booking(booking).await?;
        info!(
            "Created booking {} for resource {} ({} nights, total {} {})",
            stored.id,
            stored.resource_id,
            range.nights(),
            stored.pricing.total,
            stored.pricing.currency.code()
        );
        Ok(stored)
    }

    pub async fn reschedule_booking_at(
        &self,
        booking_id: &str,
        new_range: DateRange,
        occupancy_ratio: f64,
        now: NaiveDateTime,
    ) -> Result<RescheduleOutcome> {
        let booking = self.store.get_booking(booking_id).await?;
        if !booking.status.allows_reschedule() {
            return Err(Error::InvalidTransition {
                status: booking.status,
                action: "reschedule",
            });
        }

        let check = self
            .availability
            .check(&booking.resource_id, &new_range, Some(&booking.id))
            .await?;
        if !check.is_available {
            return Err(Error::Conflict {
                conflicting_booking_ids: check.conflicting_booking_ids,
            });
        }

        let new_pricing = self
            .pricing
            .quote_at(
                &booking.resource_id,
                &new_range,
                booking.guest_count,
                occupancy_ratio,
                now.date(),
            )
            .await?;
        let price_difference = new_pricing.total - booking.pricing.total;

        let mut updated = booking;
        updated.date_range = new_range;
        updated.pricing = new_pricing;
        updated.updated_at = now;

        // Conditional write on the version read above; a stale snapshot or
        // a new overlap comes back as Conflict and the caller retries whole.
        let stored = self.store.update_booking(updated).await?;
        info!(
            "Rescheduled booking {} to {}..{} (price difference {})",
            stored.id,
            new_range.check_in(),
            new_range.check_out(),
            price_difference
        );
        Ok(RescheduleOutcome {
            booking: stored,
            price_difference,
        })
    }

    pub async fn cancel_booking_at(
        &self,
        booking_id: &str,
        now: NaiveDateTime,
    ) -> Result<CancellationOutcome> {
        let booking = self.store.get_booking(booking_id).await?;
        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(Error::InvalidTransition {
                status: booking.status,
                action: "cancel",
            });
        }

        let check_in_instant = booking.date_range.check_in().and_time(NaiveTime::MIN);
        let hours_until = (check_in_instant - now).num_hours();
        let percent = refund_percentage(hours_until);
        let refund_amount =
            round_to_minor_unit(booking.pricing.total * Decimal::from(percent) / dec!(100));

        let mut updated = booking;
        updated.status = BookingStatus::Cancelled;
        updated.updated_at = now;
        let stored = self.store.update_booking(updated).await?;

        let refund_transaction_id = if refund_amount > Decimal::ZERO {
            let transaction_id = self
                .payments
                .request_refund(&stored.id, refund_amount, stored.pricing.currency)
                .await?;
            info!(
                "Cancelled booking {} with {}% refund: {} {} (tx {})",
                stored.id,
                percent,
                refund_amount,
                stored.pricing.currency.code(),
                transaction_id
            );
            Some(transaction_id)
        } else {
            info!("Cancelled booking {} inside the no-refund window", stored.id);
            None
        };

        Ok(CancellationOutcome {
            booking: stored,
            refund_amount,
            refund_transaction_id,
        })
    }

    /// Single-step status transition shared by confirm/check-in/complete.
    async fn transition(
        &self,
        booking_id: &str,
        next: BookingStatus,
        action: &'static str,
        payment_reference: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Booking> {
        let booking = self.store.get_booking(booking_id).await?;
        if !booking.status.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                status: booking.status,
                action,
            });
        }
        let mut updated = booking;
        updated.status = next;
        if let Some(reference) = payment_reference {
            updated.payment_reference = Some(reference.to_string());
        }
        updated.updated_at = now;
        let stored = self.store.update_booking(updated).await?;
        info!("Booking {} is now {:?}", stored.id, stored.status);
        Ok(stored)
    }
}

#[async_trait]
impl BookingServiceTrait for BookingService {
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking> {
        self.create_booking_at(new_booking, Utc::now().naive_utc())
            .await
    }

    async fn confirm_booking(&self, booking_id: &str, payment_reference: &str) -> Result<Booking> {
        self.transition(
            booking_id,
            BookingStatus::Confirmed,
            "confirm",
            Some(payment_reference),
            Utc::now().naive_utc(),
        )
        .await
    }

    async fn check_in_booking(&self, booking_id: &str) -> Result<Booking> {
        self.transition(
            booking_id,
            BookingStatus::CheckedIn,
            "check in",
            None,
            Utc::now().naive_utc(),
        )
        .await
    }

    async fn complete_booking(&self, booking_id: &str) -> Result<Booking> {
        self.transition(
            booking_id,
            BookingStatus::Completed,
            "complete",
            None,
            Utc::now().naive_utc(),
        )
        .await
    }

    async fn reschedule_booking(
        &self,
        booking_id: &str,
        new_range: DateRange,
        occupancy_ratio: f64,
    ) -> Result<RescheduleOutcome> {
        self.reschedule_booking_at(booking_id, new_range, occupancy_ratio, Utc::now().naive_utc())
            .await
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<CancellationOutcome> {
        self.cancel_booking_at(booking_id, Utc::now().naive_utc())
            .await
    }
}
