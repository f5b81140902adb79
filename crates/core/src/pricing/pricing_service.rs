//! Stay pricing aggregation.
//!
//! Walks a date range night-by-night through the daily rate calculator,
//! then applies length-of-stay and early-booking discounts, taxes and the
//! service fee to produce a full breakdown.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::pricing_calculator::{daily_rate, round_to_minor_unit};
use super::pricing_model::{ChargeSchedule, PricingBreakdown, PricingPolicy};
use super::pricing_traits::PricingServiceTrait;
use crate::availability::{AvailabilityRecord, DateRange};
use crate::bookings::BookingRepositoryTrait;
use crate::constants::MAX_STAY_NIGHTS;
use crate::errors::{Error, Result};

/// Prices a full stay against a policy. Pure given its inputs, including
/// the reference date used for the early-booking lead time.
///
/// Both discounts are fractions of the raw subtotal, summed independently
/// (never compounded) and capped so they cannot exceed the subtotal.
/// Every monetary field is rounded once, half-up, to whole minor units.
pub fn price_stay(
    range: &DateRange,
    policy: &PricingPolicy,
    occupancy_ratio: f64,
    today: NaiveDate,
    overrides: &[AvailabilityRecord],
    schedule: &ChargeSchedule,
) -> Result<PricingBreakdown> {
    let nights = range.nights();
    if nights > MAX_STAY_NIGHTS {
        return Err(Error::InvalidRange(format!(
            "Stay of {} nights exceeds the maximum of {}",
            nights, MAX_STAY_NIGHTS
        )));
    }

    let price_overrides: HashMap<NaiveDate, Decimal> = overrides
        .iter()
        .filter_map(|r| r.price_override.map(|p| (r.date, p)))
        .collect();

    let mut daily_breakdown = Vec::with_capacity(nights as usize);
    let mut subtotal = Decimal::ZERO;
    for date in range.dates() {
        let mut rate = daily_rate(date, policy, occupancy_ratio);
        if let Some(price) = price_overrides.get(&date) {
            rate.adjusted_price = round_to_minor_unit(*price);
            rate.applied_factors.push("Price Override".to_string());
        }
        subtotal += rate.adjusted_price;
        daily_breakdown.push(rate);
    }

    let tiers = &policy.length_of_stay_discounts;
    let stay_fraction = if nights >= 30 {
        tiers.monthly
    } else if nights >= 7 {
        tiers.weekly
    } else {
        Decimal::ZERO
    };
    let length_of_stay_discount = round_to_minor_unit(subtotal * stay_fraction);

    let early = &policy.early_booking_discount;
    let lead_days = (range.check_in() - today).num_days();
    let early_booking_discount = if lead_days >= early.days {
        round_to_minor_unit(subtotal * early.discount)
    } else {
        Decimal::ZERO
    };
    // Combined discounts never exceed the subtotal, so the total stays >= 0.
    let early_booking_discount = early_booking_discount.min(subtotal - length_of_stay_discount);

    let discounted = subtotal - length_of_stay_discount - early_booking_discount;
    let taxes = round_to_minor_unit(discounted * schedule.tax_rate);
    let service_fee = round_to_minor_unit(discounted * schedule.service_fee_rate);
    let total = discounted + taxes + service_fee;

    Ok(PricingBreakdown {
        subtotal,
        length_of_stay_discount,
        early_booking_discount,
        taxes,
        service_fee,
        total,
        currency: policy.currency,
        daily_breakdown,
    })
}

/// Quoting service backed by the persistence store for policies and
/// per-date availability overrides.
pub struct PricingService {
    store: Arc<dyn BookingRepositoryTrait>,
    schedule: ChargeSchedule,
}

impl PricingService {
    pub fn new(store: Arc<dyn BookingRepositoryTrait>) -> Self {
        Self {
            store,
            schedule: ChargeSchedule::default(),
        }
    }

    pub fn with_schedule(store: Arc<dyn BookingRepositoryTrait>, schedule: ChargeSchedule) -> Self {
        Self { store, schedule }
    }

    /// Quote with an explicit reference date. The booking service uses this
    /// so one operation sees a single "today"; tests use it for determinism.
    pub async fn quote_at(
        &self,
        resource_id: &str,
        range: &DateRange,
        guest_count: u32,
        occupancy_ratio: f64,
        today: NaiveDate,
    ) -> Result<PricingBreakdown> {
        if guest_count == 0 {
            return Err(Error::Validation(
                "Guest count must be at least 1".to_string(),
            ));
        }
        let policy = self.store.get_pricing_policy(resource_id).await?;
        policy.validate()?;
        let overrides = self
            .store
            .find_availability_overrides(resource_id, range)
            .await?;
        debug!(
            "Quoting {} nights for resource {} ({} price override(s))",
            range.nights(),
            resource_id,
            overrides.iter().filter(|r| r.price_override.is_some()).count()
        );
        price_stay(
            range,
            &policy,
            occupancy_ratio,
            today,
            &overrides,
            &self.schedule,
        )
    }
}

#[async_trait]
impl PricingServiceTrait for PricingService {
    async fn quote(
        &self,
        resource_id: &str,
        range: &DateRange,
        guest_count: u32,
        occupancy_ratio: f64,
    ) -> Result<PricingBreakdown> {
        self.quote_at(
            resource_id,
            range,
            guest_count,
            occupancy_ratio,
            Utc::now().date_naive(),
        )
        .await
    }
}
