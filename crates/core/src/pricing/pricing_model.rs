//! Pricing domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SERVICE_FEE_RATE, DEFAULT_TAX_RATE};
use crate::errors::{Error, Result};

/// Currencies the engine quotes in. Both use two minor-unit decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }
}

/// Season multipliers; exactly one of the three applies to every date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalMultipliers {
    pub peak: Decimal,
    pub off_peak: Decimal,
    pub festival: Decimal,
}

impl Default for SeasonalMultipliers {
    fn default() -> Self {
        Self {
            peak: dec!(1.5),
            off_peak: dec!(0.8),
            festival: dec!(1.8),
        }
    }
}

/// Demand-band multipliers keyed off the caller-supplied occupancy ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyMultipliers {
    pub high: Decimal,
    pub medium: Decimal,
    pub low: Decimal,
}

impl Default for OccupancyMultipliers {
    fn default() -> Self {
        Self {
            high: dec!(1.3),
            medium: dec!(1.1),
            low: dec!(0.9),
        }
    }
}

/// Multipliers for the deterministic season-keyed weather proxy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherMultipliers {
    pub excellent: Decimal,
    pub good: Decimal,
    pub poor: Decimal,
}

impl Default for WeatherMultipliers {
    fn default() -> Self {
        Self {
            excellent: dec!(1.2),
            good: Decimal::ONE,
            poor: dec!(0.85),
        }
    }
}

/// Length-of-stay discount fractions; monthly takes precedence over weekly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthOfStayDiscounts {
    pub weekly: Decimal,
    pub monthly: Decimal,
}

impl Default for LengthOfStayDiscounts {
    fn default() -> Self {
        Self {
            weekly: dec!(0.10),
            monthly: dec!(0.25),
        }
    }
}

/// Discount for bookings made at least `days` before check-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyBookingDiscount {
    pub days: i64,
    pub discount: Decimal,
}

impl Default for EarlyBookingDiscount {
    fn default() -> Self {
        Self {
            days: 30,
            discount: dec!(0.05),
        }
    }
}

/// Immutable per-resource pricing configuration. Created and edited by an
/// external configuration collaborator; read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Nightly base price in major currency units.
    pub base_price: Decimal,
    pub currency: Currency,
    pub seasonal_multipliers: SeasonalMultipliers,
    pub weekend_multiplier: Decimal,
    pub occupancy_multipliers: OccupancyMultipliers,
    pub weather_multipliers: WeatherMultipliers,
    pub length_of_stay_discounts: LengthOfStayDiscounts,
    pub early_booking_discount: EarlyBookingDiscount,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            base_price: dec!(2500),
            currency: Currency::Inr,
            seasonal_multipliers: SeasonalMultipliers::default(),
            weekend_multiplier: dec!(1.2),
            occupancy_multipliers: OccupancyMultipliers::default(),
            weather_multipliers: WeatherMultipliers::default(),
            length_of_stay_discounts: LengthOfStayDiscounts::default(),
            early_booking_discount: EarlyBookingDiscount::default(),
        }
    }
}

impl PricingPolicy {
    /// Validates the policy invariants: base price and every multiplier
    /// strictly positive, discount fractions in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.base_price <= Decimal::ZERO {
            return Err(Error::Validation(
                "Base price must be positive".to_string(),
            ));
        }
        let multipliers = [
            self.seasonal_multipliers.peak,
            self.seasonal_multipliers.off_peak,
            self.seasonal_multipliers.festival,
            self.weekend_multiplier,
            self.occupancy_multipliers.high,
            self.occupancy_multipliers.medium,
            self.occupancy_multipliers.low,
            self.weather_multipliers.excellent,
            self.weather_multipliers.good,
            self.weather_multipliers.poor,
        ];
        if multipliers.iter().any(|m| *m <= Decimal::ZERO) {
            return Err(Error::Validation(
                "All pricing multipliers must be positive".to_string(),
            ));
        }
        let fractions = [
            self.length_of_stay_discounts.weekly,
            self.length_of_stay_discounts.monthly,
            self.early_booking_discount.discount,
        ];
        if fractions
            .iter()
            .any(|f| *f < Decimal::ZERO || *f > Decimal::ONE)
        {
            return Err(Error::Validation(
                "Discount fractions must be between 0 and 1".to_string(),
            ));
        }
        if self.early_booking_discount.days < 0 {
            return Err(Error::Validation(
                "Early booking lead time cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// One night's price. Derived, never persisted on its own - always
/// recomputed from the policy, the date and the occupancy snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRate {
    pub date: NaiveDate,
    pub base_price: Decimal,
    /// Rounded half-up to the currency minor unit.
    pub adjusted_price: Decimal,
    /// Factor labels in evaluation order: season, weekend, occupancy, weather.
    pub applied_factors: Vec<String>,
}

/// Full price breakdown for a stay.
///
/// Invariant: `total = subtotal - length_of_stay_discount
/// - early_booking_discount + taxes + service_fee` exactly, every field
/// rounded once to whole minor units, and `total >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: Decimal,
    pub length_of_stay_discount: Decimal,
    pub early_booking_discount: Decimal,
    pub taxes: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
    pub currency: Currency,
    pub daily_breakdown: Vec<DailyRate>,
}

/// Deployment-tunable tax and service fee rates. Defaults come from the
/// named constants so a deployment can override them without code change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSchedule {
    pub tax_rate: Decimal,
    pub service_fee_rate: Decimal,
}

impl Default for ChargeSchedule {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            service_fee_rate: DEFAULT_SERVICE_FEE_RATE,
        }
    }
}
