//! Nightly rate computation.
//!
//! A pure function of the date, the resource's pricing policy and the
//! caller-supplied occupancy signal. Factors apply in a fixed order
//! (season, weekend, occupancy, weather) and a label is recorded only
//! when the factor actually moved the price.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};

use super::pricing_constants::{
    EXCELLENT_WEATHER_MONTHS, FESTIVAL_WINDOWS, HIGH_OCCUPANCY_THRESHOLD,
    MEDIUM_OCCUPANCY_THRESHOLD, PEAK_MONTHS, POOR_WEATHER_MONTHS,
};
use super::pricing_model::{DailyRate, PricingPolicy};
use crate::constants::MINOR_UNIT_SCALE;

/// Season bucket for a calendar date. Peak wins over a festival window
/// when both cover the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Peak,
    Festival,
    OffPeak,
}

/// Weather bucket from the deterministic seasonal proxy (no live data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Excellent,
    Good,
    Poor,
}

/// Demand bucket derived from the occupancy ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandBand {
    High,
    Medium,
    Low,
}

pub fn season_for(date: NaiveDate) -> Season {
    let month = date.month();
    if PEAK_MONTHS.contains(&month) {
        return Season::Peak;
    }
    let day = date.day();
    let in_festival_window = FESTIVAL_WINDOWS
        .iter()
        .any(|&(m, first, last)| month == m && day >= first && day <= last);
    if in_festival_window {
        Season::Festival
    } else {
        Season::OffPeak
    }
}

pub fn weather_for(date: NaiveDate) -> Weather {
    let month = date.month();
    if EXCELLENT_WEATHER_MONTHS.contains(&month) {
        Weather::Excellent
    } else if POOR_WEATHER_MONTHS.contains(&month) {
        Weather::Poor
    } else {
        Weather::Good
    }
}

pub fn demand_band(occupancy_ratio: f64) -> DemandBand {
    if occupancy_ratio > HIGH_OCCUPANCY_THRESHOLD {
        DemandBand::High
    } else if occupancy_ratio > MEDIUM_OCCUPANCY_THRESHOLD {
        DemandBand::Medium
    } else {
        DemandBand::Low
    }
}

/// Rounds an amount half-up to whole currency minor units.
pub fn round_to_minor_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes one night's adjusted price and the factors that applied.
///
/// The occupancy ratio is clamped to [0, 1]. Pure function, no error paths.
pub fn daily_rate(date: NaiveDate, policy: &PricingPolicy, occupancy_ratio: f64) -> DailyRate {
    let occupancy = occupancy_ratio.clamp(0.0, 1.0);
    let mut price = policy.base_price;
    let mut applied_factors = Vec::new();

    let (multiplier, label) = match season_for(date) {
        Season::Peak => (policy.seasonal_multipliers.peak, "Peak Season"),
        Season::Festival => (policy.seasonal_multipliers.festival, "Festival Season"),
        Season::OffPeak => (policy.seasonal_multipliers.off_peak, "Off-Peak Season"),
    };
    apply_factor(&mut price, &mut applied_factors, multiplier, label);

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        apply_factor(
            &mut price,
            &mut applied_factors,
            policy.weekend_multiplier,
            "Weekend",
        );
    }

    let (multiplier, label) = match demand_band(occupancy) {
        DemandBand::High => (policy.occupancy_multipliers.high, "High Demand"),
        DemandBand::Medium => (policy.occupancy_multipliers.medium, "Moderate Demand"),
        DemandBand::Low => (policy.occupancy_multipliers.low, "Low Demand"),
    };
    apply_factor(&mut price, &mut applied_factors, multiplier, label);

    let (multiplier, label) = match weather_for(date) {
        Weather::Excellent => (policy.weather_multipliers.excellent, "Perfect Weather"),
        Weather::Good => (policy.weather_multipliers.good, "Good Weather"),
        Weather::Poor => (policy.weather_multipliers.poor, "Poor Weather"),
    };
    apply_factor(&mut price, &mut applied_factors, multiplier, label);

    DailyRate {
        date,
        base_price: policy.base_price,
        adjusted_price: round_to_minor_unit(price),
        applied_factors,
    }
}

fn apply_factor(
    price: &mut Decimal,
    applied_factors: &mut Vec<String>,
    multiplier: Decimal,
    label: &str,
) {
    if multiplier != Decimal::ONE {
        *price *= multiplier;
        applied_factors.push(label.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::super::pricing_model::{
        OccupancyMultipliers, SeasonalMultipliers, WeatherMultipliers,
    };
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_peak_months_span_winter_window() {
        assert_eq!(season_for(date(2025, 10, 1)), Season::Peak);
        assert_eq!(season_for(date(2026, 1, 15)), Season::Peak);
        assert_eq!(season_for(date(2026, 3, 31)), Season::Peak);
        assert_eq!(season_for(date(2026, 4, 1)), Season::OffPeak);
    }

    #[test]
    fn test_peak_wins_over_november_festival_window() {
        // Nov 15 is inside the Diwali window but November is a peak month.
        assert_eq!(season_for(date(2025, 11, 15)), Season::Peak);
    }

    #[test]
    fn test_august_festival_window() {
        assert_eq!(season_for(date(2025, 8, 10)), Season::Festival);
        assert_eq!(season_for(date(2025, 8, 25)), Season::Festival);
        assert_eq!(season_for(date(2025, 8, 9)), Season::OffPeak);
        assert_eq!(season_for(date(2025, 8, 26)), Season::OffPeak);
    }

    #[test]
    fn test_weather_proxy_buckets() {
        assert_eq!(weather_for(date(2025, 10, 5)), Weather::Excellent);
        assert_eq!(weather_for(date(2026, 2, 5)), Weather::Excellent);
        assert_eq!(weather_for(date(2025, 7, 5)), Weather::Poor);
        assert_eq!(weather_for(date(2025, 12, 5)), Weather::Good);
        assert_eq!(weather_for(date(2026, 5, 5)), Weather::Good);
    }

    #[test]
    fn test_demand_band_thresholds() {
        assert_eq!(demand_band(0.81), DemandBand::High);
        assert_eq!(demand_band(0.8), DemandBand::Medium);
        assert_eq!(demand_band(0.51), DemandBand::Medium);
        assert_eq!(demand_band(0.5), DemandBand::Low);
        assert_eq!(demand_band(0.0), DemandBand::Low);
    }

    #[test]
    fn test_off_peak_june_weekday_night() {
        // Tuesday June 3, 2025: off-peak, poor weather, medium occupancy.
        let policy = PricingPolicy::default();
        let rate = daily_rate(date(2025, 6, 3), &policy, 0.6);
        assert_eq!(
            rate.applied_factors,
            vec!["Off-Peak Season", "Moderate Demand", "Poor Weather"]
        );
        // 2500 * 0.8 * 1.1 * 0.85 = 1870
        assert_eq!(rate.adjusted_price, dec!(1870.00));
        assert_eq!(rate.base_price, dec!(2500));
    }

    #[test]
    fn test_weekend_label_on_saturday() {
        let policy = PricingPolicy::default();
        // Saturday June 7, 2025.
        let rate = daily_rate(date(2025, 6, 7), &policy, 0.6);
        assert!(rate.applied_factors.contains(&"Weekend".to_string()));
        // 2500 * 0.8 * 1.2 * 1.1 * 0.85 = 2244
        assert_eq!(rate.adjusted_price, dec!(2244.00));
    }

    #[test]
    fn test_unit_multiplier_leaves_no_label() {
        let policy = PricingPolicy {
            weather_multipliers: WeatherMultipliers {
                excellent: Decimal::ONE,
                good: Decimal::ONE,
                poor: Decimal::ONE,
            },
            ..Default::default()
        };
        let rate = daily_rate(date(2025, 6, 3), &policy, 0.6);
        assert!(!rate
            .applied_factors
            .iter()
            .any(|f| f.contains("Weather")));
    }

    #[test]
    fn test_rounding_is_half_up() {
        let policy = PricingPolicy {
            base_price: dec!(100.01),
            seasonal_multipliers: SeasonalMultipliers {
                peak: Decimal::ONE,
                off_peak: dec!(0.5),
                festival: Decimal::ONE,
            },
            occupancy_multipliers: OccupancyMultipliers {
                high: Decimal::ONE,
                medium: Decimal::ONE,
                low: Decimal::ONE,
            },
            weather_multipliers: WeatherMultipliers {
                excellent: Decimal::ONE,
                good: Decimal::ONE,
                poor: Decimal::ONE,
            },
            ..Default::default()
        };
        // 100.01 * 0.5 = 50.005 -> 50.01 under half-up.
        let rate = daily_rate(date(2025, 4, 1), &policy, 0.0);
        assert_eq!(rate.adjusted_price, dec!(50.01));
    }
}
