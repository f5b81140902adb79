//! Calendar interval and availability override models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Half-open stay interval: the check-in day is occupied, the check-out
/// day is free for a new arrival. Dates are resource-local calendar days;
/// there is no time-of-day semantics in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Builds a range, enforcing strict `check_in < check_out`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(Error::InvalidRange(format!(
                "Check-out {} must be after check-in {}",
                check_out, check_in
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights in the stay; always >= 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Iterates the occupied nights: [check_in, check_out).
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.check_in.iter_days().take(self.nights() as usize)
    }

    /// Whether `date` is an occupied night of this range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Half-open overlap test: `[a, b)` and `[c, d)` conflict iff
    /// `a < d && c < b`. Every call site shares this one predicate.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// Per-resource, per-date override. Absence of a record for a date means
/// "available, use policy price". Keyed (resource_id, date), unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub resource_id: String,
    pub date: NaiveDate,
    pub is_available: bool,
    pub capacity_override: Option<u32>,
    pub price_override: Option<Decimal>,
    pub note: Option<String>,
}

/// Result of a conflict check for a candidate range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheck {
    pub is_available: bool,
    pub conflicting_booking_ids: Vec<String>,
    pub blocked_dates: Vec<NaiveDate>,
}

/// One day of the per-resource calendar view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub is_available: bool,
    pub is_booked: bool,
    pub price_override: Option<Decimal>,
}
