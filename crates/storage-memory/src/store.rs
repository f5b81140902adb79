//! DashMap-backed booking store.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use log::debug;

use casita_core::availability::{AvailabilityRecord, DateRange};
use casita_core::bookings::{Booking, BookingRepositoryTrait};
use casita_core::errors::{Error, Result};
use casita_core::pricing::PricingPolicy;

/// In-memory persistence store.
///
/// Bookings are kept per resource, so the map's entry guard gives the
/// per-resource mutual exclusion the contract requires: the overlap
/// re-check and the write happen under one lock, and a second writer
/// that would violate the exclusion invariant is rejected with a
/// conflict.
#[derive(Default)]
pub struct MemoryStore {
    calendars: DashMap<String, Vec<Booking>>,
    booking_index: DashMap<String, String>,
    policies: DashMap<String, PricingPolicy>,
    overrides: DashMap<(String, NaiveDate), AvailabilityRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or replaces the pricing policy for a resource.
    pub fn put_policy(&self, resource_id: &str, policy: PricingPolicy) {
        self.policies.insert(resource_id.to_string(), policy);
    }

    /// Seeds or replaces a per-date availability override.
    pub fn put_override(&self, record: AvailabilityRecord) {
        self.overrides
            .insert((record.resource_id.clone(), record.date), record);
    }

    fn blocked_override_dates(&self, resource_id: &str, range: &DateRange) -> Vec<NaiveDate> {
        range
            .dates()
            .filter(|date| {
                self.overrides
                    .get(&(resource_id.to_string(), *date))
                    .map_or(false, |record| !record.is_available)
            })
            .collect()
    }
}

#[async_trait]
impl BookingRepositoryTrait for MemoryStore {
    async fn find_overlapping(
        &self,
        resource_id: &str,
        range: &DateRange,
        exclude_booking_id: Option<&str>,
    ) -> Result<Vec<Booking>> {
        Ok(self
            .calendars
            .get(resource_id)
            .map(|calendar| {
                calendar
                    .iter()
                    .filter(|b| {
                        b.status.is_active()
                            && b.date_range.overlaps(range)
                            && exclude_booking_id != Some(b.id.as_str())
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_availability_overrides(
        &self,
        resource_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AvailabilityRecord>> {
        Ok(range
            .dates()
            .filter_map(|date| {
                self.overrides
                    .get(&(resource_id.to_string(), date))
                    .map(|record| record.clone())
            })
            .collect())
    }

    async fn get_pricing_policy(&self, resource_id: &str) -> Result<PricingPolicy> {
        self.policies
            .get(resource_id)
            .map(|policy| policy.clone())
            .ok_or_else(|| Error::NotFound(format!("pricing policy for resource {}", resource_id)))
    }

    async fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        let resource_id = self
            .booking_index
            .get(booking_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::NotFound(format!("booking {}", booking_id)))?;
        self.calendars
            .get(&resource_id)
            .and_then(|calendar| calendar.iter().find(|b| b.id == booking_id).cloned())
            .ok_or_else(|| Error::NotFound(format!("booking {}", booking_id)))
    }

    async fn create_booking(&self, booking: Booking) -> Result<Booking> {
        // Entry guard: the overlap re-check and insert are one atomic
        // unit per resource.
        let mut calendar = self.calendars.entry(booking.resource_id.clone()).or_default();

        let conflicting: Vec<String> = calendar
            .iter()
            .filter(|b| b.status.is_active() && b.date_range.overlaps(&booking.date_range))
            .map(|b| b.id.clone())
            .collect();
        if !conflicting.is_empty() {
            debug!(
                "Write-time conflict on resource {}: {:?}",
                booking.resource_id, conflicting
            );
            return Err(Error::Conflict {
                conflicting_booking_ids: conflicting,
            });
        }

        let blocked = self.blocked_override_dates(&booking.resource_id, &booking.date_range);
        if !blocked.is_empty() {
            return Err(Error::Conflict {
                conflicting_booking_ids: Vec::new(),
            });
        }

        let mut stored = booking;
        stored.version = 1;
        self.booking_index
            .insert(stored.id.clone(), stored.resource_id.clone());
        calendar.push(stored.clone());
        Ok(stored)
    }

    async fn update_booking(&self, booking: Booking) -> Result<Booking> {
        let mut calendar = self.calendars.entry(booking.resource_id.clone()).or_default();

        let position = calendar
            .iter()
            .position(|b| b.id == booking.id)
            .ok_or_else(|| Error::NotFound(format!("booking {}", booking.id)))?;

        // Optimistic concurrency: a writer holding a stale snapshot loses.
        if calendar[position].version != booking.version {
            debug!(
                "Stale write on booking {} (stored v{}, write v{})",
                booking.id, calendar[position].version, booking.version
            );
            return Err(Error::Conflict {
                conflicting_booking_ids: vec![booking.id.clone()],
            });
        }

        if booking.status.is_active() {
            let conflicting: Vec<String> = calendar
                .iter()
                .filter(|b| {
                    b.id != booking.id
                        && b.status.is_active()
                        && b.date_range.overlaps(&booking.date_range)
                })
                .map(|b| b.id.clone())
                .collect();
            if !conflicting.is_empty() {
                return Err(Error::Conflict {
                    conflicting_booking_ids: conflicting,
                });
            }
            if booking.date_range != calendar[position].date_range {
                let blocked =
                    self.blocked_override_dates(&booking.resource_id, &booking.date_range);
                if !blocked.is_empty() {
                    return Err(Error::Conflict {
                        conflicting_booking_ids: Vec::new(),
                    });
                }
            }
        }

        let mut stored = booking;
        stored.version += 1;
        calendar[position] = stored.clone();
        Ok(stored)
    }
}
