//! Pricing service trait.

use async_trait::async_trait;

use super::pricing_model::PricingBreakdown;
use crate::availability::DateRange;
use crate::errors::Result;

/// Read-only quoting contract exposed to the request-handling layer.
#[async_trait]
pub trait PricingServiceTrait: Send + Sync {
    /// Prices a candidate stay without touching the calendar. Deterministic
    /// for fixed inputs and a fixed "today".
    async fn quote(
        &self,
        resource_id: &str,
        range: &DateRange,
        guest_count: u32,
        occupancy_ratio: f64,
    ) -> Result<PricingBreakdown>;
}
