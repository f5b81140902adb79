//! Payment authority seam.
//!
//! The engine computes refund amounts; it never moves money itself.
//! Authorization and capture happen entirely outside this crate.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::pricing::Currency;

/// Contract for the external payment authority.
#[async_trait]
pub trait PaymentAuthorityTrait: Send + Sync {
    /// Instructs the authority to refund `amount` (major units) for a
    /// booking and returns its transaction id. Fire-and-forget from the
    /// engine's perspective: failures surface to the caller, the engine
    /// never retries.
    async fn request_refund(
        &self,
        booking_id: &str,
        amount: Decimal,
        currency: Currency,
    ) -> Result<String>;
}
