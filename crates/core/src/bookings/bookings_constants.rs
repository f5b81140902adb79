/// Refund tiers as (minimum whole hours before check-in, refund percent),
/// evaluated top-down; the first row whose bound is met applies. Check-in
/// is taken at midnight resource-local time, so the rows reproduce the
/// day-based tiers: 7+ days 100%, 3-6 days 50%, 1-2 days 25%, under
/// 24 hours nothing.
pub const REFUND_TIERS: [(i64, u32); 4] = [(168, 100), (72, 50), (24, 25), (0, 0)];
