use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tax rate applied to the discounted subtotal
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.12);

/// Service fee rate applied to the discounted subtotal
pub const DEFAULT_SERVICE_FEE_RATE: Decimal = dec!(0.05);

/// Decimal places of a currency minor unit (paise, cents)
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Maximum stay length accepted by quoting and booking
pub const MAX_STAY_NIGHTS: i64 = 365;
