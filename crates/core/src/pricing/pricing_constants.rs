//! Fixed calendar tables for the seasonal pricing proxy.

/// Months of the winter tourism window (October through March), priced as peak.
pub const PEAK_MONTHS: [u32; 6] = [10, 11, 12, 1, 2, 3];

/// Festival windows as (month, first day, last day), closed day ranges:
/// Diwali in mid November, Holi in early March, Onam/Independence Day in
/// mid August. Peak months win when a window falls inside one.
pub const FESTIVAL_WINDOWS: [(u32, u32, u32); 3] = [(11, 10, 25), (3, 1, 15), (8, 10, 25)];

/// Months priced with the excellent-weather multiplier.
pub const EXCELLENT_WEATHER_MONTHS: [u32; 4] = [10, 11, 2, 3];

/// Monsoon months, priced with the poor-weather multiplier.
pub const POOR_WEATHER_MONTHS: [u32; 4] = [6, 7, 8, 9];

/// Occupancy ratio above which demand is considered high.
pub const HIGH_OCCUPANCY_THRESHOLD: f64 = 0.8;

/// Occupancy ratio above which demand is considered medium.
pub const MEDIUM_OCCUPANCY_THRESHOLD: f64 = 0.5;
