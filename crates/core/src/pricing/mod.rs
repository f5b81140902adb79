pub mod pricing_calculator;
pub mod pricing_constants;
pub mod pricing_model;
pub mod pricing_service;
pub mod pricing_traits;

pub use pricing_calculator::{
    daily_rate, demand_band, round_to_minor_unit, season_for, weather_for, DemandBand, Season,
    Weather,
};
pub use pricing_model::{
    ChargeSchedule, Currency, DailyRate, EarlyBookingDiscount, LengthOfStayDiscounts,
    OccupancyMultipliers, PricingBreakdown, PricingPolicy, SeasonalMultipliers,
    WeatherMultipliers,
};
pub use pricing_service::{price_stay, PricingService};
pub use pricing_traits::PricingServiceTrait;
