pub mod availability_model;
pub mod availability_service;
pub mod availability_traits;

pub use availability_model::{AvailabilityCheck, AvailabilityRecord, DateRange, DayAvailability};
pub use availability_service::AvailabilityService;
pub use availability_traits::AvailabilityServiceTrait;
