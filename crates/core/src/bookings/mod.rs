pub mod bookings_constants;
pub mod bookings_model;
pub mod bookings_service;
pub mod bookings_traits;

pub use bookings_model::{
    Booking, BookingStatus, CancellationOutcome, NewBooking, RescheduleOutcome,
};
pub use bookings_service::{refund_percentage, BookingService};
pub use bookings_traits::{BookingRepositoryTrait, BookingServiceTrait};
