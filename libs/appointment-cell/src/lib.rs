pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, BookingOutcome};
pub use services::availability::AvailabilityService;
pub use services::booking::BookingService;
