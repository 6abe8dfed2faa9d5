pub mod handlers;
pub mod router;
pub mod services;

pub use services::doctor::DoctorService;
