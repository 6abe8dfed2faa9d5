pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::UserRecord;
pub use services::account::AccountService;
