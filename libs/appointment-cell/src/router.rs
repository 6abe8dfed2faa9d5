use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    // GET /appointment authenticates in the handler because the same path
    // accepts unauthenticated POSTs.
    Router::new()
        .route("/available", get(handlers::get_available))
        .route(
            "/appointment",
            post(handlers::book_appointment).get(handlers::list_appointments),
        )
        .with_state(state)
}
