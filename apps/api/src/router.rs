use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use catalog_cell::router::catalog_routes;
use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use user_cell::router::user_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello from Doctor Website!" }))
        .merge(catalog_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(doctor_routes(state))
}
