use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Every doctor operation is authenticated; the admin check against the
    // stored user record happens inside each handler.
    Router::new()
        .route(
            "/doctor",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route("/doctor/{email}", delete(handlers::delete_doctor))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}
