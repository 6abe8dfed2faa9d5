use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn catalog_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/service", get(handlers::list_services))
        .with_state(state)
}
