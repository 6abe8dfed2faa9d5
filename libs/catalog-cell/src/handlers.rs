use std::sync::Arc;

use axum::{extract::State, Json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::Service;
use crate::services::catalog::CatalogService;

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let catalog_service = CatalogService::new(&state);

    let services = catalog_service
        .list_services()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(services))
}
