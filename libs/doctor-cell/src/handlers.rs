use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::store::StoreClient;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_utils::guard::require_admin;

use crate::services::doctor::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Value>>, AppError> {
    let store = StoreClient::new(&state);
    require_admin(&store, &user.email).await?;

    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service
        .list_doctors()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Json(profile): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let store = StoreClient::new(&state);
    require_admin(&store, &user.email).await?;

    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .create_doctor(profile)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let store = StoreClient::new(&state);
    require_admin(&store, &user.email).await?;

    let doctor_service = DoctorService::new(&state);

    let deleted = doctor_service
        .delete_doctor(&email)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(json!({
        "deletedCount": deleted.len()
    })))
}
