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
use shared_utils::jwt::issue_token;

use crate::models::{AdminStatus, UserRecord};
use crate::services::account::AccountService;

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppConfig>>,
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<Vec<UserRecord>>, AppError> {
    let account_service = AccountService::new(&state);

    let users = account_service
        .list_users()
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn admin_status(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    let account_service = AccountService::new(&state);

    // Missing record means not admin, never an error
    let admin = account_service
        .is_admin(&email)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(AdminStatus { admin }))
}

/// Upsert the user row and hand back a fresh one-hour bearer token for it.
#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
    Json(fields): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let account_service = AccountService::new(&state);

    let role = fields["role"].as_str().map(str::to_owned);

    let result = account_service
        .upsert_user(&email, fields)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let token = issue_token(&email, role.as_deref(), &state.access_token_secret)
        .map_err(AppError::Internal)?;

    Ok(Json(json!({
        "result": result,
        "token": token
    })))
}

/// Admin-only role elevation. Authentication already ran in the
/// middleware; the admin lookup checks the stored record, not the token.
#[axum::debug_handler]
pub async fn grant_admin(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let store = StoreClient::new(&state);
    require_admin(&store, &user.email).await?;

    let account_service = AccountService::new(&state);

    let result = account_service
        .grant_admin(&email)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(result))
}
