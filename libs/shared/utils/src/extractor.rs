use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Authentication middleware. A missing credential is Unauthorized (401);
/// a credential that is present but malformed, forged or expired is
/// Forbidden (403).
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Unauthorized access".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Forbidden("Forbidden access".to_string()))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Forbidden("Forbidden access".to_string()))?;

    let user = validate_token(token, &config.access_token_secret)
        .map_err(|_| AppError::Forbidden("Forbidden access".to_string()))?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
