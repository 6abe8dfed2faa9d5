use serde_json::Value;
use tracing::debug;

use shared_database::store::StoreClient;
use shared_models::error::AppError;

/// Admin authorization: succeeds only when the caller has a stored user
/// record whose role equals "admin". A missing record fails closed.
pub async fn require_admin(store: &StoreClient, email: &str) -> Result<(), AppError> {
    let record = store
        .find_user(email)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    match record {
        Some(user) if user["role"] == Value::from("admin") => Ok(()),
        Some(_) => {
            debug!("User {} is not an admin", email);
            Err(AppError::Forbidden("Forbidden access".to_string()))
        }
        None => {
            debug!("No user record for {}, denying admin access", email);
            Err(AppError::Forbidden("Forbidden access".to_string()))
        }
    }
}
