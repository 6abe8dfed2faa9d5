use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};

use catalog_cell::models::Service;
use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_utils::jwt::validate_token;

use crate::models::{Appointment, AvailabilityQuery, BookingOutcome, PatientQuery};
use crate::services::availability::{AvailabilityService, FALLBACK_DATE};
use crate::services::booking::BookingService;

// Bearer extraction for the one route that shares its path with a public
// method. Missing credential is 401, anything else 403.
fn authenticate(headers: &HeaderMap, config: &AppConfig) -> Result<AuthUser, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Unauthorized access".to_string()))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Forbidden("Forbidden access".to_string()))?;

    validate_token(token, &config.access_token_secret)
        .map_err(|_| AppError::Forbidden("Forbidden access".to_string()))
}

#[axum::debug_handler]
pub async fn get_available(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let date = query.date.as_deref().unwrap_or(FALLBACK_DATE);

    let availability_service = AvailabilityService::new(&state);

    let services = availability_service
        .available_slots(date)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(appointment): Json<Appointment>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let outcome = booking_service
        .book(appointment)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let body = match outcome {
        BookingOutcome::Created(created) => json!({
            "success": true,
            "appointment": created
        }),
        BookingOutcome::Duplicate(existing) => json!({
            "success": false,
            "data": existing
        }),
    };

    Ok(Json(body))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<PatientQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let user = authenticate(&headers, &state)?;

    // Patients may only read their own bookings
    if user.email != query.patient {
        return Err(AppError::Forbidden("Forbidden access".to_string()));
    }

    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .list_for_patient(&query.patient)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(appointments))
}
