use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::handlers::{book_appointment, get_available, list_appointments};
use appointment_cell::models::{Appointment, AvailabilityQuery, PatientQuery};
use shared_models::error::AppError;
use shared_utils::test_utils::{JwtTestUtils, MockStoreResponses, TestConfig, TestUser};

fn auth_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn booking_body(patient: &str) -> Appointment {
    Appointment {
        patient: patient.to_string(),
        patient_name: Some("Test Patient".to_string()),
        treatment: "Teeth Cleaning".to_string(),
        date: "Jan 1".to_string(),
        slot: "9am".to_string(),
    }
}

#[tokio::test]
async fn test_list_appointments_requires_credential() {
    let config = TestConfig::default().to_arc();
    let query = Query(PatientQuery {
        patient: "patient@example.com".to_string(),
    });

    let result = list_appointments(State(config), query, HeaderMap::new()).await;

    assert!(result.is_err());
    match result.unwrap_err() {
        AppError::Auth(_) => {}
        _ => panic!("Expected Auth error"),
    }
}

#[tokio::test]
async fn test_list_appointments_rejects_invalid_token() {
    let config = TestConfig::default().to_arc();
    let user = TestUser::patient("patient@example.com");
    let token = JwtTestUtils::create_invalid_signature_token(&user);
    let query = Query(PatientQuery {
        patient: "patient@example.com".to_string(),
    });

    let result = list_appointments(State(config), query, auth_headers(&token)).await;

    assert!(result.is_err());
    match result.unwrap_err() {
        AppError::Forbidden(_) => {}
        _ => panic!("Expected Forbidden error"),
    }
}

#[tokio::test]
async fn test_list_appointments_rejects_other_patients_query() {
    let config = TestConfig::default().to_arc();
    let user = TestUser::patient("a@x.com");
    let token = JwtTestUtils::create_test_token(&user, &TestConfig::default().jwt_secret, Some(24));
    let query = Query(PatientQuery {
        patient: "b@x.com".to_string(),
    });

    let result = list_appointments(State(config), query, auth_headers(&token)).await;

    assert!(result.is_err());
    match result.unwrap_err() {
        AppError::Forbidden(_) => {}
        _ => panic!("Expected Forbidden error"),
    }
}

#[tokio::test]
async fn test_list_appointments_returns_own_bookings() {
    let mock_server = MockServer::start().await;
    let test_config = TestConfig::with_store_url(&mock_server.uri());
    let user = TestUser::patient("patient@example.com");
    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(24));

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("patient", "eq.patient@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::appointment_row(
                "patient@example.com",
                "Teeth Cleaning",
                "Jan 1",
                "9am"
            ),
        ])))
        .mount(&mock_server)
        .await;

    let query = Query(PatientQuery {
        patient: "patient@example.com".to_string(),
    });

    let result = list_appointments(State(test_config.to_arc()), query, auth_headers(&token)).await;

    assert!(result.is_ok());
    let appointments = result.unwrap().0;
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].patient, "patient@example.com");
}

#[tokio::test]
async fn test_book_appointment_success_body() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::appointment_row(
                "patient@example.com",
                "Teeth Cleaning",
                "Jan 1",
                "9am"
            ),
        ])))
        .mount(&mock_server)
        .await;

    let result = book_appointment(State(config), Json(booking_body("patient@example.com"))).await;

    assert!(result.is_ok());
    let body = result.unwrap().0;
    assert_eq!(body["success"], true);
    assert_eq!(body["appointment"]["slot"], "9am");
}

#[tokio::test]
async fn test_book_appointment_duplicate_body() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::appointment_row(
                "patient@example.com",
                "Teeth Cleaning",
                "Jan 1",
                "9am"
            ),
        ])))
        .mount(&mock_server)
        .await;

    let result = book_appointment(State(config), Json(booking_body("patient@example.com"))).await;

    assert!(result.is_ok());
    let body = result.unwrap().0;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["treatment"], "Teeth Cleaning");
}

#[tokio::test]
async fn test_get_available_defaults_to_fallback_date() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::service_row("Cleaning", &["9am", "10am"]),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("date", "eq.May 14, 2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = get_available(State(config), Query(AvailabilityQuery { date: None })).await;

    assert!(result.is_ok());
    let services = result.unwrap().0;
    assert_eq!(services[0].slots, vec!["9am", "10am"]);
}

#[tokio::test]
async fn test_get_available_with_explicit_date() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::service_row("Cleaning", &["9am", "10am"]),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("date", "eq.Jan 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::appointment_row("patient@example.com", "Cleaning", "Jan 1", "9am"),
        ])))
        .mount(&mock_server)
        .await;

    let result = get_available(
        State(config),
        Query(AvailabilityQuery {
            date: Some("Jan 1".to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
    let services = result.unwrap().0;
    assert_eq!(services[0].slots, vec!["10am"]);
}
