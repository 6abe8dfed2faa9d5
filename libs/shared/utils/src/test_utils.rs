use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;

pub struct TestConfig {
    pub jwt_secret: String,
    pub store_url: String,
    pub store_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-token-validation-must-be-long-enough".to_string(),
            store_url: "http://localhost:54321".to_string(),
            store_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(store_url: &str) -> Self {
        Self {
            store_url: store_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_service_key: self.store_key.clone(),
            access_token_secret: self.jwt_secret.clone(),
            port: 5000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub email: String,
    pub role: Option<String>,
}

impl TestUser {
    pub fn patient(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: None,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: Some("admin".to_string()),
        }
    }

    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.email,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn service_row(name: &str, slots: &[&str]) -> serde_json::Value {
        json!({
            "name": name,
            "slots": slots
        })
    }

    pub fn appointment_row(
        patient: &str,
        treatment: &str,
        date: &str,
        slot: &str,
    ) -> serde_json::Value {
        json!({
            "patient": patient,
            "patient_name": "Test Patient",
            "treatment": treatment,
            "date": date,
            "slot": slot
        })
    }

    pub fn user_row(email: &str, role: Option<&str>) -> serde_json::Value {
        json!({
            "email": email,
            "name": "Test User",
            "role": role
        })
    }

    pub fn doctor_row(email: &str) -> serde_json::Value {
        json!({
            "name": "Dr. Test",
            "email": email,
            "specialty": "Teeth Orthodontics",
            "image": "https://example.com/doctor.png"
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::validate_token;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.store_url, "http://localhost:54321");
        assert_eq!(app_config.store_service_key, "test-service-key");
        assert!(!app_config.access_token_secret.is_empty());
    }

    #[test]
    fn test_token_validates_against_secret() {
        let config = TestConfig::default();
        let user = TestUser::admin("admin@example.com");
        let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, Some(1));

        let validated = validate_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(validated.email, "admin@example.com");
        assert_eq!(validated.role, Some("admin".to_string()));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = TestConfig::default();
        let user = TestUser::patient("patient@example.com");
        let token = JwtTestUtils::create_expired_token(&user, &config.jwt_secret);

        assert!(validate_token(&token, &config.jwt_secret).is_err());
    }
}
