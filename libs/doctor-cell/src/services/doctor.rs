use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

/// Doctor profiles are arbitrary documents managed only by admins, passed
/// through the store untouched.
pub struct DoctorService {
    store: StoreClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Value>> {
        let doctors: Vec<Value> = self
            .store
            .request(Method::GET, "/rest/v1/doctors", None)
            .await?;

        Ok(doctors)
    }

    pub async fn create_doctor(&self, profile: Value) -> Result<Value> {
        debug!("Creating doctor profile");

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self
            .store
            .request_with_headers(Method::POST, "/rest/v1/doctors", Some(profile), Some(headers))
            .await?;

        Ok(result.into_iter().next().unwrap_or(Value::Null))
    }

    pub async fn delete_doctor(&self, email: &str) -> Result<Vec<Value>> {
        debug!("Deleting doctor {}", email);

        let path = format!("/rest/v1/doctors?email=eq.{}", email);

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let deleted: Vec<Value> = self
            .store
            .request_with_headers(Method::DELETE, &path, None, Some(headers))
            .await?;

        Ok(deleted)
    }
}
