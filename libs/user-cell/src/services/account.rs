use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::UserRecord;

pub struct AccountService {
    store: StoreClient,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let users: Vec<UserRecord> = self
            .store
            .request(Method::GET, "/rest/v1/users", None)
            .await?;

        Ok(users)
    }

    /// Whether a stored record with this email holds the admin role.
    /// No record means not admin.
    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        let record = self.store.find_user(email).await?;

        Ok(matches!(record, Some(user) if user["role"] == Value::from("admin")))
    }

    /// Upsert a user row by email, merging the caller-supplied fields.
    pub async fn upsert_user(&self, email: &str, mut fields: Value) -> Result<Value> {
        debug!("Upserting user {}", email);

        if let Some(obj) = fields.as_object_mut() {
            obj.insert("email".to_string(), json!(email));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=merge-duplicates,return=representation"),
        );

        let result: Vec<Value> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/users?on_conflict=email",
                Some(fields),
                Some(headers),
            )
            .await?;

        Ok(result.into_iter().next().unwrap_or(Value::Null))
    }

    /// Elevate a user's role to admin.
    pub async fn grant_admin(&self, email: &str) -> Result<Value> {
        debug!("Granting admin role to {}", email);

        let path = format!("/rest/v1/users?email=eq.{}", email);

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(json!({ "role": "admin" })),
                Some(headers),
            )
            .await?;

        Ok(result.into_iter().next().unwrap_or(Value::Null))
    }
}
