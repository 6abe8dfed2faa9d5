use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin client for the document store's row API
/// (`/rest/v1/<table>?col=eq.val`, `Prefer` headers for upsert semantics).
pub struct StoreClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            service_key: config.store_service_key.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.service_key) {
            headers.insert("apikey", key);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.service_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }

        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut headers = self.get_headers();
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Store resource not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Fetch a single user row by email. Absent rows come back as `None`,
    /// never as an error.
    pub async fn find_user(&self, email: &str) -> Result<Option<Value>> {
        let path = format!("/rest/v1/users?email=eq.{}", email);

        let result: Vec<Value> = self.request(Method::GET, &path, None).await?;

        Ok(result.into_iter().next())
    }
}
