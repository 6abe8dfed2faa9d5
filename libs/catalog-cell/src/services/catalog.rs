use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::Service;

pub struct CatalogService {
    store: StoreClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// List every bookable treatment type, unfiltered.
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        debug!("Fetching service catalog");

        let services: Vec<Service> = self
            .store
            .request(Method::GET, "/rest/v1/services", None)
            .await?;

        Ok(services)
    }
}
