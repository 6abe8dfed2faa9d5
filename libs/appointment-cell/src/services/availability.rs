use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use catalog_cell::models::Service;
use catalog_cell::services::catalog::CatalogService;
use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::Appointment;

/// Compatibility default when the caller omits the date query parameter.
/// Kept from the original client contract; new callers should always pass
/// an explicit date.
pub const FALLBACK_DATE: &str = "May 14, 2022";

pub struct AvailabilityService {
    store: StoreClient,
    catalog: CatalogService,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            catalog: CatalogService::new(config),
        }
    }

    /// Compute per-service free slots for a calendar day: every template
    /// slot not taken by an appointment for that (treatment, date).
    pub async fn available_slots(&self, date: &str) -> Result<Vec<Service>> {
        debug!("Calculating availability for {}", date);

        let services = self.catalog.list_services().await?;

        let path = format!("/rest/v1/appointments?date=eq.{}", date);
        let appointments: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;

        debug!(
            "Found {} appointments across {} services on {}",
            appointments.len(),
            services.len(),
            date
        );

        Ok(filter_booked_slots(services, &appointments))
    }
}

/// Replace each service's slot template with its unbooked subset.
/// Service order and template slot order are preserved.
pub fn filter_booked_slots(services: Vec<Service>, appointments: &[Appointment]) -> Vec<Service> {
    services
        .into_iter()
        .map(|mut service| {
            let booked: Vec<&str> = appointments
                .iter()
                .filter(|appointment| appointment.treatment == service.name)
                .map(|appointment| appointment.slot.as_str())
                .collect();

            service.slots.retain(|slot| !booked.contains(&slot.as_str()));
            service
        })
        .collect()
}
