use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{Appointment, BookingOutcome};

pub struct BookingService {
    store: StoreClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Book an appointment. Uniqueness over (treatment, date, patient) is
    /// enforced by the store through a conditional insert, so two
    /// concurrent requests for the same triple cannot both create a row.
    /// An empty representation means the row already existed.
    pub async fn book(&self, appointment: Appointment) -> Result<BookingOutcome> {
        debug!(
            "Booking {} on {} at {} for {}",
            appointment.treatment, appointment.date, appointment.slot, appointment.patient
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=ignore-duplicates,return=representation"),
        );

        let inserted: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments?on_conflict=treatment,date,patient",
                Some(json!(appointment)),
                Some(headers),
            )
            .await?;

        if let Some(created) = inserted.into_iter().next() {
            info!(
                "Appointment created: {} on {} for {}",
                created.treatment, created.date, created.patient
            );
            return Ok(BookingOutcome::Created(created));
        }

        let existing = self
            .find_existing(&appointment)
            .await?
            .ok_or_else(|| anyhow!("Conditional insert returned no row and no duplicate"))?;

        debug!(
            "Duplicate booking for {} on {} by {}",
            existing.treatment, existing.date, existing.patient
        );
        Ok(BookingOutcome::Duplicate(existing))
    }

    /// All appointments booked by one patient.
    pub async fn list_for_patient(&self, patient: &str) -> Result<Vec<Appointment>> {
        let path = format!("/rest/v1/appointments?patient=eq.{}", patient);

        let appointments: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;

        Ok(appointments)
    }

    async fn find_existing(&self, appointment: &Appointment) -> Result<Option<Appointment>> {
        let path = format!(
            "/rest/v1/appointments?treatment=eq.{}&date=eq.{}&patient=eq.{}",
            appointment.treatment, appointment.date, appointment.patient
        );

        let matches: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;

        Ok(matches.into_iter().next())
    }
}
