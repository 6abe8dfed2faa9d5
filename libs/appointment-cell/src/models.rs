use serde::{Deserialize, Serialize};

/// A booking for one slot of a treatment on one calendar day.
/// Dates are opaque caller-supplied strings, matched exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub patient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub treatment: String,
    pub date: String,
    pub slot: String,
}

/// Result of a booking attempt. At most one appointment may exist per
/// (treatment, date, patient) triple; a second attempt yields the
/// existing record instead of a new one.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(Appointment),
    Duplicate(Appointment),
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    pub patient: String,
}
