use serde::{Deserialize, Serialize};

/// Stored user record, keyed by email. `role == "admin"` gates the
/// privileged operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatus {
    pub admin: bool,
}
