use serde::{Deserialize, Serialize};

/// A bookable treatment type with its fixed daily slot template.
/// Slot order is meaningful and preserved everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub slots: Vec<String>,
}
