//! Parish DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parish as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parish {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for updating parish settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParishUpdate {
    pub name: String,
    pub city: String,
    pub state: String,
}
