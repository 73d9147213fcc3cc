//! Petition DTOs and the in-progress wizard state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted petition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Petition {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// DTO for creating a petition at the end of the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPetition {
    pub title: String,
    pub date: NaiveDate,
    pub language: String,
    pub context_id: String,
    pub content: String,
}

/// Inputs collected while the petition wizard runs. Never persisted as such.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub language: String,
    pub context_id: String,
    pub context_data: Map<String, Value>,
    pub generated_content: String,
}

impl WizardState {
    /// Display name of the liturgical context, if one was recorded.
    pub fn context_name(&self) -> Option<&str> {
        self.context_data
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
    }

    pub fn set_context_name(&mut self, name: impl Into<String>) {
        self.context_data.insert("name".to_string(), Value::String(name.into()));
    }
}

/// Read-only summary shown on the print step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetitionSummary {
    pub title: String,
    pub date: String,
    pub language: String,
    pub context: String,
    pub content_length: usize,
}

impl PetitionSummary {
    pub fn new(petition: &Petition, state: &WizardState) -> Self {
        Self {
            title: petition.title.clone(),
            date: petition.date.format("%Y-%m-%d").to_string(),
            language: state.language.clone(),
            context: state.context_name().unwrap_or("Unknown").to_string(),
            content_length: state.generated_content.chars().count(),
        }
    }
}
