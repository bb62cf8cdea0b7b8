// src/types/personal_info.rs
//! Candidate data used as the source of fill values

use serde::{Deserialize, Deserializer, Serialize};

/// Structured candidate data. Every text field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient_string")]
    pub current_company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub current_position: String,
    #[serde(deserialize_with = "lenient_string")]
    pub years_experience: String,
    #[serde(deserialize_with = "lenient_string")]
    pub education: String,
    pub skills: Vec<String>,
}

/// Accepts strings, numbers, booleans and null for a text field.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a text value, found {}",
            other
        ))),
    }
}

/// Resume data as held by the settings collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeData {
    Structured(PersonalInfoRecord),
    RawText(String),
}

impl ResumeData {
    /// Empty raw text carries no resume at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::RawText(text) if text.is_empty())
    }

    /// Text handed to the generation service as the candidate's background.
    pub fn as_prompt_text(&self) -> String {
        match self {
            Self::RawText(text) => text.clone(),
            Self::Structured(record) => {
                serde_json::to_string_pretty(record).unwrap_or_default()
            }
        }
    }
}

/// Read-only snapshot of the settings collaborator's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_fill_enabled: bool,
    pub resume_data: Option<ResumeData>,
}

impl Settings {
    /// Resume data, if any was actually provided.
    pub fn resume(&self) -> Option<&ResumeData> {
        self.resume_data.as_ref().filter(|resume| !resume.is_empty())
    }
}
