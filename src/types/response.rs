use serde::{Deserialize, Serialize};

use super::field::{PlatformVariant, SemanticFieldType};

// ===== Command Surface =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
        }
    }

    pub fn with_data<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
            },
            Err(e) => Self::failure(format!("Failed to serialize response data: {}", e)),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(serde_json::json!({ "error": message.into() })),
        }
    }
}

// ===== Fill Pass =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledField {
    pub field_type: SemanticFieldType,
    pub element: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillReport {
    pub platform: PlatformVariant,
    pub filled: usize,
    pub skipped_no_data: usize,
    pub skipped_unclassified: usize,
    pub failed: usize,
    pub fields: Vec<FilledField>,
}

impl FillReport {
    pub fn new(platform: PlatformVariant) -> Self {
        Self {
            platform,
            filled: 0,
            skipped_no_data: 0,
            skipped_unclassified: 0,
            failed: 0,
            fields: Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        format!("Auto-filled {} fields", self.filled)
    }
}

// ===== Field Analysis =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedField {
    #[serde(rename = "type")]
    pub field_type: SemanticFieldType,
    pub element: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnalysis {
    pub platform: PlatformVariant,
    pub fields_found: usize,
    pub fields: Vec<AnalyzedField>,
}

// ===== Job Information =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub platform: PlatformVariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterOutcome {
    pub cover_letter: String,
    pub inserted: bool,
}
