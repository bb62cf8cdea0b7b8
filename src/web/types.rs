// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::commands::{Collaborators, Command};
use crate::config::EngineConfig;
use crate::types::Settings;

/// Shared state handed to every route
pub struct WebState {
    pub engine: EngineConfig,
    pub collaborators: Collaborators,
}

/// Snapshot of the page a command runs against
#[derive(Debug, Clone, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct CommandRequest {
    pub page: PageSnapshot,
    #[serde(default)]
    pub settings: Settings,
    pub command: Command,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: &str, suggestions: &[&str]) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
