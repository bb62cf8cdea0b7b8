// src/core/llm_client.rs
//! Chat-completions client for resume extraction and cover letters

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::LlmConfig;
use crate::cover_letter::CoverLetterWriter;
use crate::extraction::{parse_personal_info, RecordExtractor};
use crate::types::PersonalInfoRecord;

const COMPLETIONS_ENDPOINT: &str = "/chat/completions";

const EXTRACTION_MAX_TOKENS: u32 = 500;
const EXTRACTION_TEMPERATURE: f32 = 0.3;
const COVER_LETTER_MAX_TOKENS: u32 = 600;
const COVER_LETTER_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

pub fn extraction_prompt(resume_text: &str) -> String {
    format!(
        r#"Extract personal information from this resume and return ONLY a JSON object with these fields:
{{
  "firstName": "",
  "lastName": "",
  "email": "",
  "phone": "",
  "location": "",
  "linkedin": "",
  "currentCompany": "",
  "currentPosition": "",
  "yearsExperience": "",
  "education": "",
  "skills": []
}}

Resume:
{}"#,
        resume_text
    )
}

pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("LLM API key not configured")?;

        let url = format!("{}{}", self.base_url, COMPLETIONS_ENDPOINT);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        };

        info!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to LLM API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("LLM API error {}: {}", status, error_text);
            anyhow::bail!("LLM API returned error {}: {}", status, error_text);
        }

        let completion: ChatResponse = response
            .json()
            .await
            .context("Failed to parse LLM API response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .context("LLM API response contained no choices")
    }
}

#[async_trait]
impl RecordExtractor for LlmClient {
    async fn extract(&self, resume_text: &str) -> Result<PersonalInfoRecord> {
        let reply = self
            .complete(
                &extraction_prompt(resume_text),
                EXTRACTION_MAX_TOKENS,
                EXTRACTION_TEMPERATURE,
            )
            .await
            .context("Resume extraction request failed")?;
        Ok(parse_personal_info(&reply))
    }
}

#[async_trait]
impl CoverLetterWriter for LlmClient {
    async fn write(&self, prompt: &str) -> Result<String> {
        let letter = self
            .complete(prompt, COVER_LETTER_MAX_TOKENS, COVER_LETTER_TEMPERATURE)
            .await
            .context("Cover letter request failed")?;
        Ok(letter.trim().to_string())
    }
}
