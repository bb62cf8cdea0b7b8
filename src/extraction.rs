// src/extraction.rs
//! Turning resume data into a structured personal-info record

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::types::{PersonalInfoRecord, ResumeData};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid");
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"(\+?1?[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
            .expect("phone pattern is valid");
    static ref JSON_BLOCK: Regex = Regex::new(r"(?s)\{.*\}").expect("json block pattern is valid");
}

/// Remote service that structures raw resume text.
#[async_trait]
pub trait RecordExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<PersonalInfoRecord>;
}

/// Local regex-only extraction: email and North-American phone, nothing else.
pub fn fallback_personal_info(text: &str) -> PersonalInfoRecord {
    PersonalInfoRecord {
        email: EMAIL_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: PHONE_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        ..Default::default()
    }
}

fn parse_json_block(reply: &str) -> Result<PersonalInfoRecord> {
    let block = JSON_BLOCK
        .find(reply)
        .context("No JSON object found in model reply")?;
    serde_json::from_str(block.as_str()).context("Failed to parse personal info JSON")
}

/// Parse a model reply into a record; unparsable replies go through the
/// regex fallback over the reply text itself.
pub fn parse_personal_info(reply: &str) -> PersonalInfoRecord {
    match parse_json_block(reply) {
        Ok(record) => record,
        Err(e) => {
            warn!("Could not parse extraction reply ({:#}), using regex fallback", e);
            fallback_personal_info(reply)
        }
    }
}

/// Record for the current resume data. Never fails: extraction failures
/// degrade to the regex fallback over the raw text.
pub async fn resolve_record(
    resume: &ResumeData,
    extractor: Option<&dyn RecordExtractor>,
) -> PersonalInfoRecord {
    let text = match resume {
        ResumeData::Structured(record) => return record.clone(),
        ResumeData::RawText(text) => text,
    };

    let Some(extractor) = extractor else {
        debug!("No extraction service configured, using regex fallback");
        return fallback_personal_info(text);
    };

    match extractor.extract(text).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Resume extraction failed: {:#}. Falling back to regex extraction", e);
            fallback_personal_info(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingExtractor;

    #[async_trait]
    impl RecordExtractor for FailingExtractor {
        async fn extract(&self, _resume_text: &str) -> Result<PersonalInfoRecord> {
            anyhow::bail!("service unavailable")
        }
    }

    struct FixedExtractor(PersonalInfoRecord);

    #[async_trait]
    impl RecordExtractor for FixedExtractor {
        async fn extract(&self, _resume_text: &str) -> Result<PersonalInfoRecord> {
            Ok(self.0.clone())
        }
    }

    const RESUME: &str =
        "Ada Lovelace\nLondon\nEmail: ada.lovelace@engines.co.uk\nPhone: +1 (555) 123-4567\nAnalyst";

    #[test]
    fn test_fallback_extracts_email_and_phone_only() {
        let record = fallback_personal_info(RESUME);
        assert_eq!(record.email, "ada.lovelace@engines.co.uk");
        assert_eq!(record.phone, "+1 (555) 123-4567");
        assert_eq!(record.first_name, "");
        assert_eq!(record.location, "");
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_fallback_on_text_without_contacts() {
        assert_eq!(fallback_personal_info("no contact here"), PersonalInfoRecord::default());
    }

    #[test]
    fn test_parse_reply_with_prose_around_json() {
        let reply = "Here you go:\n```json\n{\"firstName\": \"Ada\", \"yearsExperience\": 5}\n```";
        let record = parse_personal_info(reply);
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.years_experience, "5");
    }

    #[test]
    fn test_parse_reply_without_json_uses_fallback() {
        let record = parse_personal_info("Sorry, reach ada@x.com or tel:555.123.4567");
        assert_eq!(record.email, "ada@x.com");
        assert_eq!(record.phone, "555.123.4567");
    }

    #[tokio::test]
    async fn test_structured_data_bypasses_extractor() {
        let record = PersonalInfoRecord {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        let resolved = resolve_record(
            &ResumeData::Structured(record.clone()),
            Some(&FailingExtractor),
        )
        .await;
        assert_eq!(resolved, record);
    }

    #[tokio::test]
    async fn test_extraction_failure_falls_back() {
        let resolved =
            resolve_record(&ResumeData::RawText(RESUME.to_string()), Some(&FailingExtractor)).await;
        assert_eq!(resolved.email, "ada.lovelace@engines.co.uk");
        assert_eq!(resolved.first_name, "");
    }

    #[tokio::test]
    async fn test_extractor_result_is_used() {
        let extracted = PersonalInfoRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            ..Default::default()
        };
        let extractor = FixedExtractor(extracted.clone());
        let resolved =
            resolve_record(&ResumeData::RawText(RESUME.to_string()), Some(&extractor)).await;
        assert_eq!(resolved, extracted);
    }

    #[tokio::test]
    async fn test_no_extractor_uses_fallback() {
        let resolved = resolve_record(&ResumeData::RawText(RESUME.to_string()), None).await;
        assert_eq!(resolved.phone, "+1 (555) 123-4567");
    }
}
