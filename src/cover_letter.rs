// src/cover_letter.rs
//! Cover letter prompt and insertion into the page

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::dom::{Notification, NotificationKind, PageDom};
use crate::engine::SelectorSet;
use crate::types::{CoverLetterOutcome, JobInfo, SemanticFieldType};

/// Text generation service producing a cover letter from a prompt.
#[async_trait]
pub trait CoverLetterWriter: Send + Sync {
    async fn write(&self, prompt: &str) -> Result<String>;
}

pub fn cover_letter_prompt(job: &JobInfo, background: &str) -> String {
    format!(
        r#"Write a professional cover letter for this job application:

Job Title: {}
Company: {}
Location: {}

Job Description: {}

My Background: {}

Requirements:
- Professional but personable tone
- 3-4 paragraphs maximum
- Highlight relevant skills and experience
- Show enthusiasm for the role
- Include a clear call to action
- Keep under 300 words"#,
        job.title, job.company, job.location, job.description, background
    )
}

/// Write the letter into the first cover-letter control of the binding.
/// Only an `input` notification is sent, matching a paste.
pub fn insert_cover_letter<D: PageDom>(
    dom: &mut D,
    binding: &SelectorSet,
    letter: &str,
) -> Result<CoverLetterOutcome> {
    let target = binding
        .pattern(SemanticFieldType::CoverLetter)
        .and_then(|pattern| dom.query_all(&pattern.selector).into_iter().next());

    let Some(node) = target else {
        info!("No cover letter field found, returning letter for display");
        return Ok(CoverLetterOutcome {
            cover_letter: letter.to_string(),
            inserted: false,
        });
    };

    dom.set_value(node, letter)
        .context("Failed to write cover letter into field")?;
    dom.dispatch(node, Notification::bubbling(NotificationKind::Input))?;
    info!("Cover letter generated and inserted");

    Ok(CoverLetterOutcome {
        cover_letter: letter.to_string(),
        inserted: true,
    })
}
