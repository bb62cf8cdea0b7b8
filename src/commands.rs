// src/commands.rs
//! Named actions and their responses

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::cover_letter::{cover_letter_prompt, insert_cover_letter, CoverLetterWriter};
use crate::dom::PageDom;
use crate::engine::{EngineEvent, PageSession};
use crate::extraction::{resolve_record, RecordExtractor};
use crate::job_info::extract_job_info;
use crate::types::{CommandResponse, Settings};

const MISSING_RESUME: &str = "Please add your resume data in the extension settings first";
const MISSING_JOB_CONTEXT: &str =
    "Please ensure both resume data and job information are available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    FillFields,
    AnalyzeFields,
    ExtractJobInfo,
    GenerateCoverLetter,
    UpdateSettings { settings: Settings },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FillFields => "fillFields",
            Self::AnalyzeFields => "analyzeFields",
            Self::ExtractJobInfo => "extractJobInfo",
            Self::GenerateCoverLetter => "generateCoverLetter",
            Self::UpdateSettings { .. } => "updateSettings",
        }
    }
}

/// Asynchronous services the commands lean on.
#[derive(Clone)]
pub struct Collaborators {
    pub extractor: Arc<dyn RecordExtractor>,
    pub cover_letters: Arc<dyn CoverLetterWriter>,
}

/// Run one command against the session's page. Always yields a response.
pub async fn execute<D: PageDom>(
    session: &mut PageSession,
    dom: &mut D,
    collaborators: &Collaborators,
    command: Command,
) -> CommandResponse {
    info!("Session {} executing {}", session.id(), command.name());

    match command {
        Command::FillFields => fill_fields(session, dom, collaborators).await,
        Command::AnalyzeFields => CommandResponse::with_data(&session.analyze_fields(dom)),
        Command::ExtractJobInfo => {
            CommandResponse::with_data(&extract_job_info(dom, session.platform()))
        }
        Command::GenerateCoverLetter => generate_cover_letter(session, dom, collaborators).await,
        Command::UpdateSettings { settings } => {
            session.dispatch(dom, EngineEvent::SettingsChanged(settings));
            CommandResponse::ok()
        }
    }
}

async fn fill_fields<D: PageDom>(
    session: &mut PageSession,
    dom: &mut D,
    collaborators: &Collaborators,
) -> CommandResponse {
    let Some(resume) = session.settings().resume().cloned() else {
        return CommandResponse::failure(MISSING_RESUME);
    };

    let record = resolve_record(&resume, Some(collaborators.extractor.as_ref())).await;
    let report = session.fill_pass(dom, &record, Instant::now());

    CommandResponse::with_data(&serde_json::json!({
        "message": report.summary(),
        "report": report,
    }))
}

async fn generate_cover_letter<D: PageDom>(
    session: &mut PageSession,
    dom: &mut D,
    collaborators: &Collaborators,
) -> CommandResponse {
    let job = extract_job_info(dom, session.platform());
    let resume = match session.settings().resume().cloned() {
        Some(resume) if !job.title.is_empty() => resume,
        _ => return CommandResponse::failure(MISSING_JOB_CONTEXT),
    };

    let prompt = cover_letter_prompt(&job, &resume.as_prompt_text());
    let letter = match collaborators.cover_letters.write(&prompt).await {
        Ok(letter) => letter,
        Err(e) => {
            error!("Error generating cover letter: {:#}", e);
            return CommandResponse::failure("Failed to generate cover letter");
        }
    };

    match insert_cover_letter(dom, session.binding(), &letter) {
        Ok(outcome) => CommandResponse::with_data(&outcome),
        Err(e) => {
            error!("Error inserting cover letter: {:#}", e);
            CommandResponse::failure("Failed to insert cover letter")
        }
    }
}
