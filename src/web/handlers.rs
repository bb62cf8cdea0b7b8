// src/web/handlers.rs
use anyhow::Result;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::commands::{execute, Collaborators};
use crate::config::EngineConfig;
use crate::dom::HtmlPage;
use crate::engine::PageSession;
use crate::types::CommandResponse;
use crate::web::types::*;

/// Build a fresh session over the snapshot and run the command on it.
async fn run_command(
    request: CommandRequest,
    engine: EngineConfig,
    collaborators: Collaborators,
) -> Result<CommandResponse> {
    let mut page = HtmlPage::from_url(&request.page.url, &request.page.html)?;
    let mut session = PageSession::start(&page, request.settings, &engine);
    Ok(execute(&mut session, &mut page, &collaborators, request.command).await)
}

pub async fn command_handler(
    request: Json<CommandRequest>,
    state: &State<WebState>,
) -> Result<Json<CommandResponse>, Json<ErrorResponse>> {
    let request = request.into_inner();
    info!(
        "Received {} command for {}",
        request.command.name(),
        request.page.url
    );

    let engine = state.engine.clone();
    let collaborators = state.collaborators.clone();
    let runtime = tokio::runtime::Handle::current();

    // The parsed page is not Send, so it lives on a blocking thread
    let outcome = tokio::task::spawn_blocking(move || {
        runtime.block_on(run_command(request, engine, collaborators))
    })
    .await;

    match outcome {
        Ok(Ok(response)) => Ok(Json(response)),
        Ok(Err(e)) => {
            error!("Rejected command request: {:#}", e);
            Err(Json(ErrorResponse::new(
                format!("{:#}", e),
                "INVALID_PAGE",
                &["Send an absolute page URL such as https://example.com/apply"],
            )))
        }
        Err(e) => {
            error!("Command task failed: {}", e);
            Err(Json(ErrorResponse::new(
                "Command execution failed",
                "INTERNAL_ERROR",
                &["Try again in a few moments"],
            )))
        }
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    info!("Health check");
    Json(HealthResponse {
        status: "OK",
        version: env!("CARGO_PKG_VERSION"),
    })
}
