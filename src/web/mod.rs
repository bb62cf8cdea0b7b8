// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::commands::Collaborators;
use crate::config::AppConfig;
use crate::core::LlmClient;
use crate::types::CommandResponse;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/command", data = "<request>")]
pub async fn command(
    request: Json<CommandRequest>,
    state: &State<WebState>,
) -> Result<Json<CommandResponse>, Json<ErrorResponse>> {
    handlers::command_handler(request, state).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request JSON format",
            "Verify all required fields are present",
        ],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Request body does not describe a known command",
        "UNPROCESSABLE",
        &["Expected { page: { url, html }, settings, command: { action } }"],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        &["Try again in a few moments"],
    ))
}

pub fn build_rocket(state: WebState, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount("/api", routes![command, health, options])
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let llm = Arc::new(LlmClient::new(&config.llm)?);
    if !llm.has_api_key() {
        info!(
            "{} not set, resume extraction will use the regex fallback",
            config.llm.api_key_env
        );
    }

    let state = WebState {
        engine: config.engine.clone(),
        collaborators: Collaborators {
            extractor: llm.clone(),
            cover_letters: llm,
        },
    };

    info!("Starting job autofill API server");
    info!("Server: http://0.0.0.0:{}", config.server.port);

    let _rocket = build_rocket(state, config.server.port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;
    Ok(())
}
