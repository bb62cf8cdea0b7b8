//! Job application form detection and auto-fill.
//!
//! The engine works against the [`dom::PageDom`] capability surface: it
//! identifies the hosting platform, scans and classifies form controls,
//! resolves values from a [`types::PersonalInfoRecord`] and writes them with
//! change notifications. [`commands`] exposes it as named actions, served
//! over HTTP by [`web`] and from the command line by [`cli`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod cover_letter;
pub mod dom;
pub mod engine;
pub mod extraction;
pub mod job_info;
pub mod types;
pub mod utils;
pub mod web;

pub use commands::{execute, Collaborators, Command};
pub use config::AppConfig;
pub use dom::{HtmlPage, PageDom, PageLocation};
pub use engine::{EngineEvent, PageSession};
pub use types::{CommandResponse, PersonalInfoRecord, Settings};
