// src/core/mod.rs
//! Remote services behind the engine's collaborator traits

pub mod llm_client;

pub use llm_client::LlmClient;
