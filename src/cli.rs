// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::commands::{execute, Collaborators, Command};
use crate::config::AppConfig;
use crate::core::LlmClient;
use crate::dom::HtmlPage;
use crate::engine::PageSession;
use crate::types::{CommandResponse, ResumeData, Settings};

#[derive(Parser)]
#[command(name = "job-autofill")]
#[command(about = "Detect and fill job application form fields")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Configuration file
    #[arg(long, global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct PageArgs {
    /// HTML snapshot of the page
    pub html: PathBuf,

    /// URL the snapshot was taken from
    #[arg(long)]
    pub url: String,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// List the form fields found on a page
    Analyze {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Fill the page's form fields from resume data
    Fill {
        #[command(flatten)]
        page: PageArgs,
        /// JSON personal-info record or raw resume text
        #[arg(long)]
        resume: PathBuf,
    },
    /// Extract the job posting details from a page
    JobInfo {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Generate a cover letter for the posting on a page
    CoverLetter {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        resume: PathBuf,
    },
    /// Start the HTTP command server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Read a resume file: a JSON record if it parses as one, raw text otherwise.
pub fn load_resume(path: &Path) -> Result<ResumeData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read resume file: {}", path.display()))?;

    Ok(match serde_json::from_str(&content) {
        Ok(record) => ResumeData::Structured(record),
        Err(_) => ResumeData::RawText(content),
    })
}

async fn run_on_page(
    config: &AppConfig,
    page: PageArgs,
    resume: Option<PathBuf>,
    command: Command,
) -> Result<CommandResponse> {
    let markup = std::fs::read_to_string(&page.html)
        .with_context(|| format!("Failed to read HTML snapshot: {}", page.html.display()))?;
    let mut dom = HtmlPage::from_url(&page.url, &markup)?;

    let settings = Settings {
        auto_fill_enabled: true,
        resume_data: resume.as_deref().map(load_resume).transpose()?,
    };

    let llm = Arc::new(LlmClient::new(&config.llm)?);
    let collaborators = Collaborators {
        extractor: llm.clone(),
        cover_letters: llm,
    };

    let mut session = PageSession::start(&dom, settings, &config.engine);
    Ok(execute(&mut session, &mut dom, &collaborators, command).await)
}

pub async fn handle_cli(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_from(&cli.config)?;

    let (page, resume, command) = match cli.command {
        CliCommand::Analyze { page } => (page, None, Command::AnalyzeFields),
        CliCommand::Fill { page, resume } => (page, Some(resume), Command::FillFields),
        CliCommand::JobInfo { page } => (page, None, Command::ExtractJobInfo),
        CliCommand::CoverLetter { page, resume } => {
            (page, Some(resume), Command::GenerateCoverLetter)
        }
        CliCommand::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            return crate::web::start_web_server(config).await;
        }
    };

    let response = run_on_page(&config, page, resume, command).await?;
    info!("Command finished (success: {})", response.success);
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to render response")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("job-autofill-{}-{}", uuid::Uuid::new_v4(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_fill_arguments() {
        let cli = Cli::try_parse_from([
            "job-autofill",
            "fill",
            "page.html",
            "--url",
            "https://careers.acme.io/apply",
            "--resume",
            "me.json",
        ])
        .unwrap();

        match cli.command {
            CliCommand::Fill { page, resume } => {
                assert_eq!(page.html, PathBuf::from("page.html"));
                assert_eq!(page.url, "https://careers.acme.io/apply");
                assert_eq!(resume, PathBuf::from("me.json"));
            }
            _ => panic!("expected fill"),
        }
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["job-autofill", "analyze", "page.html"]).is_err());
    }

    #[test]
    fn test_load_resume_detects_format() {
        let json = temp_file("record.json", r#"{"firstName":"Ada","email":"ada@x.com"}"#);
        let text = temp_file("resume.txt", "Ada Lovelace\nada@x.com");

        assert!(matches!(
            load_resume(&json).unwrap(),
            ResumeData::Structured(ref record) if record.first_name == "Ada"
        ));
        assert_eq!(
            load_resume(&text).unwrap(),
            ResumeData::RawText("Ada Lovelace\nada@x.com".to_string())
        );

        let _ = std::fs::remove_file(json);
        let _ = std::fs::remove_file(text);
    }

    #[tokio::test]
    async fn test_analyze_snapshot() {
        let html = temp_file(
            "page.html",
            r#"<form><input name="first_name"><input name="phone"></form>"#,
        );
        let page = PageArgs {
            html: html.clone(),
            url: "https://careers.acme.io/apply".to_string(),
        };

        let response = run_on_page(&AppConfig::default(), page, None, Command::AnalyzeFields)
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.data.unwrap()["fieldsFound"], 2);

        let _ = std::fs::remove_file(html);
    }
}
