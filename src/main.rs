use anyhow::Result;
use clap::Parser;
use job_autofill::cli::{handle_cli, Cli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command results, so logs go to stderr
    Registry::default()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("job_autofill=info,rocket::server=off")),
        )
        .init();

    handle_cli(Cli::parse()).await
}
