//! Terminal client for a vocabulary review service.
//!
//! Wires the review engine from `review-core` to the service's REST API
//! ([`api::ApiClient`]) and to a line-based terminal front end
//! ([`terminal`]).

pub mod api;
pub mod cli;
mod commands;
pub mod config;
pub mod terminal;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::cli::{Args, Command};
use crate::config::ClientConfig;

/// Parse arguments, set up logging and run the chosen subcommand.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // RUST_LOG wins over --verbose. Logs go to stderr so they stay out of
    // the review screen.
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
        config.validate()?;
    }
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let client = ApiClient::from_config(&config);
    let command = args.command.unwrap_or(Command::Review { mode: None });
    commands::dispatch(command, client, &config).await
}
