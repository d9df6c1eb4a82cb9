//! Subcommand handlers.

mod checkin;
mod quotes;
mod review;
mod words;

use crate::api::ApiClient;
use crate::cli::Command;
use crate::config::ClientConfig;

pub async fn dispatch(
    command: Command,
    client: ApiClient,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    match command {
        Command::Review { mode } => review::run(client, config, mode).await,
        Command::Checkin => checkin::check_in(client).await,
        Command::Status => checkin::status(client).await,
        Command::Words(words) => words::run(&client, words).await,
        Command::Quote(args) => quotes::run(&client, args).await,
    }
}
