use review_core::{Phase, ReviewEngine, ReviewMode};
use tokio::io::BufReader;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::terminal;

pub async fn run(
    client: ApiClient,
    config: &ClientConfig,
    mode: Option<ReviewMode>,
) -> anyhow::Result<()> {
    let mode = mode.unwrap_or(config.default_mode);
    tracing::debug!(%mode, api_url = %client.base_url(), "Starting review");

    let engine = ReviewEngine::with_mode(client, mode);
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    let view = terminal::run_review(&engine, input, &mut out, config.feedback_delay()).await?;

    tracing::info!(
        phase = ?view.phase,
        remembered = view.stats.remembered_count,
        forgotten = view.stats.forgotten_count,
        "Review finished"
    );
    if view.phase == Phase::Completed {
        println!("\nRun `vocab-review checkin` to keep your streak going.");
    }
    Ok(())
}
