use review_core::{
    achieved_milestones, next_milestone, CheckInOutcome, CheckInState, CheckInTracker,
    DEFAULT_MILESTONES,
};

use crate::api::{ApiClient, Quote, WordStats};

pub async fn check_in(client: ApiClient) -> anyhow::Result<()> {
    let tracker = CheckInTracker::new(client);
    tracker.load().await?;

    match tracker.check_in().await? {
        CheckInOutcome::AlreadyCheckedIn => println!("Already checked in today."),
        CheckInOutcome::InFlight => println!("A check-in is already in progress."),
        CheckInOutcome::CheckedIn {
            consecutive_days,
            new_badge,
        } => {
            println!("Checked in! {consecutive_days} day(s) in a row.");
            if let Some(badge) = new_badge {
                println!("New badge unlocked: {badge}");
            }
        }
    }

    println!("{}", render_streak(&tracker.state().await));
    Ok(())
}

pub async fn status(client: ApiClient) -> anyhow::Result<()> {
    let tracker = CheckInTracker::new(client);
    let state = tracker.load().await?;
    let client = tracker.service();

    // Stats and quote are optional on the dashboard.
    let (stats, quote) = tokio::join!(client.word_stats(), client.random_quote());
    let stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load word stats");
            None
        }
    };
    let quote = match quote {
        Ok(quote) => Some(quote),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load quote");
            None
        }
    };

    println!("{}", render_dashboard(&state, stats.as_ref(), quote.as_ref()));
    Ok(())
}

fn render_streak(state: &CheckInState) -> String {
    let mut lines = vec![format!(
        "Streak: {} day(s){}",
        state.consecutive_days,
        if state.today_checked_in {
            "  (checked in today)"
        } else {
            "  (not checked in yet)"
        }
    )];

    let achieved = achieved_milestones(state.consecutive_days, &DEFAULT_MILESTONES);
    if !achieved.is_empty() {
        let icons: Vec<String> = achieved
            .iter()
            .map(|m| format!("{} {}", m.icon, m.name))
            .collect();
        lines.push(format!("Milestones: {}", icons.join(", ")));
    }
    if let Some((milestone, remaining)) =
        next_milestone(state.consecutive_days, &DEFAULT_MILESTONES)
    {
        lines.push(format!(
            "Next: {} {} in {remaining} day(s)",
            milestone.icon, milestone.name
        ));
    }
    for badge in &state.badges {
        lines.push(format!("Badge: {} {} ({} days)", badge.icon, badge.name, badge.days));
    }
    lines.join("\n")
}

fn render_dashboard(
    state: &CheckInState,
    stats: Option<&WordStats>,
    quote: Option<&Quote>,
) -> String {
    let mut sections = vec![render_streak(state)];

    if let Some(stats) = stats {
        sections.push(format!(
            "Today: {} to review, {} reviewed, {} added ({}% done)",
            stats.today_review,
            stats.today_reviewed,
            stats.today_added,
            stats.completion_percent()
        ));
    }
    if let Some(quote) = quote {
        let mut text = format!("\"{}\"", quote.content);
        if !quote.translation.is_empty() {
            text.push_str(&format!("\n{}", quote.translation));
        }
        if !quote.author.is_empty() {
            text.push_str(&format!("\n  - {}", quote.author));
        }
        sections.push(text);
    }
    sections.join("\n\n")
}
