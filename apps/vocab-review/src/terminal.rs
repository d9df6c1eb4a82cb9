//! Terminal presentation of a review session.
//!
//! Renders [`SessionView`] snapshots as text and turns typed lines into
//! engine calls. Lines starting with `:` are commands in every mode; other
//! lines are gestures for the current mode (flip and self-report in card
//! mode, answers in the spelling modes).

use std::future::Future;
use std::io::Write;
use std::task::Poll;
use std::time::Duration;

use review_core::{
    AnswerCheck, ItemState, Phase, ReviewEngine, ReviewError, ReviewMode, ReviewOutcome,
    ReviewService, SessionView, SubmissionResolution, WordCard,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const PROGRESS_WIDTH: usize = 20;

const HELP: &str = "\
Commands:
  :mode card|spell-en|spell-cn   switch answer mode
  :refresh                       fetch due words again and restart
  :help                          show this help
  :quit                          leave the review
Card mode:      Enter or f flips, y = remembered, n = forgot
Spelling modes: type the answer and press Enter; Enter re-sends a failed result";

/// A user action parsed from one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Flip,
    Verdict(bool),
    Answer(String),
    /// Re-send the verdict of an answer that is already checked.
    Resend,
    SwitchMode(ReviewMode),
    Refresh,
    Help,
    Quit,
    Invalid(String),
}

/// Interpret one line of input against the current view.
pub fn parse_gesture(line: &str, view: &SessionView) -> Gesture {
    let trimmed = line.trim();

    if let Some(command) = trimmed.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("q" | "quit"), _) => Gesture::Quit,
            (Some("h" | "help"), _) => Gesture::Help,
            (Some("r" | "refresh"), _) => Gesture::Refresh,
            (Some("m" | "mode"), Some(mode)) => match mode.parse() {
                Ok(mode) => Gesture::SwitchMode(mode),
                Err(e) => Gesture::Invalid(e),
            },
            (Some("m" | "mode"), None) => {
                Gesture::Invalid("usage: :mode card|spell-en|spell-cn".to_string())
            }
            _ => Gesture::Invalid(format!("unknown command ':{command}', try :help")),
        };
    }

    if view.phase != Phase::Active {
        return match trimmed {
            "q" => Gesture::Quit,
            "r" => Gesture::Refresh,
            _ => Gesture::Invalid("press r to check for words again, q to quit".to_string()),
        };
    }

    match &view.item_state {
        ItemState::Card { .. } => match trimmed.to_lowercase().as_str() {
            "" | "f" => Gesture::Flip,
            "y" | "1" => Gesture::Verdict(true),
            "n" | "2" => Gesture::Verdict(false),
            "q" => Gesture::Quit,
            _ => Gesture::Invalid("Enter/f flips, y = remembered, n = forgot".to_string()),
        },
        ItemState::Spelling {
            result_shown: true, ..
        } => Gesture::Resend,
        ItemState::Spelling { .. } if trimmed.is_empty() => {
            Gesture::Invalid("type an answer first".to_string())
        }
        ItemState::Spelling { .. } => Gesture::Answer(trimmed.to_string()),
    }
}

/// Render a full screen for the current view.
pub fn render(view: &SessionView) -> String {
    match view.phase {
        Phase::Loading => "Loading due words... (:refresh to retry)".to_string(),
        Phase::Empty => "All done! No words are due today.\n(r: check again, q: quit)".to_string(),
        Phase::Completed => render_summary(view),
        Phase::Active => {
            let mut screen = String::new();
            screen.push_str(&render_header(view));
            screen.push('\n');
            screen.push_str(&render_mode_bar(view.mode));
            screen.push_str("\n\n");
            if let Some(card) = &view.current {
                screen.push_str(&render_card(card, view.mode, &view.item_state));
            }
            if view.submitting {
                screen.push_str("\n(saving...)");
            }
            screen
        }
    }
}

fn render_header(view: &SessionView) -> String {
    let filled = (view.progress_percent as usize * PROGRESS_WIDTH) / 100;
    format!(
        "{}/{}  [{}{}]  ✓ {}  ✗ {}",
        view.current_index + 1,
        view.total,
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        view.stats.remembered_count,
        view.stats.forgotten_count,
    )
}

fn render_mode_bar(current: ReviewMode) -> String {
    ReviewMode::ALL
        .iter()
        .map(|mode| {
            let label = match mode {
                ReviewMode::Card => "flip cards",
                ReviewMode::SpellToWord => "spell the word",
                ReviewMode::SpellToMeaning => "write the meaning",
            };
            if *mode == current {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_card(card: &WordCard, mode: ReviewMode, state: &ItemState) -> String {
    let mut lines = Vec::new();
    match state {
        ItemState::Card { revealed: false } => {
            lines.push(format!("  {}", card.word));
            if let Some(phonetic) = &card.phonetic {
                lines.push(format!("  {phonetic}"));
            }
            if !card.part_of_speech.is_empty() {
                lines.push(format!("  {}", card.part_of_speech.join("  ")));
            }
            lines.push(String::new());
            lines.push("(Enter: show meaning · y: remembered · n: forgot)".to_string());
        }
        ItemState::Card { revealed: true } => {
            lines.push(format!("  {}", card.word));
            lines.push(format!("  {}", card.meaning));
            if let Some(example) = &card.example {
                lines.push(format!("  e.g. {example}"));
            }
            lines.push(String::new());
            lines.push("(y: remembered · n: forgot · Enter: flip back)".to_string());
        }
        ItemState::Spelling {
            input,
            result_shown,
            was_correct,
        } => {
            let (prompt, shown, expected) = match mode {
                ReviewMode::SpellToWord => ("Write the word for:", &card.meaning, &card.word),
                _ => ("Write the meaning of:", &card.word, &card.meaning),
            };
            lines.push(prompt.to_string());
            lines.push(format!("  {shown}"));
            if let Some(phonetic) = &card.phonetic {
                lines.push(format!("  {phonetic}"));
            }
            if *result_shown {
                lines.push(format!("  > {}", input.trim()));
                lines.push(render_result(*was_correct, expected));
                lines.push("(Enter: send result again)".to_string());
            }
        }
    }
    lines.join("\n")
}

fn render_result(correct: bool, expected: &str) -> String {
    if correct {
        "✓ Correct!".to_string()
    } else {
        format!("✗ Wrong. Correct answer: {expected}")
    }
}

/// One-line feedback for a checked answer.
pub fn render_check(check: &AnswerCheck) -> String {
    render_result(check.is_correct, &check.expected)
}

fn render_summary(view: &SessionView) -> String {
    let stats = view.stats;
    let mut summary = format!(
        "Review complete!\n  total: {}  remembered: {}  forgot: {}\n  accuracy: {}%",
        stats.total(),
        stats.remembered_count,
        stats.forgotten_count,
        stats.accuracy_percent(),
    );
    if let Some(completed_at) = view.completed_at {
        let secs = (completed_at - view.started_at).num_seconds().max(0);
        summary.push_str(&format!("\n  time: {}m {:02}s", secs / 60, secs % 60));
    }
    summary.push_str("\n(r: review again, q: quit)");
    summary
}

/// Drive a review session from `input` until the user quits or input ends.
pub async fn run_review<S, R, W>(
    engine: &ReviewEngine<S>,
    input: R,
    out: &mut W,
    feedback_delay: Duration,
) -> anyhow::Result<SessionView>
where
    S: ReviewService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(e) = engine.refresh().await {
        notice(out, &e)?;
    }
    let mut lines = input.lines();

    loop {
        let view = engine.view().await;
        writeln!(out, "\n{}", render(&view))?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_gesture(&line, &view) {
            Gesture::Quit => break,
            Gesture::Help => writeln!(out, "{HELP}")?,
            Gesture::Invalid(message) => writeln!(out, "! {message}")?,
            Gesture::Refresh => {
                if let Err(e) = engine.refresh().await {
                    notice(out, &e)?;
                }
            }
            Gesture::SwitchMode(mode) => {
                if let Err(e) = engine.set_mode(mode).await {
                    notice(out, &e)?;
                }
            }
            Gesture::Flip => {
                if let Err(e) = engine.reveal().await {
                    notice(out, &e)?;
                }
            }
            Gesture::Verdict(remembered) => {
                let result = settle(engine, out, engine.record_verdict(remembered)).await?;
                report(out, result, Duration::ZERO).await?;
            }
            Gesture::Resend => {
                if let ItemState::Spelling { was_correct, .. } = view.item_state {
                    let result = settle(engine, out, engine.record_verdict(was_correct)).await?;
                    report(out, result, Duration::ZERO).await?;
                }
            }
            Gesture::Answer(text) => {
                let result = settle(engine, out, engine.submit_answer(&text)).await?;
                report(out, result, feedback_delay).await?;
            }
        }
    }

    Ok(engine.view().await)
}

/// Await an engine call that may submit a verdict. If it does not finish on
/// the first poll, the screen is drawn again with the saving notice.
async fn settle<S, W, F>(
    engine: &ReviewEngine<S>,
    out: &mut W,
    call: F,
) -> anyhow::Result<Result<ReviewOutcome, ReviewError>>
where
    S: ReviewService,
    W: Write,
    F: Future<Output = Result<ReviewOutcome, ReviewError>>,
{
    tokio::pin!(call);
    let first = std::future::poll_fn(|cx| Poll::Ready(call.as_mut().poll(cx))).await;
    match first {
        Poll::Ready(result) => Ok(result),
        Poll::Pending => {
            let view = engine.view().await;
            if view.submitting {
                writeln!(out, "\n{}", render(&view))?;
                out.flush()?;
            }
            Ok(call.await)
        }
    }
}

async fn report<W: Write>(
    out: &mut W,
    result: Result<ReviewOutcome, ReviewError>,
    feedback_delay: Duration,
) -> anyhow::Result<()> {
    match result {
        Ok(outcome) => {
            if let Some(check) = &outcome.check {
                writeln!(out, "{}", render_check(check))?;
                out.flush()?;
                if matches!(outcome.resolution, SubmissionResolution::Advanced { .. })
                    && !feedback_delay.is_zero()
                {
                    tokio::time::sleep(feedback_delay).await;
                }
            }
            Ok(())
        }
        Err(e) => notice(out, &e),
    }
}

fn notice<W: Write>(out: &mut W, error: &ReviewError) -> anyhow::Result<()> {
    let hint = match error {
        ReviewError::FetchFailed(_) => " (:refresh to retry)",
        ReviewError::SubmissionFailed(_) => " (try again)",
        _ => "",
    };
    writeln!(out, "! {error}{hint}")?;
    Ok(())
}
