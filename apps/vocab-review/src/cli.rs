use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use review_core::ReviewMode;

/// Daily vocabulary review in the terminal.
///
/// Flip cards or spell words due today, keep the daily check-in streak and
/// manage the word list of a vocabulary service.
#[derive(Parser, Debug)]
#[command(name = "vocab-review")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON config file (default: <config dir>/vocab-review/config.json)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the vocabulary service, overrides config and environment
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Review the words due today (default)
    Review {
        /// Mode to start in: card, spell-en or spell-cn
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<ReviewMode>,
    },
    /// Check in for today and show the streak
    Checkin,
    /// Show the streak, milestones and today's progress
    Status,
    /// Manage the word list
    #[command(subcommand)]
    Words(WordsCommand),
    /// Show a random quote, or manage the quote collection
    Quote(QuoteArgs),
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct QuoteArgs {
    /// List every quote instead of a random one
    #[arg(long)]
    pub all: bool,

    #[command(subcommand)]
    pub action: Option<QuoteCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum QuoteCommand {
    /// Add a quote
    Add {
        content: String,
        #[arg(long, default_value = "")]
        translation: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, value_name = "URL")]
        image_url: Option<String>,
    },
    /// Update fields of a quote
    Update {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, value_name = "URL")]
        image_url: Option<String>,
    },
    /// Delete a quote
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WordsCommand {
    /// List all words
    List,
    /// Add a word
    Add(WordFields),
    /// Update fields of a word
    Update {
        id: String,
        #[command(flatten)]
        fields: WordFieldUpdates,
    },
    /// Delete one or more words
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Show today's review counts
    Stats,
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct WordFields {
    pub word: String,
    pub meaning: String,
    #[arg(long)]
    pub phonetic: Option<String>,
    /// Part of speech tag, repeatable (e.g. --pos n. --pos v.)
    #[arg(long = "pos", value_name = "TAG")]
    pub part_of_speech: Vec<String>,
    #[arg(long)]
    pub example: Option<String>,
    /// Category tag, repeatable
    #[arg(long = "category", value_name = "TAG")]
    pub category: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFieldUpdates {
    #[arg(long)]
    pub word: Option<String>,
    #[arg(long)]
    pub meaning: Option<String>,
    #[arg(long)]
    pub phonetic: Option<String>,
    #[arg(long = "pos", value_name = "TAG")]
    pub part_of_speech: Vec<String>,
    #[arg(long)]
    pub example: Option<String>,
    #[arg(long = "category", value_name = "TAG")]
    pub category: Vec<String>,
}

fn parse_mode(value: &str) -> Result<ReviewMode, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let args = Args::parse_from(["vocab-review", "-v"]);
        assert!(args.verbose);
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_review_mode_flag() {
        let args = Args::parse_from(["vocab-review", "review", "--mode", "spell-cn"]);
        assert_eq!(
            args.command,
            Some(Command::Review {
                mode: Some(ReviewMode::SpellToMeaning)
            })
        );
        assert!(Args::try_parse_from(["vocab-review", "review", "--mode", "typing"]).is_err());
    }

    #[test]
    fn test_words_add() {
        let args = Args::parse_from([
            "vocab-review",
            "words",
            "add",
            "apple",
            "苹果",
            "--pos",
            "n.",
            "--api-url",
            "http://localhost:4000/api",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:4000/api"));
        let Some(Command::Words(WordsCommand::Add(fields))) = args.command else {
            panic!("expected words add");
        };
        assert_eq!(fields.word, "apple");
        assert_eq!(fields.part_of_speech, vec!["n.".to_string()]);
    }

    #[test]
    fn test_quote_forms() {
        let args = Args::parse_from(["vocab-review", "quote", "--all"]);
        assert_eq!(
            args.command,
            Some(Command::Quote(QuoteArgs {
                all: true,
                action: None
            }))
        );

        let args = Args::parse_from([
            "vocab-review",
            "quote",
            "add",
            "Carpe diem.",
            "--author",
            "Horace",
        ]);
        let Some(Command::Quote(QuoteArgs {
            action: Some(QuoteCommand::Add {
                content,
                author,
                translation,
                image_url,
            }),
            ..
        })) = args.command
        else {
            panic!("expected quote add");
        };
        assert_eq!(content, "Carpe diem.");
        assert_eq!(author, "Horace");
        assert_eq!(translation, "");
        assert_eq!(image_url, None);

        assert!(Args::try_parse_from(["vocab-review", "quote", "delete"]).is_err());
    }

    #[test]
    fn test_words_delete_needs_ids() {
        assert!(Args::try_parse_from(["vocab-review", "words", "delete"]).is_err());
        let args = Args::parse_from(["vocab-review", "words", "delete", "a", "b"]);
        assert_eq!(
            args.command,
            Some(Command::Words(WordsCommand::Delete {
                ids: vec!["a".to_string(), "b".to_string()]
            }))
        );
    }
}
