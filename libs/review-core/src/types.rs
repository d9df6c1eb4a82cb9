//! Core types for the review engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wire::{null_as_default, RecordId};

/// A word due for review. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WordCardWire")]
pub struct WordCard {
    pub id: String,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub part_of_speech: Vec<String>,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordCardWire {
    #[serde(flatten)]
    id: RecordId,
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    part_of_speech: Vec<String>,
    meaning: String,
    #[serde(default)]
    example: Option<String>,
}

impl TryFrom<WordCardWire> for WordCard {
    type Error = String;

    fn try_from(wire: WordCardWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.require()?,
            word: wire.word,
            phonetic: wire.phonetic,
            part_of_speech: wire.part_of_speech,
            meaning: wire.meaning,
            example: wire.example,
        })
    }
}

/// How the current word is presented and answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewMode {
    /// Flip a card and self-report.
    #[default]
    #[serde(rename = "card")]
    Card,
    /// Shown the meaning, type the foreign word.
    #[serde(rename = "spell-en")]
    SpellToWord,
    /// Shown the foreign word, type the meaning.
    #[serde(rename = "spell-cn")]
    SpellToMeaning,
}

impl ReviewMode {
    pub const ALL: [ReviewMode; 3] = [Self::Card, Self::SpellToWord, Self::SpellToMeaning];

    /// Get the mode name as used on the wire and the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::SpellToWord => "spell-en",
            Self::SpellToMeaning => "spell-cn",
        }
    }

    /// Whether answers in this mode are typed and verified.
    pub fn is_spelling(&self) -> bool {
        !matches!(self, Self::Card)
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "spell-en" | "word" => Ok(Self::SpellToWord),
            "spell-cn" | "meaning" => Ok(Self::SpellToMeaning),
            other => Err(format!(
                "unknown review mode '{other}' (expected card, spell-en or spell-cn)"
            )),
        }
    }
}

/// Lifecycle of a review session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Loading,
    Active,
    Empty,
    Completed,
}

/// Transient state of the word being reviewed. Reset on advance and on
/// every mode change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemState {
    Card {
        revealed: bool,
    },
    Spelling {
        input: String,
        result_shown: bool,
        was_correct: bool,
    },
}

impl ItemState {
    /// Fresh state for the given mode.
    pub fn fresh(mode: ReviewMode) -> Self {
        if mode.is_spelling() {
            Self::Spelling {
                input: String::new(),
                result_shown: false,
                was_correct: false,
            }
        } else {
            Self::Card { revealed: false }
        }
    }
}

/// Remembered/forgotten outcome recorded for one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Remembered,
    Forgotten,
}

impl Verdict {
    pub fn from_remembered(remembered: bool) -> Self {
        if remembered {
            Self::Remembered
        } else {
            Self::Forgotten
        }
    }

    pub fn is_remembered(self) -> bool {
        matches!(self, Self::Remembered)
    }
}

/// Running tally of verdicts in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub remembered_count: u32,
    pub forgotten_count: u32,
}

impl ReviewStats {
    pub fn total(&self) -> u32 {
        self.remembered_count + self.forgotten_count
    }

    /// Share of remembered words, rounded to a whole percent. Zero when
    /// nothing has been reviewed.
    pub fn accuracy_percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.remembered_count) / f64::from(total) * 100.0).round() as u32
    }

    pub(crate) fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Remembered => self.remembered_count += 1,
            Verdict::Forgotten => self.forgotten_count += 1,
        }
    }

    pub(crate) fn unrecord(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Remembered => {
                self.remembered_count = self.remembered_count.saturating_sub(1)
            }
            Verdict::Forgotten => self.forgotten_count = self.forgotten_count.saturating_sub(1),
        }
    }
}

/// Identity of one session. A refresh always produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A streak badge granted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BadgeWire")]
pub struct Badge {
    pub id: String,
    pub days: u32,
    pub icon: String,
    pub name: String,
}

#[derive(Deserialize)]
struct BadgeWire {
    #[serde(flatten)]
    id: RecordId,
    days: u32,
    icon: String,
    name: String,
}

impl TryFrom<BadgeWire> for Badge {
    type Error = String;

    fn try_from(wire: BadgeWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.require()?,
            days: wire.days,
            icon: wire.icon,
            name: wire.name,
        })
    }
}

/// Check-in streak as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInState {
    #[serde(default)]
    pub consecutive_days: u32,
    #[serde(default, rename = "todayCheckIn", alias = "todayCheckedIn")]
    pub today_checked_in: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub badges: Vec<Badge>,
}

/// Response to a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReceipt {
    pub consecutive_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<Badge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_badge: Option<String>,
}
