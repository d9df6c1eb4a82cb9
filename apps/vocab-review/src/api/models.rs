//! Wire types for the vocabulary service.

use review_core::wire::{null_as_default, RecordId};
use serde::{Deserialize, Serialize};

/// Responses come either bare or wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VerdictRequest {
    pub remembered: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchDeleteRequest<'a> {
    pub ids: &'a [String],
}

/// A word in the user's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WordEntryWire")]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub part_of_speech: Vec<String>,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub category: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordEntryWire {
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
    #[serde(default, deserialize_with = "null_as_default")]
    category: Vec<String>,
}

impl TryFrom<WordEntryWire> for WordEntry {
    type Error = String;

    fn try_from(wire: WordEntryWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.require()?,
            word: wire.word,
            phonetic: wire.phonetic,
            part_of_speech: wire.part_of_speech,
            meaning: wire.meaning,
            example: wire.example,
            category: wire.category,
        })
    }
}

/// Fields for a new word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub part_of_speech: Vec<String>,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub category: Vec<String>,
}

/// Partial update of a word; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
}

impl WordUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Today's counts from `/words/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    /// Words still due today.
    #[serde(default)]
    pub today_review: u32,
    #[serde(default)]
    pub today_reviewed: u32,
    #[serde(default)]
    pub today_added: u32,
}

impl WordStats {
    pub fn completion_percent(&self) -> u32 {
        let total = self.today_review + self.today_reviewed;
        if total == 0 {
            return 0;
        }
        (f64::from(self.today_reviewed) / f64::from(total) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "QuoteWire")]
pub struct Quote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub translation: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteWire {
    #[serde(flatten)]
    id: RecordId,
    content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    translation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    author: String,
    #[serde(default)]
    image_url: Option<String>,
}

impl From<QuoteWire> for Quote {
    fn from(wire: QuoteWire) -> Self {
        Self {
            id: wire.id.resolve(),
            content: wire.content,
            translation: wire.translation,
            author: wire.author,
            image_url: wire.image_url,
        }
    }
}

/// Fields for a new quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub content: String,
    pub translation: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial update of a quote; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuoteUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
