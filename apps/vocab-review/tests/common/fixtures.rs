//! Factory functions for mock service payloads.

use serde_json::{json, Value};

/// A due word as the service returns it, keyed by `_id`.
pub fn due_word(id: &str, word: &str, meaning: &str) -> Value {
    json!({
        "_id": id,
        "word": word,
        "phonetic": format!("/{word}/"),
        "partOfSpeech": ["n."],
        "meaning": meaning,
        "example": format!("I saw a {word} today."),
    })
}

/// Three words: apple, happy, river.
pub fn sample_batch() -> Vec<Value> {
    vec![
        due_word("w1", "apple", "苹果"),
        due_word("w2", "happy", "感到快乐"),
        due_word("w3", "river", "河流"),
    ]
}

pub fn badge(days: u32, name: &str) -> Value {
    json!({ "_id": format!("b{days}"), "days": days, "icon": "🏅", "name": name })
}

pub fn sample_quotes() -> Vec<Value> {
    vec![
        json!({ "_id": "q1", "content": "Stay hungry, stay foolish.", "author": "Steve Jobs" }),
        json!({ "_id": "q2", "content": "Practice makes perfect.", "translation": null }),
    ]
}
