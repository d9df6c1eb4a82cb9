//! Answer verification for the spelling modes.

use serde::{Deserialize, Serialize};

use crate::types::{ReviewMode, WordCard};

/// Result of checking a typed answer against a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCheck {
    /// Whether the answer is accepted. This is the verdict for the word.
    pub is_correct: bool,
    /// The typed answer after trimming (for display).
    pub typed_normalized: String,
    /// The answer the word expects in this mode (for display on a miss).
    pub expected: String,
}

/// Check a typed answer for `card` in the given mode.
///
/// Returns `None` in card mode, where the user reports the verdict directly.
pub fn verify_answer(mode: ReviewMode, card: &WordCard, typed: &str) -> Option<AnswerCheck> {
    let (is_correct, expected) = match mode {
        ReviewMode::Card => return None,
        ReviewMode::SpellToWord => (check_foreign_spelling(typed, &card.word), &card.word),
        ReviewMode::SpellToMeaning => (check_native_meaning(typed, &card.meaning), &card.meaning),
    };

    Some(AnswerCheck {
        is_correct,
        typed_normalized: typed.trim().to_string(),
        expected: expected.clone(),
    })
}

/// Exact match on the foreign word, ignoring case and surrounding whitespace.
pub fn check_foreign_spelling(typed: &str, word: &str) -> bool {
    let typed = typed.trim();
    if typed.is_empty() {
        return false;
    }
    typed.to_lowercase() == word.trim().to_lowercase()
}

/// Loose match on the native meaning.
///
/// Only surrounding whitespace is ignored; case is kept. The answer is
/// accepted when it equals the meaning or when either one contains the other,
/// so paraphrases with extra or fewer words still pass.
pub fn check_native_meaning(typed: &str, meaning: &str) -> bool {
    let typed = typed.trim();
    // The empty string is a substring of everything.
    if typed.is_empty() {
        return false;
    }
    typed == meaning || meaning.contains(typed) || typed.contains(meaning)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(word: &str, meaning: &str) -> WordCard {
        WordCard {
            id: "1".to_string(),
            word: word.to_string(),
            phonetic: None,
            part_of_speech: Vec::new(),
            meaning: meaning.to_string(),
            example: None,
        }
    }

    #[test]
    fn test_foreign_spelling_ignores_case_and_padding() {
        assert!(check_foreign_spelling(" Apple ", "apple"));
        assert!(check_foreign_spelling("APPLE", "apple"));
    }

    #[test]
    fn test_foreign_spelling_rejects_other_words() {
        assert!(!check_foreign_spelling("banana", "apple"));
        assert!(!check_foreign_spelling("appl", "apple"));
    }

    #[test]
    fn test_foreign_spelling_rejects_empty() {
        assert!(!check_foreign_spelling("", "apple"));
        assert!(!check_foreign_spelling("   ", "apple"));
    }

    #[test]
    fn test_native_meaning_requires_substring_relation() {
        assert!(!check_native_meaning("happy", "感到快乐"));
    }

    #[test]
    fn test_native_meaning_accepts_containment() {
        assert!(check_native_meaning("快乐", "感到快乐"));
        assert!(check_native_meaning("感到快乐的", "感到快乐"));
        assert!(check_native_meaning(" 感到快乐 ", "感到快乐"));
    }

    #[test]
    fn test_native_meaning_rejects_empty() {
        assert!(!check_native_meaning("", "任何"));
        assert!(!check_native_meaning("  \t", "任何"));
    }

    #[test]
    fn test_native_meaning_is_case_sensitive() {
        assert!(!check_native_meaning("Apple Inc", "apple inc"));
        assert!(check_native_meaning("apple", "apple inc"));
    }

    #[test]
    fn test_verify_answer_card_mode_has_no_check() {
        assert_eq!(verify_answer(ReviewMode::Card, &card("apple", "苹果"), "x"), None);
    }

    #[test]
    fn test_verify_answer_reports_expected() {
        let check = verify_answer(ReviewMode::SpellToWord, &card("apple", "苹果"), " aple ")
            .expect("spelling mode verifies");
        assert!(!check.is_correct);
        assert_eq!(check.typed_normalized, "aple");
        assert_eq!(check.expected, "apple");

        let check = verify_answer(ReviewMode::SpellToMeaning, &card("apple", "苹果"), "苹果")
            .expect("spelling mode verifies");
        assert!(check.is_correct);
        assert_eq!(check.expected, "苹果");
    }
}
