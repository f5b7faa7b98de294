//! Word tokenization and per-book frequency counting
//!
//! A single left-to-right scan over the cleaned text. Letters and digits
//! extend the current token; an apostrophe survives only between two
//! word characters, so contractions like `don't` stay whole while trailing
//! quotes are dropped. Tokens are lower-cased before counting.

use std::collections::HashMap;

/// Word-count mapping for exactly one book. Built once, read-only afterwards,
/// consumed by the merge into the global table.
pub type LocalFrequency = HashMap<String, u64>;

/// Count normalized word frequencies in `text`.
///
/// Character classification uses full Unicode letter/digit categories, not
/// ASCII ranges. Empty or punctuation-only input yields an empty map.
pub fn count(text: &str) -> LocalFrequency {
    let mut counts = LocalFrequency::new();
    let mut token = String::with_capacity(32);

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch.is_alphanumeric() {
            token.push(ch);
            continue;
        }

        if ch == '\'' && !token.is_empty() {
            // Internal apostrophe: only kept when a word character follows.
            if chars.peek().is_some_and(|next| next.is_alphanumeric()) {
                token.push(ch);
                continue;
            }
        }

        flush_token(&mut token, &mut counts);
    }

    flush_token(&mut token, &mut counts);
    counts
}

/// Lower-case the buffered token, count it, and clear the buffer.
///
/// The scan never starts a token on an apostrophe, so every flushed token
/// contains at least one letter or digit.
fn flush_token(token: &mut String, counts: &mut LocalFrequency) {
    if token.is_empty() {
        return;
    }

    let word = token.to_lowercase();
    token.clear();
    *counts.entry(word).or_insert(0) += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counted(text: &str) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = count(text).into_iter().collect();
        entries.sort();
        entries
    }

    #[test]
    fn counts_contractions_as_single_words() {
        let counts = count("Don't stop. Don't go!");
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["don't"], 2);
        assert_eq!(counts["stop"], 1);
        assert_eq!(counts["go"], 1);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(count("").is_empty());
    }

    #[test]
    fn punctuation_only_input_yields_empty_map() {
        assert!(count("... !!! ?? -- '' \" \t\n").is_empty());
    }

    #[test]
    fn trailing_and_standalone_apostrophes_are_dropped() {
        assert_eq!(
            counted("the dogs' bones, rock 'n' roll"),
            vec![
                ("bones".into(), 1),
                ("dogs".into(), 1),
                ("n".into(), 1),
                ("rock".into(), 1),
                ("roll".into(), 1),
                ("the".into(), 1),
            ]
        );
    }

    #[test]
    fn tokens_are_lower_cased() {
        let counts = count("The THE the tHe");
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["the"], 4);
    }

    #[test]
    fn digits_are_word_characters() {
        let counts = count("Chapter 42, verse 42.");
        assert_eq!(counts["chapter"], 1);
        assert_eq!(counts["42"], 2);
        assert_eq!(counts["verse"], 1);
    }

    #[test]
    fn unicode_letters_are_classified_by_category() {
        let counts = count("Zürich heißt Zürich; café №?");
        assert_eq!(counts["zürich"], 2);
        assert_eq!(counts["heißt"], 1);
        assert_eq!(counts["café"], 1);
    }

    #[test]
    fn every_key_contains_a_word_character() {
        let text = "it's -- the '' end' of 'days";
        for key in count(text).keys() {
            assert!(key.chars().any(char::is_alphanumeric), "bad token: {key:?}");
            assert_eq!(key, &key.to_lowercase());
        }
    }
}
