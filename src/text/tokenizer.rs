// Tokenizer: raw post text to normalized terms.
//
// Lowercase, replace anything outside [a-z0-9] and whitespace with a space,
// split on whitespace, then drop short tokens and stopwords. Order and
// duplicates are preserved; callers that need sets collect them themselves.

use std::collections::HashSet;

use super::stopwords::is_stopword;

/// Tokens of this length or shorter are dropped.
const MAX_DROPPED_LEN: usize = 2;

/// Normalize text into a sequence of meaningful terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|token| token.len() > MAX_DROPPED_LEN && !is_stopword(token))
        .map(str::to_string)
        .collect()
}

/// Tokenize optional text; `None` yields no tokens.
pub fn tokenize_opt(text: Option<&str>) -> Vec<String> {
    text.map(tokenize).unwrap_or_default()
}

/// Distinct tokens of a text.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
