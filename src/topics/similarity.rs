// Jaccard similarity between the token sets of two texts.
//
//   |A ∩ B| / |A ∪ B|
//
// This gives 0.0 for no shared terms and 1.0 for identical vocabularies.
// If either side has no tokens at all the result is 0.0: an empty post is
// never "identical" to anything, including another empty post.

use std::collections::HashSet;

use crate::text::tokenizer::token_set;

/// Similarity of two raw texts, in [0, 1].
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    jaccard(&token_set(text_a), &token_set(text_b))
}

/// Jaccard index of two pre-tokenized sets.
///
/// Separated from `similarity` so the clustering pass can tokenize each post
/// once instead of once per pair.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Iterate the smaller set
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|t| large.contains(*t)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}
