// Novelty score: how distinctive and substantive a post's text is.
//
// Term rarity comes from the batch's corpus statistics; each distinct term
// contributes its in-post frequency times its IDF:
//
//   tfidf = Σ (count(term) / token_count) * idf(term)
//
// A length bonus rewards substantive posts up to a cap, so very long posts
// don't win on length alone:
//
//   length_bonus = min(token_count / 50, 1)
//   final        = tfidf * (0.7 + 0.3 * length_bonus)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::round2;
use crate::posts::Post;
use crate::text::tokenizer::tokenize;
use crate::topics::corpus::CorpusStats;

/// Novelty breakdown for one post. Score fields are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoveltyScore {
    pub tfidf: f64,
    pub length_bonus: f64,
    pub final_score: f64,
    pub token_count: usize,
    pub unique_terms: usize,
}

/// Weights for the novelty blend.
pub struct NoveltyWeights {
    /// Share of the TF-IDF score every post keeps (default 0.7)
    pub base_weight: f64,
    /// Share unlocked by the length bonus (default 0.3)
    pub length_weight: f64,
    /// Token count at which the length bonus saturates (default 50)
    pub length_cap_tokens: usize,
}

impl Default for NoveltyWeights {
    fn default() -> Self {
        Self {
            base_weight: 0.7,
            length_weight: 0.3,
            length_cap_tokens: 50,
        }
    }
}

/// Score a post against its batch's corpus statistics.
pub fn score_post(post: &Post, stats: &CorpusStats) -> NoveltyScore {
    score_text(&post.text(), stats, &NoveltyWeights::default())
}

/// Score arbitrary text with explicit weights.
pub fn score_text(text: &str, stats: &CorpusStats, weights: &NoveltyWeights) -> NoveltyScore {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return NoveltyScore::default();
    }

    let token_count = tokens.len();

    // Ordered map keeps the floating-point summation order stable
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in &tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let tfidf: f64 = counts
        .iter()
        .map(|(term, &count)| (count as f64 / token_count as f64) * stats.idf(term))
        .sum();

    let cap = weights.length_cap_tokens.max(1) as f64;
    let length_bonus = (token_count as f64 / cap).min(1.0);
    let final_score = tfidf * (weights.base_weight + weights.length_weight * length_bonus);

    NoveltyScore {
        tfidf: round2(tfidf),
        length_bonus: round2(length_bonus),
        final_score: round2(final_score),
        token_count,
        unique_terms: counts.len(),
    }
}
