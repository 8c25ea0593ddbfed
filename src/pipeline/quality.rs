// High-quality post selection.
//
// For one batch:
// 1. Build corpus statistics over the whole batch
// 2. Score every post for novelty against those statistics
// 3. Run the spam rules over the same batch
// 4. Keep posts that are novel enough, long enough, and not spam
// 5. Rank by novelty plus log-dampened upvotes and truncate
//
// Upvotes go through ln(1 + upvotes) * 0.1 so that popularity nudges the
// ranking without letting a viral but repetitive post outrank novel ones.

use serde::Serialize;
use tracing::info;

use crate::posts::Post;
use crate::scoring::novelty::{self, NoveltyScore};
use crate::scoring::spam::{self, SpamSignals};
use crate::topics::corpus::CorpusStats;

/// Posts with fewer tokens than this are never reported as high quality.
pub const MIN_QUALITY_TOKENS: usize = 15;

/// Multiplier on ln(1 + upvotes) in the ranking score.
pub const UPVOTE_RANK_WEIGHT: f64 = 0.1;

/// A post that passed the quality filters, with everything used to judge it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPost {
    pub post: Post,
    pub novelty: NoveltyScore,
    pub spam: SpamSignals,
    /// novelty.final_score + ln(1 + upvotes) * 0.1
    pub rank_score: f64,
}

/// Ranking score combining novelty and engagement.
pub fn rank_score(final_score: f64, upvotes: u64) -> f64 {
    final_score + (upvotes as f64).ln_1p() * UPVOTE_RANK_WEIGHT
}

/// The most novel, non-spam, substantive posts of a batch.
///
/// Ordered by rank score descending; equal scores fall back to ascending id.
pub fn high_quality_posts(posts: &[Post], limit: usize, min_novelty: f64) -> Vec<ScoredPost> {
    let stats = CorpusStats::build(posts);
    let spam_signals = spam::detect(posts);

    let mut kept: Vec<ScoredPost> = posts
        .iter()
        .zip(spam_signals)
        .filter_map(|(post, spam)| {
            let novelty = novelty::score_post(post, &stats);
            let passes = novelty.final_score >= min_novelty
                && !spam.is_likely_spam
                && novelty.token_count >= MIN_QUALITY_TOKENS;
            passes.then(|| ScoredPost {
                rank_score: rank_score(novelty.final_score, post.upvotes),
                post: post.clone(),
                novelty,
                spam,
            })
        })
        .collect();

    let qualified = kept.len();

    kept.sort_by(|a, b| {
        b.rank_score
            .total_cmp(&a.rank_score)
            .then_with(|| a.post.id.cmp(&b.post.id))
    });
    kept.truncate(limit);

    info!(
        posts = posts.len(),
        vocabulary = stats.vocabulary_size(),
        qualified,
        returned = kept.len(),
        min_novelty,
        "Selected high-quality posts"
    );

    kept
}
