// Engagement ranking: what the community is actually responding to.
//
// Comments are weighted five times an upvote: a reply takes more effort than
// a click, and threads with discussion are what a digest reader wants.

use std::collections::HashSet;

use crate::posts::Post;

/// Weight of a single comment relative to an upvote.
pub const COMMENT_WEIGHT: u64 = 5;

/// Minimum comments for a post to count as engaged regardless of upvotes.
pub const ENGAGED_MIN_COMMENTS: u64 = 2;

/// `upvotes + 5 * comments`.
pub fn engagement_score(post: &Post) -> u64 {
    post.upvotes
        .saturating_add(post.comment_count.saturating_mul(COMMENT_WEIGHT))
}

/// Posts without an author are excluded too.
fn is_excluded(post: &Post, excluded_authors: &HashSet<String>) -> bool {
    post.author
        .as_ref()
        .is_none_or(|a| excluded_authors.contains(a))
}

/// Highest-engagement posts, skipping excluded authors.
///
/// Equal scores are ordered by id so the ranking is reproducible.
pub fn top_by_engagement<'a>(
    posts: &'a [Post],
    limit: usize,
    excluded_authors: &HashSet<String>,
) -> Vec<&'a Post> {
    let mut ranked: Vec<&Post> = posts
        .iter()
        .filter(|p| !is_excluded(p, excluded_authors))
        .collect();
    ranked.sort_by(|a, b| {
        engagement_score(b)
            .cmp(&engagement_score(a))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(limit);
    ranked
}

/// Recent posts with some engagement, newest first.
///
/// A post qualifies with `min_upvotes` upvotes or at least two comments.
/// Posts without a timestamp sort after all dated ones.
pub fn recent_engaged<'a>(
    posts: &'a [Post],
    limit: usize,
    min_upvotes: u64,
    excluded_authors: &HashSet<String>,
) -> Vec<&'a Post> {
    let mut recent: Vec<&Post> = posts
        .iter()
        .filter(|p| !is_excluded(p, excluded_authors))
        .filter(|p| p.upvotes >= min_upvotes || p.comment_count >= ENGAGED_MIN_COMMENTS)
        .collect();
    // None < Some, so descending order puts undated posts last
    recent.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    recent.truncate(limit);
    recent
}
