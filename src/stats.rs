// Batch statistics: who is posting, where, and how much.
//
// Summaries are computed from the batch in hand; there is no running total
// across calls.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::posts::Post;

/// Headline counts for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_posts: usize,
    pub unique_authors: usize,
    pub unique_submolts: usize,
    pub total_upvotes: u64,
    pub total_comments: u64,
}

/// Post volume and upvotes for one author or community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub name: String,
    pub post_count: usize,
    pub total_upvotes: u64,
}

/// Count posts, distinct authors and communities, and total votes and comments.
pub fn summarize(posts: &[Post]) -> BatchSummary {
    let authors: HashSet<&str> = posts.iter().filter_map(|p| p.author.as_deref()).collect();
    let submolts: HashSet<&str> = posts.iter().filter_map(|p| p.submolt.as_deref()).collect();

    BatchSummary {
        total_posts: posts.len(),
        unique_authors: authors.len(),
        unique_submolts: submolts.len(),
        total_upvotes: posts.iter().fold(0u64, |sum, p| sum.saturating_add(p.upvotes)),
        total_comments: posts
            .iter()
            .fold(0u64, |sum, p| sum.saturating_add(p.comment_count)),
    }
}

/// Busiest communities, by post count.
pub fn active_submolts(posts: &[Post], limit: usize) -> Vec<Activity> {
    rank_activity(posts.iter().filter_map(|p| p.submolt.as_deref().map(|s| (s, p))), limit)
}

/// Busiest authors, by post count, skipping excluded accounts.
pub fn active_authors(
    posts: &[Post],
    limit: usize,
    excluded_authors: &HashSet<String>,
) -> Vec<Activity> {
    rank_activity(
        posts
            .iter()
            .filter_map(|p| p.author.as_deref().map(|a| (a, p)))
            .filter(|(author, _)| !excluded_authors.contains(*author)),
        limit,
    )
}

/// Group by name, then order by post count descending and name ascending.
fn rank_activity<'a>(
    keyed: impl Iterator<Item = (&'a str, &'a Post)>,
    limit: usize,
) -> Vec<Activity> {
    let mut by_name: HashMap<&str, Activity> = HashMap::new();
    for (name, post) in keyed {
        let entry = by_name.entry(name).or_insert_with(|| Activity {
            name: name.to_string(),
            post_count: 0,
            total_upvotes: 0,
        });
        entry.post_count += 1;
        entry.total_upvotes = entry.total_upvotes.saturating_add(post.upvotes);
    }

    let mut ranked: Vec<Activity> = by_name.into_values().collect();
    ranked.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}
