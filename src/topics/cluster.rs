// Near-duplicate clustering over a batch of posts.
//
// Every unordered pair (i, j) whose Jaccard similarity meets the threshold
// is unioned in a disjoint-set forest. The resulting equivalence classes of
// size two or more are the clusters; singletons are dropped.
//
// The pairwise pass is N(N-1)/2 comparisons. Rows are spread across the
// rayon pool and each row checks the caller's deadline and cancellation
// flag before starting, so an oversized or slow request can be cut short.
// Unions are applied serially afterwards, in row order, which keeps the
// output independent of thread scheduling.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::similarity::jaccard;
use super::union_find::UnionFind;
use crate::error::AnalysisError;
use crate::posts::Post;
use crate::scoring::round2;
use crate::text::tokenizer::token_set;

/// Shared flag a caller can raise to abandon an in-flight clustering pass.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for one clustering call.
#[derive(Debug, Clone)]
pub struct ClusterOptions {
    /// Minimum Jaccard similarity for two posts to be linked (inclusive).
    pub threshold: f64,
    /// Refuse batches larger than this. `None` means no ceiling.
    pub max_batch: Option<usize>,
    /// Abandon the pairwise pass once this instant has passed.
    pub deadline: Option<Instant>,
    pub cancel: Option<CancelFlag>,
}

impl ClusterOptions {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            max_batch: None,
            deadline: None,
            cancel: None,
        }
    }

    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = Some(max_batch);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// A post inside a cluster, with its position in the original batch.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterMember {
    pub index: usize,
    pub post: Post,
}

/// A group of near-duplicate posts.
#[derive(Debug, Clone, Serialize)]
pub struct PostCluster {
    /// Members ordered by upvotes descending (ties by batch index).
    pub members: Vec<ClusterMember>,
    /// Mean similarity over every pair in the cluster, 2 decimals.
    pub avg_similarity: f64,
    /// The member most similar to all the others.
    pub representative: ClusterMember,
    /// Descriptive keywords, filled in by the duplicates pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Vec<String>>,
}

impl PostCluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Member texts in member order.
    pub fn member_texts(&self) -> Vec<String> {
        self.members.iter().map(|m| m.post.text()).collect()
    }

    pub fn member_indices(&self) -> Vec<usize> {
        self.members.iter().map(|m| m.index).collect()
    }
}

/// Group a batch of posts into near-duplicate clusters.
///
/// Clusters come back largest first; equal sizes are ordered by the batch
/// index of their representative.
pub fn cluster_posts(
    posts: &[Post],
    options: &ClusterOptions,
) -> Result<Vec<PostCluster>, AnalysisError> {
    let threshold = options.threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AnalysisError::InvalidThreshold(threshold));
    }
    if let Some(max) = options.max_batch {
        if posts.len() > max {
            return Err(AnalysisError::BatchTooLarge {
                size: posts.len(),
                max,
            });
        }
    }

    let started = Instant::now();
    let token_sets: Vec<HashSet<String>> = posts.par_iter().map(|p| token_set(&p.text())).collect();

    let links = similar_pairs(&token_sets, options)?;

    let mut forest = UnionFind::new(posts.len());
    let mut merges = 0usize;
    for (i, j) in &links {
        if forest.union(*i, *j) {
            merges += 1;
        }
    }

    debug!(
        posts = posts.len(),
        links = links.len(),
        merges,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Pairwise similarity pass complete"
    );

    let mut clusters: Vec<PostCluster> = forest
        .classes()
        .into_iter()
        .filter(|class| class.len() >= 2)
        .map(|class| build_cluster(&class, posts, &token_sets))
        .collect();

    clusters.sort_by(|a, b| {
        b.size()
            .cmp(&a.size())
            .then(a.representative.index.cmp(&b.representative.index))
    });

    info!(
        posts = posts.len(),
        clusters = clusters.len(),
        clustered_posts = clusters.iter().map(PostCluster::size).sum::<usize>(),
        threshold,
        "Clustered batch"
    );

    Ok(clusters)
}

/// All pairs `(i, j)` with `i < j` whose similarity meets the threshold,
/// in ascending order.
fn similar_pairs(
    token_sets: &[HashSet<String>],
    options: &ClusterOptions,
) -> Result<Vec<(usize, usize)>, AnalysisError> {
    let n = token_sets.len();
    let completed = AtomicUsize::new(0);

    let rows: Vec<Vec<(usize, usize)>> = (0..n)
        .into_par_iter()
        .map(|i| -> Result<Vec<(usize, usize)>, AnalysisError> {
            check_interrupt(options, &completed, n)?;
            let row: Vec<(usize, usize)> = ((i + 1)..n)
                .filter(|&j| jaccard(&token_sets[i], &token_sets[j]) >= options.threshold)
                .map(|j| (i, j))
                .collect();
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(row)
        })
        .collect::<Result<_, AnalysisError>>()?;

    Ok(rows.into_iter().flatten().collect())
}

fn check_interrupt(
    options: &ClusterOptions,
    completed: &AtomicUsize,
    total_rows: usize,
) -> Result<(), AnalysisError> {
    if options.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
        return Err(AnalysisError::Cancelled);
    }
    if options.deadline.is_some_and(|d| Instant::now() >= d) {
        return Err(AnalysisError::DeadlineExceeded {
            completed_rows: completed.load(Ordering::Relaxed),
            total_rows,
        });
    }
    Ok(())
}

/// Turn one equivalence class (ascending batch indices) into a cluster.
///
/// Similarities are recomputed within the class rather than carried over
/// from the global pass.
fn build_cluster(class: &[usize], posts: &[Post], token_sets: &[HashSet<String>]) -> PostCluster {
    let k = class.len();
    let mut totals = vec![0.0f64; k];
    let mut pair_sum = 0.0;

    for a in 0..k {
        for b in (a + 1)..k {
            let sim = jaccard(&token_sets[class[a]], &token_sets[class[b]]);
            totals[a] += sim;
            totals[b] += sim;
            pair_sum += sim;
        }
    }

    let pair_count = (k * (k - 1) / 2) as f64;
    let avg_similarity = round2(pair_sum / pair_count);

    // Strictly greater keeps the lowest batch index on ties
    let mut best = 0;
    for (slot, total) in totals.iter().enumerate().skip(1) {
        if *total > totals[best] {
            best = slot;
        }
    }
    let representative = ClusterMember {
        index: class[best],
        post: posts[class[best]].clone(),
    };

    let mut members: Vec<ClusterMember> = class
        .iter()
        .map(|&index| ClusterMember {
            index,
            post: posts[index].clone(),
        })
        .collect();
    // Stable: equal upvotes stay in batch order
    members.sort_by(|a, b| b.post.upvotes.cmp(&a.post.upvotes));

    PostCluster {
        members,
        avg_similarity,
        representative,
        theme: None,
    }
}
