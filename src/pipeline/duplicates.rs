// Duplicate detection: cluster the batch, then label each cluster.

use serde::Serialize;
use tracing::info;

use crate::error::AnalysisError;
use crate::posts::Post;
use crate::scoring::round2;
use crate::topics::cluster::{cluster_posts, ClusterOptions, PostCluster};
use crate::topics::traits::ThemeExtractor;

/// Clusters for one batch plus the batch-level duplicate ratio.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub total_posts: usize,
    /// Posts that landed in some cluster.
    pub clustered_posts: usize,
    /// clustered_posts / total_posts, 2 decimals (0 for an empty batch).
    pub duplicate_ratio: f64,
    pub clusters: Vec<PostCluster>,
}

/// Cluster a batch and, given an extractor, attach a theme to every cluster.
pub fn find_duplicates(
    posts: &[Post],
    options: &ClusterOptions,
    themes: Option<&dyn ThemeExtractor>,
) -> Result<DuplicateReport, AnalysisError> {
    let mut clusters = cluster_posts(posts, options)?;

    if let Some(extractor) = themes {
        for cluster in &mut clusters {
            cluster.theme = Some(extractor.extract(&cluster.member_texts()));
        }
    }

    let clustered_posts: usize = clusters.iter().map(PostCluster::size).sum();
    // Singletons still count towards the denominator
    let duplicate_ratio = if posts.is_empty() {
        0.0
    } else {
        round2(clustered_posts as f64 / posts.len() as f64)
    };

    info!(
        clusters = clusters.len(),
        clustered_posts,
        duplicate_ratio,
        "Duplicate report ready"
    );

    Ok(DuplicateReport {
        total_posts: posts.len(),
        clustered_posts,
        duplicate_ratio,
        clusters,
    })
}
