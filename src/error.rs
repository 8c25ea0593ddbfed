// Typed errors for the analysis core.
//
// Scoring and detection degrade instead of failing (empty text scores zero,
// empty batches produce empty results). Only the quadratic clustering pass
// can refuse work: oversized batches, a passed deadline, or a cancellation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("batch of {size} posts exceeds the clustering limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("similarity threshold {0} is not within [0, 1]")]
    InvalidThreshold(f64),

    #[error("clustering deadline exceeded after {completed_rows} of {total_rows} rows")]
    DeadlineExceeded {
        completed_rows: usize,
        total_rows: usize,
    },

    #[error("clustering cancelled by caller")]
    Cancelled,
}
