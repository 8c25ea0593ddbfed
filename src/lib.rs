// Moltwatch: novelty, spam and duplicate analysis for community posts.
//
// This is the library root. Each module corresponds to a stage of the
// analysis. Every entry point is a pure function of the batch it is given:
// no I/O, no caches, no state carried between calls.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod posts;
pub mod scoring;
pub mod stats;
pub mod text;
pub mod topics;
