// Pipelines: the two batch operations callers actually invoke.
//
// quality:    corpus stats -> novelty + spam -> filtered ranking
// duplicates: similarity -> union-find clusters -> themes

pub mod duplicates;
pub mod quality;
