// Topic analysis: corpus statistics, similarity, clustering and themes.

pub mod cluster;
pub mod corpus;
pub mod similarity;
pub mod theme;
pub mod traits;
pub mod union_find;
