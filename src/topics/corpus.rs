// Per-batch corpus statistics: document frequency and IDF.
//
// Each post is one document. A term counts once per post no matter how many
// times it repeats, and IDF is smoothed so the denominator is never zero:
//
//   idf(term) = ln(total_docs / (1 + doc_freq(term)))
//
// Statistics are built fresh for every call and never updated afterwards.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::posts::Post;
use crate::text::tokenizer::tokenize;

/// Frozen document-frequency and IDF tables for one batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusStats {
    doc_freq: HashMap<String, usize>,
    idf: HashMap<String, f64>,
    total_docs: usize,
}

impl CorpusStats {
    /// Build statistics over a batch of posts.
    pub fn build(posts: &[Post]) -> Self {
        Self::from_texts(posts.iter().map(Post::text))
    }

    /// Build statistics over arbitrary documents.
    pub fn from_texts<I, S>(docs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total_docs = 0;

        for doc in docs {
            total_docs += 1;
            let distinct: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in distinct {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let idf = doc_freq
            .iter()
            .map(|(term, &df)| (term.clone(), smoothed_idf(total_docs, df)))
            .collect();

        debug!(
            docs = total_docs,
            vocabulary = doc_freq.len(),
            "Built corpus statistics"
        );

        Self {
            doc_freq,
            idf,
            total_docs,
        }
    }

    /// Number of documents in the batch.
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// How many documents contain the term (0 if unseen).
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// IDF of a term. Terms unseen in this batch contribute nothing (0.0).
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Number of distinct terms seen in the batch.
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_docs == 0
    }
}

/// `ln(total / (1 + df))`. Can go negative for terms present in every document.
pub fn smoothed_idf(total_docs: usize, doc_freq: usize) -> f64 {
    (total_docs as f64 / (1 + doc_freq) as f64).ln()
}
