// Theme extraction: frequency-ranked keywords for a cluster.
//
// All member texts are concatenated and tokenized; the most frequent terms
// become the theme. Ties keep the order in which the terms first appeared,
// so the output is fully determined by member order.

use std::collections::HashMap;

use super::cluster::PostCluster;
use super::traits::ThemeExtractor;
use crate::text::tokenizer::tokenize;

/// Number of keywords in a cluster theme.
pub const THEME_SIZE: usize = 5;

/// Term counts for a text, most frequent first (ties in first-seen order).
pub fn keyword_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut slot_of: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in tokenize(text) {
        match slot_of.get(&token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slot_of.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort preserves first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `n` most frequent terms of a text.
pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    keyword_frequencies(text)
        .into_iter()
        .take(n)
        .map(|(term, _)| term)
        .collect()
}

/// Up to five keywords describing a cluster.
pub fn extract_cluster_theme(cluster: &PostCluster) -> Vec<String> {
    FrequencyThemeExtractor::default().extract(&cluster.member_texts())
}

/// Term-frequency theme extractor, the default and currently only one.
pub struct FrequencyThemeExtractor {
    pub top_n: usize,
}

impl Default for FrequencyThemeExtractor {
    fn default() -> Self {
        Self { top_n: THEME_SIZE }
    }
}

impl ThemeExtractor for FrequencyThemeExtractor {
    fn extract(&self, texts: &[String]) -> Vec<String> {
        extract_keywords(&texts.join(" "), self.top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequencies_with_first_seen_ties() {
        let freqs = keyword_frequencies("the cat sat on the mat the cat ran");
        assert_eq!(
            freqs,
            vec![
                ("cat".to_string(), 2),
                ("sat".to_string(), 1),
                ("mat".to_string(), 1),
                ("ran".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_extract_keywords_truncates() {
        let kws = extract_keywords("alpha beta gamma delta epsilon zeta alpha", 3);
        assert_eq!(kws, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_extractor_joins_texts() {
        let extractor = FrequencyThemeExtractor::default();
        let texts = vec![
            "agents memory".to_string(),
            "memory graphs".to_string(),
            "memory agents".to_string(),
        ];
        assert_eq!(extractor.extract(&texts), vec!["memory", "agents", "graphs"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(keyword_frequencies("").is_empty());
        assert!(FrequencyThemeExtractor::default().extract(&[]).is_empty());
    }
}
