// Theme extractor trait: swap-ready abstraction.
//
// The duplicates pipeline only needs "texts in, keywords out". The default
// implementation ranks terms by raw frequency; a TF-IDF or embedding-based
// labeller could slot in here without touching the clustering code.

/// Derive descriptive keywords from a group of related texts.
pub trait ThemeExtractor {
    /// Keywords for the texts, most descriptive first.
    fn extract(&self, texts: &[String]) -> Vec<String>;
}
