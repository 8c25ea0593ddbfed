// Text normalization: tokenizer and the fixed stopword list.

pub mod stopwords;
pub mod tokenizer;
