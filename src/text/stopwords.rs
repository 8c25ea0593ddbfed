// Fixed English stopword list.
//
// Tokens are normalized before lookup, so contractions appear here in their
// apostrophe-stripped form ("doesn't" -> "doesn"). Words of two letters or
// fewer never reach this check; the tokenizer drops them first.

use std::collections::HashSet;
use std::sync::LazyLock;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "him", "his", "how", "its", "may", "new", "now", "old", "see",
    "two", "way", "who", "did", "get", "got", "let", "put", "say", "she", "too", "use", "yes",
    "yet", "own", "off", "per", "via", "also", "been", "both", "each", "from", "have", "here",
    "into", "just", "like", "made", "make", "many", "more", "most", "much", "must", "only",
    "over", "same", "some", "such", "than", "that", "them", "then", "they", "this", "very",
    "were", "what", "when", "which", "while", "will", "with", "would", "your", "about", "after",
    "again", "against", "because", "before", "being", "below", "between", "could", "does",
    "doing", "down", "during", "even", "every", "few", "further", "having", "hers", "herself",
    "himself", "itself", "myself", "once", "other", "ours", "ourselves", "should", "their",
    "theirs", "themselves", "there", "these", "those", "through", "under", "until", "upon",
    "where", "whom", "why", "yours", "yourself", "yourselves", "above", "across", "another",
    "around", "away", "back", "cannot", "either", "else", "ever", "however", "instead", "maybe",
    "might", "never", "often", "perhaps", "quite", "rather", "really", "since", "still", "thing",
    "things", "though", "well", "within", "without", "don", "doesn", "didn", "isn", "wasn",
    "aren", "weren", "won", "wouldn", "couldn", "shouldn", "hasn", "haven", "hadn", "ain",
    "shan", "mustn", "needn", "gonna", "gotta",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Whether a normalized (lowercase) token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}
