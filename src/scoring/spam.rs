// Spam heuristics: a fixed table of independent rules.
//
// Each rule looks at `title + " " + content` and either fires or doesn't.
// The spam score is the number of rules that fired; two or more marks the
// post as likely spam. There is nothing adaptive here: adding a rule means
// adding a row to SPAM_RULES and a variant to SpamSignal.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::posts::Post;

/// Posts with at least this many signals are flagged.
pub const SPAM_VERDICT_MIN_SIGNALS: u8 = 2;

/// Texts shorter than this (in characters) are checked for call-to-action bait.
const SHORT_TEXT_MAX_CHARS: usize = 50;

static CRYPTO_MINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:mint|airdrop|token|nft|whitelist)\b").expect("crypto pattern is valid")
});

static CAPS_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{5,}").expect("caps pattern is valid"));

// Pictographs, misc symbols/dingbats, regional indicators
static EMOJI_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{1F1E6}-\x{1F1FF}]{3,}")
        .expect("emoji pattern is valid")
});

static CALL_TO_ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)join|click|free").expect("bait pattern is valid"));

/// The individual spam signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamSignal {
    CryptoMint,
    RepetitiveCaps,
    ExcessiveEmoji,
    ShortSpam,
}

impl SpamSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamSignal::CryptoMint => "crypto_mint",
            SpamSignal::RepetitiveCaps => "repetitive_caps",
            SpamSignal::ExcessiveEmoji => "excessive_emoji",
            SpamSignal::ShortSpam => "short_spam",
        }
    }
}

impl std::fmt::Display for SpamSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the rule table.
#[derive(Clone, Copy)]
pub struct SpamRule {
    pub signal: SpamSignal,
    pub check: fn(&str) -> bool,
}

/// Every rule, evaluated in order against every post.
pub const SPAM_RULES: &[SpamRule] = &[
    SpamRule {
        signal: SpamSignal::CryptoMint,
        check: mentions_crypto_mint,
    },
    SpamRule {
        signal: SpamSignal::RepetitiveCaps,
        check: has_caps_run,
    },
    SpamRule {
        signal: SpamSignal::ExcessiveEmoji,
        check: has_emoji_run,
    },
    SpamRule {
        signal: SpamSignal::ShortSpam,
        check: is_short_bait,
    },
];

fn mentions_crypto_mint(text: &str) -> bool {
    CRYPTO_MINT.is_match(text)
}

fn has_caps_run(text: &str) -> bool {
    CAPS_RUN.is_match(text)
}

fn has_emoji_run(text: &str) -> bool {
    EMOJI_RUN.is_match(text)
}

fn is_short_bait(text: &str) -> bool {
    text.chars().count() < SHORT_TEXT_MAX_CHARS && CALL_TO_ACTION.is_match(text)
}

/// Spam verdict for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamSignals {
    pub post_id: String,
    pub crypto_mint: bool,
    pub repetitive_caps: bool,
    pub excessive_emoji: bool,
    pub short_spam: bool,
    /// Number of signals that fired (0-4)
    pub spam_score: u8,
    pub is_likely_spam: bool,
}

impl SpamSignals {
    fn clean(post_id: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            crypto_mint: false,
            repetitive_caps: false,
            excessive_emoji: false,
            short_spam: false,
            spam_score: 0,
            is_likely_spam: false,
        }
    }

    fn raise(&mut self, signal: SpamSignal) {
        let flag = match signal {
            SpamSignal::CryptoMint => &mut self.crypto_mint,
            SpamSignal::RepetitiveCaps => &mut self.repetitive_caps,
            SpamSignal::ExcessiveEmoji => &mut self.excessive_emoji,
            SpamSignal::ShortSpam => &mut self.short_spam,
        };
        if !*flag {
            *flag = true;
            self.spam_score += 1;
        }
        self.is_likely_spam = self.spam_score >= SPAM_VERDICT_MIN_SIGNALS;
    }

    pub fn has(&self, signal: SpamSignal) -> bool {
        match signal {
            SpamSignal::CryptoMint => self.crypto_mint,
            SpamSignal::RepetitiveCaps => self.repetitive_caps,
            SpamSignal::ExcessiveEmoji => self.excessive_emoji,
            SpamSignal::ShortSpam => self.short_spam,
        }
    }

    /// Signals that fired, in rule order.
    pub fn fired(&self) -> Vec<SpamSignal> {
        SPAM_RULES
            .iter()
            .map(|rule| rule.signal)
            .filter(|signal| self.has(*signal))
            .collect()
    }
}

/// Run every rule against raw text.
pub fn detect_text(post_id: &str, text: &str) -> SpamSignals {
    let mut signals = SpamSignals::clean(post_id);
    for rule in SPAM_RULES {
        if (rule.check)(text) {
            signals.raise(rule.signal);
        }
    }
    signals
}

/// Spam signals for one post.
pub fn detect_post(post: &Post) -> SpamSignals {
    detect_text(&post.id, &post.text())
}

/// Spam signals for a batch, in batch order.
pub fn detect(posts: &[Post]) -> Vec<SpamSignals> {
    let results: Vec<SpamSignals> = posts.iter().map(detect_post).collect();

    debug!(
        posts = posts.len(),
        flagged = results.iter().filter(|s| s.is_likely_spam).count(),
        "Ran spam rules"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_vocabulary() {
        let s = detect_text("p", "Daily mint airdrop token NFT now");
        assert!(s.crypto_mint);
        assert!(s.spam_score >= 1);
    }

    #[test]
    fn test_crypto_needs_word_boundary() {
        assert!(!detect_text("p", "mintage tokens minty").crypto_mint);
        assert!(detect_text("p", "the WhiteList is open").crypto_mint);
    }

    #[test]
    fn test_caps_run() {
        assert!(detect_text("p", "this is AMAZING news").repetitive_caps);
        assert!(!detect_text("p", "NASA and ESA").repetitive_caps);
    }

    #[test]
    fn test_emoji_run_must_be_consecutive() {
        assert!(detect_text("p", "wow 🚀🚀🚀 moon").excessive_emoji);
        assert!(!detect_text("p", "wow 🚀 🚀 🚀 moon").excessive_emoji);
        assert!(detect_text("p", "☀☀☀").excessive_emoji);
    }

    #[test]
    fn test_short_spam_requires_short_text() {
        assert!(detect_text("p", "Click here for FREE stuff").short_spam);
        let long = "Join the discussion about how memory architectures shape long-running agent behaviour";
        assert!(long.chars().count() >= 50);
        assert!(!detect_text("p", long).short_spam);
    }

    #[test]
    fn test_verdict_threshold() {
        // caps + short bait
        let s = detect_text("p", "CLICK to join");
        assert_eq!(s.spam_score, 2);
        assert!(s.is_likely_spam);

        let single = detect_text("p", "A thoughtful post about CRDTs");
        assert_eq!(single.spam_score, 0);
        assert!(!single.is_likely_spam);
    }

    #[test]
    fn test_all_four() {
        let s = detect_text("p", "CLAIM FREE NFT 🎉🎉🎉");
        assert_eq!(s.spam_score, 4);
        assert_eq!(
            s.fired(),
            vec![
                SpamSignal::CryptoMint,
                SpamSignal::RepetitiveCaps,
                SpamSignal::ExcessiveEmoji,
                SpamSignal::ShortSpam
            ]
        );
    }

    #[test]
    fn test_batch_order_preserved() {
        let posts = vec![
            Post::new("a", Some("hello"), None),
            Post::new("b", Some("free airdrop"), None),
        ];
        let results = detect(&posts);
        assert_eq!(results[0].post_id, "a");
        assert_eq!(results[1].post_id, "b");
        assert!(results[1].is_likely_spam);
    }
}
