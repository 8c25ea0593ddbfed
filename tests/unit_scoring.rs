// Unit tests for scoring functions.
//
// Tests isolated pure functions: novelty score edge cases, spam rule
// scenarios and verdict invariants, rounding, and engagement ordering.

use std::collections::HashSet;

use moltwatch::posts::Post;
use moltwatch::scoring::engagement::{engagement_score, top_by_engagement};
use moltwatch::scoring::novelty::{score_post, NoveltyScore};
use moltwatch::scoring::round2;
use moltwatch::scoring::spam::{detect, detect_post, SpamSignal, SPAM_RULES};
use moltwatch::topics::corpus::CorpusStats;

// ============================================================
// Novelty
// ============================================================

#[test]
fn novelty_absent_text_scores_zero() {
    let batch = vec![Post::new("a", None, None), Post::new("b", Some("agents"), None)];
    let stats = CorpusStats::build(&batch);
    let score = score_post(&batch[0], &stats);
    assert_eq!(score, NoveltyScore::default());
}

#[test]
fn novelty_counts_tokens_and_unique_terms() {
    let batch = vec![
        Post::new("a", Some("memory memory graphs"), Some("agents")),
        Post::new("b", Some("weather"), None),
    ];
    let stats = CorpusStats::build(&batch);
    let score = score_post(&batch[0], &stats);
    assert_eq!(score.token_count, 4);
    assert_eq!(score.unique_terms, 3);
}

#[test]
fn novelty_fields_are_two_decimal() {
    let batch = vec![
        Post::new("a", Some("quantum entanglement experiments"), None),
        Post::new("b", Some("weather"), None),
        Post::new("c", Some("gardening"), None),
    ];
    let stats = CorpusStats::build(&batch);
    let score = score_post(&batch[0], &stats);
    for value in [score.tfidf, score.length_bonus, score.final_score] {
        assert_eq!(value, round2(value), "{value} is not rounded");
    }
}

#[test]
fn novelty_final_never_exceeds_tfidf_for_positive_scores() {
    let batch = vec![
        Post::new("a", Some("quantum entanglement experiments"), None),
        Post::new("b", Some("weather"), None),
        Post::new("c", Some("gardening"), None),
    ];
    let stats = CorpusStats::build(&batch);
    let score = score_post(&batch[0], &stats);
    assert!(score.tfidf > 0.0);
    assert!(score.final_score <= score.tfidf);
}

#[test]
fn round2_is_half_away_from_zero() {
    assert_eq!(round2(2.675 + 1e-9), 2.68);
    assert_eq!(round2(0.005), 0.01);
    assert_eq!(round2(-0.005), -0.01);
}

// ============================================================
// Spam rules
// ============================================================

#[test]
fn crypto_mint_title_scenario() {
    let post = Post::new("p", Some("Daily mint airdrop token NFT now"), Some(""));
    let signals = detect_post(&post);
    assert!(signals.crypto_mint);
    assert!(signals.spam_score >= 1);
}

#[test]
fn spam_score_matches_fired_signals() {
    let batch = vec![
        Post::new("1", Some("Thoughtful notes on consensus protocols"), None),
        Post::new("2", Some("MASSIVE airdrop"), Some("join now")),
        Post::new("3", Some("🔥🔥🔥 WOW"), None),
        Post::new("4", None, None),
    ];
    for signals in detect(&batch) {
        assert!(signals.spam_score <= 4);
        assert_eq!(signals.spam_score as usize, signals.fired().len());
        assert_eq!(signals.is_likely_spam, signals.spam_score >= 2);
    }
}

#[test]
fn short_spam_counts_characters_not_bytes() {
    // 20 emoji (80 bytes) plus "free": under 50 characters
    let text = format!("{} free", "🙂".repeat(20));
    let signals = detect_post(&Post::new("p", Some(&text), None));
    assert!(signals.short_spam);
}

#[test]
fn rule_table_covers_every_signal() {
    let signals: Vec<SpamSignal> = SPAM_RULES.iter().map(|r| r.signal).collect();
    assert_eq!(
        signals,
        vec![
            SpamSignal::CryptoMint,
            SpamSignal::RepetitiveCaps,
            SpamSignal::ExcessiveEmoji,
            SpamSignal::ShortSpam
        ]
    );
}

#[test]
fn signal_names_are_snake_case() {
    assert_eq!(SpamSignal::CryptoMint.to_string(), "crypto_mint");
    assert_eq!(SpamSignal::ShortSpam.as_str(), "short_spam");
}

// ============================================================
// Engagement
// ============================================================

#[test]
fn engagement_prefers_discussion() {
    let mut upvoted = Post::new("upvoted", Some("a"), None);
    upvoted.author = Some("ada".to_string());
    upvoted.upvotes = 12;
    let mut discussed = Post::new("discussed", Some("b"), None);
    discussed.author = Some("basil".to_string());
    discussed.comment_count = 3;

    assert_eq!(engagement_score(&discussed), 15);
    let batch = vec![upvoted, discussed];
    let top = top_by_engagement(&batch, 1, &HashSet::new());
    assert_eq!(top[0].id, "discussed");
}
