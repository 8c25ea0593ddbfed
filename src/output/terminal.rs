// Colored terminal output for quality lists, clusters, spam and digests.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers compute results through the library and delegate display here.

use colored::Colorize;

use super::preview;
use crate::pipeline::duplicates::DuplicateReport;
use crate::pipeline::quality::ScoredPost;
use crate::posts::Post;
use crate::scoring::engagement::engagement_score;
use crate::scoring::spam::SpamSignals;
use crate::stats::{Activity, BatchSummary};

/// Display the ranked high-quality post list.
pub fn display_quality_list(posts: &[ScoredPost], batch_size: usize) {
    if posts.is_empty() {
        println!("No posts passed the quality filters ({batch_size} analyzed).");
        return;
    }

    println!(
        "\n{}",
        format!("=== High-Quality Posts ({} of {}) ===", posts.len(), batch_size).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<48} {:>7}  {:>7}  {:>6}  {:>6}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Rank".dimmed(),
        "Novelty".dimmed(),
        "Tokens".dimmed(),
        "Votes".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    for (i, scored) in posts.iter().enumerate() {
        println!(
            "  {:>4}. {:<48} {:>7.2}  {:>7}  {:>6}  {:>6}",
            i + 1,
            preview(scored.post.display_title(), 45),
            scored.rank_score,
            colorize_novelty(scored.novelty.final_score),
            scored.novelty.token_count,
            scored.post.upvotes,
        );
        if let Some(author) = &scored.post.author {
            println!(
                "        {}",
                format!("by {author} in m/{}", scored.post.submolt.as_deref().unwrap_or("?"))
                    .dimmed()
            );
        }
    }
    println!();
}

/// Display duplicate clusters with their themes.
pub fn display_clusters(report: &DuplicateReport) {
    if report.clusters.is_empty() {
        println!(
            "No duplicate clusters found among {} posts.",
            report.total_posts
        );
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Duplicate Clusters ({} clusters, {} of {} posts, {:.0}%) ===",
            report.clusters.len(),
            report.clustered_posts,
            report.total_posts,
            report.duplicate_ratio * 100.0
        )
        .bold()
    );
    println!();

    for (i, cluster) in report.clusters.iter().enumerate() {
        let theme = cluster
            .theme
            .as_ref()
            .map(|t| t.join(", "))
            .unwrap_or_default();

        println!(
            "  {:>2}. {} posts  avg similarity {}  {}",
            i + 1,
            cluster.size().to_string().bold(),
            colorize_similarity(cluster.avg_similarity),
            theme.cyan()
        );
        println!(
            "      Representative: {}",
            preview(cluster.representative.post.display_title(), 70).bold()
        );
        for member in &cluster.members {
            println!(
                "        - [{:>4}] {}",
                member.post.upvotes,
                preview(member.post.display_title(), 70).dimmed()
            );
        }
        println!();
    }
}

/// Display per-post spam signals.
pub fn display_spam(posts: &[Post], signals: &[SpamSignals], flagged_only: bool) {
    let flagged = signals.iter().filter(|s| s.is_likely_spam).count();

    println!(
        "\n{}",
        format!("=== Spam Check ({} flagged of {}) ===", flagged, posts.len()).bold()
    );
    println!();

    for (post, signal) in posts.iter().zip(signals) {
        if flagged_only && !signal.is_likely_spam {
            continue;
        }
        let fired: Vec<&str> = signal.fired().iter().map(|s| s.as_str()).collect();
        let verdict = if signal.is_likely_spam {
            "SPAM".red().bold()
        } else if signal.spam_score > 0 {
            "susp".yellow()
        } else {
            "ok".green()
        };
        println!(
            "  {:<5} {}/4  {:<50} {}",
            verdict,
            signal.spam_score,
            preview(post.display_title(), 48),
            fired.join(", ").dimmed()
        );
    }
    println!();
}

/// Display the batch digest: headline stats, top posts and active communities.
pub fn display_digest(
    summary: &BatchSummary,
    top: &[&Post],
    recent: &[&Post],
    submolts: &[Activity],
    authors: &[Activity],
) {
    println!("\n{}", "=== Batch Digest ===".bold());
    println!(
        "  {} posts from {} authors across {} communities",
        summary.total_posts, summary.unique_authors, summary.unique_submolts
    );
    println!(
        "  {} upvotes, {} comments",
        summary.total_upvotes, summary.total_comments
    );

    println!("\n  {}", "Top by engagement".bold());
    for (i, post) in top.iter().enumerate() {
        println!(
            "  {:>3}. {:<50} {:>6} up  {:>4} comments  {}",
            i + 1,
            preview(post.display_title(), 48),
            post.upvotes,
            post.comment_count,
            format!("(score {})", engagement_score(post)).dimmed()
        );
        if let Some(content) = post.content.as_deref().filter(|c| c.chars().count() > 50) {
            println!("       > {}", preview(content, 120).dimmed());
        }
    }

    if !recent.is_empty() {
        println!("\n  {}", "Recent with engagement".bold());
        for post in recent {
            let when = post
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "undated".to_string());
            println!(
                "    {}  {}",
                when.dimmed(),
                preview(post.display_title(), 60)
            );
        }
    }

    print_activity("Active communities", "m/", submolts);
    print_activity("Active authors", "", authors);
    println!();
}

fn print_activity(heading: &str, prefix: &str, rows: &[Activity]) {
    if rows.is_empty() {
        return;
    }
    println!("\n  {}", heading.bold());
    for row in rows {
        println!(
            "    {}{:<30} {:>5} posts  {:>7} upvotes",
            prefix, row.name, row.post_count, row.total_upvotes
        );
    }
}

fn colorize_novelty(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}");
    if score >= 1.0 {
        text.bright_green()
    } else if score >= 0.5 {
        text.bright_yellow()
    } else {
        text.normal()
    }
}

fn colorize_similarity(avg: f64) -> colored::ColoredString {
    let text = format!("{avg:.2}");
    if avg >= 0.9 {
        text.red().bold()
    } else if avg >= 0.7 {
        text.bright_red()
    } else {
        text.yellow()
    }
}
