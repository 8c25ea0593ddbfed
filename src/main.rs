use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use moltwatch::config::Config;
use moltwatch::output::{self, terminal};
use moltwatch::pipeline::{duplicates, quality};
use moltwatch::posts;
use moltwatch::scoring::{engagement, spam};
use moltwatch::stats;
use moltwatch::topics::cluster::ClusterOptions;
use moltwatch::topics::theme::FrequencyThemeExtractor;
use moltwatch::topics::traits::ThemeExtractor;

/// Moltwatch: surface novel posts, flag spam, and group near-duplicates.
///
/// Every command reads a JSON snapshot of posts (a bare array or the API's
/// `{"posts": [...]}` envelope) and analyzes it as one batch.
#[derive(Parser)]
#[command(name = "moltwatch", version, about)]
struct Cli {
    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the most novel, non-spam posts
    Quality {
        /// Snapshot file to analyze
        #[arg(long)]
        input: PathBuf,

        /// Max posts to return (default: MOLTWATCH_QUALITY_LIMIT or 20)
        #[arg(long)]
        limit: Option<usize>,

        /// Minimum novelty score (default: MOLTWATCH_MIN_NOVELTY or 0.3)
        #[arg(long)]
        min_novelty: Option<f64>,
    },

    /// Group near-duplicate posts into clusters
    Clusters {
        /// Snapshot file to analyze
        #[arg(long)]
        input: PathBuf,

        /// Jaccard similarity threshold (default: MOLTWATCH_CLUSTER_THRESHOLD or 0.5)
        #[arg(long)]
        threshold: Option<f64>,

        /// Skip theme extraction
        #[arg(long)]
        no_themes: bool,
    },

    /// Run the spam rules over every post
    Spam {
        /// Snapshot file to analyze
        #[arg(long)]
        input: PathBuf,

        /// Only show posts flagged as likely spam
        #[arg(long)]
        flagged_only: bool,
    },

    /// Batch digest: stats, top posts, active communities and authors
    Digest {
        /// Snapshot file to analyze
        #[arg(long)]
        input: PathBuf,

        /// Rows per section (default: MOLTWATCH_QUALITY_LIMIT or 20)
        #[arg(long)]
        limit: Option<usize>,

        /// Upvotes needed for the "recent with engagement" section
        #[arg(long, default_value = "2")]
        min_upvotes: u64,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("moltwatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Quality {
            input,
            limit,
            min_novelty,
        } => {
            let batch = posts::load_batch(&input)?;
            let limit = limit.unwrap_or(config.quality_limit);
            let min_novelty = min_novelty.unwrap_or(config.min_novelty);

            let ranked = quality::high_quality_posts(&batch, limit, min_novelty);

            if cli.json {
                println!("{}", output::to_json(&ranked)?);
            } else {
                terminal::display_quality_list(&ranked, batch.len());
            }
        }

        Commands::Clusters {
            input,
            threshold,
            no_themes,
        } => {
            let batch = posts::load_batch(&input)?;

            let mut options = ClusterOptions::new(threshold.unwrap_or(config.cluster_threshold))
                .with_max_batch(config.max_batch);
            if let Some(budget) = config.cluster_deadline {
                options = options.with_deadline(Instant::now() + budget);
            }

            let extractor = FrequencyThemeExtractor::default();
            let themes: Option<&dyn ThemeExtractor> = if no_themes {
                None
            } else {
                Some(&extractor)
            };

            let report = duplicates::find_duplicates(&batch, &options, themes)?;

            if cli.json {
                println!("{}", output::to_json(&report)?);
            } else {
                terminal::display_clusters(&report);
            }
        }

        Commands::Spam {
            input,
            flagged_only,
        } => {
            let batch = posts::load_batch(&input)?;
            let signals = spam::detect(&batch);

            if cli.json {
                let shown: Vec<&spam::SpamSignals> = signals
                    .iter()
                    .filter(|s| !flagged_only || s.is_likely_spam)
                    .collect();
                println!("{}", output::to_json(&shown)?);
            } else {
                terminal::display_spam(&batch, &signals, flagged_only);
            }
        }

        Commands::Digest {
            input,
            limit,
            min_upvotes,
        } => {
            let batch = posts::load_batch(&input)?;
            let limit = limit.unwrap_or(config.quality_limit);
            let excluded = &config.excluded_authors;

            let summary = stats::summarize(&batch);
            let top = engagement::top_by_engagement(&batch, limit, excluded);
            let recent = engagement::recent_engaged(&batch, limit, min_upvotes, excluded);
            let submolts = stats::active_submolts(&batch, limit);
            let authors = stats::active_authors(&batch, limit, excluded);

            info!(
                posts = summary.total_posts,
                authors = summary.unique_authors,
                submolts = summary.unique_submolts,
                "Built digest"
            );

            if cli.json {
                let digest = serde_json::json!({
                    "summary": summary,
                    "top_by_engagement": top,
                    "recent_engaged": recent,
                    "active_submolts": submolts,
                    "active_authors": authors,
                });
                println!("{}", output::to_json(&digest)?);
            } else {
                terminal::display_digest(&summary, &top, &recent, &submolts, &authors);
            }
        }
    }

    Ok(())
}
