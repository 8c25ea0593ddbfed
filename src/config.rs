use std::collections::HashSet;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Authors hidden from engagement rankings unless overridden: platform and
/// promotional accounts that would otherwise top every list.
pub const DEFAULT_EXCLUDED_AUTHORS: &[&str] =
    &["KingMolt", "donaldtrump", "CryptoMolt", "evil", "MoltReporter", "MoltReg"];

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment is a valid setup.
/// The .env file is loaded at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Largest batch the clustering pass will accept (MOLTWATCH_MAX_BATCH)
    pub max_batch: usize,
    /// Default Jaccard threshold for clustering (MOLTWATCH_CLUSTER_THRESHOLD)
    pub cluster_threshold: f64,
    /// Default minimum novelty for the quality list (MOLTWATCH_MIN_NOVELTY)
    pub min_novelty: f64,
    /// Default list length for quality and digest output (MOLTWATCH_QUALITY_LIMIT)
    pub quality_limit: usize,
    /// Wall-clock budget for one clustering call (MOLTWATCH_CLUSTER_DEADLINE_MS)
    pub cluster_deadline: Option<Duration>,
    /// Authors skipped by engagement rankings (MOLTWATCH_EXCLUDE_AUTHORS, comma-separated)
    pub excluded_authors: HashSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_batch: 5000,
            cluster_threshold: 0.5,
            min_novelty: 0.3,
            quality_limit: 20,
            cluster_deadline: None,
            excluded_authors: DEFAULT_EXCLUDED_AUTHORS
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `load` passes the real environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_batch = parse_or("MOLTWATCH_MAX_BATCH", &lookup, defaults.max_batch)?;
        let cluster_threshold =
            parse_or("MOLTWATCH_CLUSTER_THRESHOLD", &lookup, defaults.cluster_threshold)?;
        let min_novelty = parse_or("MOLTWATCH_MIN_NOVELTY", &lookup, defaults.min_novelty)?;
        let quality_limit = parse_or("MOLTWATCH_QUALITY_LIMIT", &lookup, defaults.quality_limit)?;

        let cluster_deadline = match lookup("MOLTWATCH_CLUSTER_DEADLINE_MS") {
            Some(raw) if !raw.trim().is_empty() => {
                let ms: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("MOLTWATCH_CLUSTER_DEADLINE_MS is not a number: {raw:?}"))?;
                Some(Duration::from_millis(ms))
            }
            _ => None,
        };

        let excluded_authors = match lookup("MOLTWATCH_EXCLUDE_AUTHORS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.excluded_authors,
        };

        if !(0.0..=1.0).contains(&cluster_threshold) {
            anyhow::bail!(
                "MOLTWATCH_CLUSTER_THRESHOLD must be between 0 and 1, got {cluster_threshold}"
            );
        }

        Ok(Self {
            max_batch,
            cluster_threshold,
            min_novelty,
            quality_limit,
            cluster_deadline,
            excluded_authors,
        })
    }
}

/// Parse `key` if set and non-empty, otherwise use `default`.
fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_from_empty_env() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.max_batch, 5000);
        assert_eq!(config.cluster_threshold, 0.5);
        assert_eq!(config.quality_limit, 20);
        assert!(config.cluster_deadline.is_none());
        assert!(config.excluded_authors.contains("KingMolt"));
        assert!(config.excluded_authors.contains("MoltReg"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MOLTWATCH_MAX_BATCH", "200"),
            ("MOLTWATCH_CLUSTER_THRESHOLD", "0.8"),
            ("MOLTWATCH_CLUSTER_DEADLINE_MS", "1500"),
            ("MOLTWATCH_EXCLUDE_AUTHORS", "spammer, bot ,"),
        ]))
        .unwrap();
        assert_eq!(config.max_batch, 200);
        assert_eq!(config.cluster_threshold, 0.8);
        assert_eq!(config.cluster_deadline, Some(Duration::from_millis(1500)));
        assert_eq!(config.excluded_authors.len(), 2);
        assert!(config.excluded_authors.contains("bot"));
    }

    #[test]
    fn test_bad_number_names_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("MOLTWATCH_MAX_BATCH", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MOLTWATCH_MAX_BATCH"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(Config::from_lookup(lookup_from(&[("MOLTWATCH_CLUSTER_THRESHOLD", "1.5")])).is_err());
    }
}
