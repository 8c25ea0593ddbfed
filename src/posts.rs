// Post records: the batch unit every analysis operates on.
//
// A batch is loaded from a JSON snapshot at the edge of the program (the
// CLI), then handed to the library by reference. Nothing in the analysis
// modules reads files or keeps posts around between calls.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

/// A single community post.
///
/// Text fields may be absent; every analysis treats a missing title or
/// content as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Author name. The upstream API nests it as `{ "name": ... }`.
    #[serde(default, deserialize_with = "name_field")]
    pub author: Option<String>,
    /// Community ("submolt") the post was made in.
    #[serde(default, deserialize_with = "name_field")]
    pub submolt: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "count_field")]
    pub upvotes: u64,
    #[serde(default, deserialize_with = "count_field")]
    pub downvotes: u64,
    #[serde(default, alias = "commentCount", deserialize_with = "count_field")]
    pub comment_count: u64,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Minimal constructor, mostly for tests and callers building batches in memory.
    pub fn new(id: impl Into<String>, title: Option<&str>, content: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.map(str::to_string),
            content: content.map(str::to_string),
            author: None,
            submolt: None,
            url: None,
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            created_at: None,
        }
    }

    /// Title and content joined by a single space, missing parts as "".
    pub fn text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or(""),
            self.content.as_deref().unwrap_or("")
        )
    }

    /// Title for display, falling back to the id for untitled posts.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.id,
        }
    }
}

/// Either a bare name or the API's `{ "name": ... }` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum NameRef {
    Plain(String),
    Named { name: Option<String> },
}

fn name_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NameRef> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NameRef::Plain(name)) => Some(name),
        Some(NameRef::Named { name }) => name,
        None => None,
    })
}

/// Counts may come through as `null`; treat that the same as absent.
fn count_field<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

/// The two snapshot shapes we accept: a bare array or an API-style envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Bare(Vec<Post>),
    Envelope { posts: Vec<Post> },
}

/// Parse a batch of posts from a JSON string.
pub fn parse_batch(json: &str) -> Result<Vec<Post>> {
    let snapshot: Snapshot =
        serde_json::from_str(json).context("Snapshot is not a post array or {\"posts\": [...]}")?;
    Ok(match snapshot {
        Snapshot::Bare(posts) => posts,
        Snapshot::Envelope { posts } => posts,
    })
}

/// Load a batch of posts from a JSON snapshot file.
pub fn load_batch(path: &Path) -> Result<Vec<Post>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let posts = parse_batch(&json).with_context(|| format!("Failed to parse {}", path.display()))?;

    info!(count = posts.len(), path = %path.display(), "Loaded post batch");

    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_title_and_content() {
        let post = Post::new("p1", Some("Hello"), Some("world"));
        assert_eq!(post.text(), "Hello world");

        let untitled = Post::new("p2", None, Some("body"));
        assert_eq!(untitled.text(), " body");
        assert_eq!(untitled.display_title(), "p2");
    }

    #[test]
    fn test_parse_api_envelope() {
        let json = r#"{
            "posts": [{
                "id": "abc",
                "title": "Memory systems",
                "content": null,
                "author": { "name": "Ada" },
                "submolt": { "name": "agents" },
                "upvotes": 12,
                "comment_count": 3,
                "created_at": "2026-01-30T12:00:00Z"
            }]
        }"#;
        let posts = parse_batch(json).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author.as_deref(), Some("Ada"));
        assert_eq!(posts[0].submolt.as_deref(), Some("agents"));
        assert_eq!(posts[0].content, None);
        assert_eq!(posts[0].upvotes, 12);
        assert_eq!(posts[0].comment_count, 3);
        assert!(posts[0].created_at.is_some());
    }

    #[test]
    fn test_parse_bare_array_with_camel_case_and_nulls() {
        let json = r#"[
            { "id": "a", "author": "Bob", "commentCount": 7, "upvotes": null },
            { "id": "b" }
        ]"#;
        let posts = parse_batch(json).unwrap();
        assert_eq!(posts[0].author.as_deref(), Some("Bob"));
        assert_eq!(posts[0].comment_count, 7);
        assert_eq!(posts[0].upvotes, 0);
        assert_eq!(posts[1].upvotes, 0);
        assert_eq!(posts[1].title, None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_batch("{\"nope\": 1}").is_err());
    }
}
