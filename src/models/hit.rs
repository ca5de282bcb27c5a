//! Raw search hit data structure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search provider a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    DuckDuckGo,
    GitHub,
}

impl Source {
    /// Display name used in logs and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::DuckDuckGo => "DuckDuckGo",
            Source::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unprocessed search result as produced by a collector.
///
/// Consumed once by the aggregator and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    /// Result title as reported by the provider
    #[serde(default)]
    pub title: String,

    /// Result link; hits with an empty URL never become resources
    #[serde(default)]
    pub url: String,

    /// Snippet or repository description
    #[serde(default)]
    pub description: String,

    /// Provider that returned the hit
    pub source: Source,

    /// Search keyword that produced the hit
    #[serde(default)]
    pub keyword: String,

    /// GitHub stargazer count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,

    /// Last push/update time reported by GitHub
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Primary programming language reported by GitHub
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl RawHit {
    /// Create a hit with the required fields; GitHub metadata starts absent.
    pub fn new(
        source: Source,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            source,
            keyword: keyword.into(),
            stars: None,
            updated_at: None,
            language: None,
        }
    }

    /// Attach a stargazer count.
    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = Some(stars);
        self
    }

    /// Attach a last-updated timestamp.
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Attach the repository's programming language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// True when the URL is blank after trimming.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// True when title, description and URL are all blank.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty() && !self.has_url()
    }

    /// Metadata richness used to pick a representative among duplicates.
    ///
    /// Compared lexicographically: a non-empty description outranks
    /// everything, then the presence of a star count.
    pub fn richness(&self) -> (bool, bool) {
        (!self.description.trim().is_empty(), self.stars.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serde_lowercase() {
        let json = serde_json::to_string(&Source::GitHub).unwrap();
        assert_eq!(json, "\"github\"");
        let parsed: Source = serde_json::from_str("\"duckduckgo\"").unwrap();
        assert_eq!(parsed, Source::DuckDuckGo);
    }

    #[test]
    fn test_blank_hit() {
        let hit = RawHit::new(Source::DuckDuckGo, " ", "", "\t", "cuda");
        assert!(hit.is_blank());
        assert!(!hit.has_url());
    }

    #[test]
    fn test_richness_ordering() {
        let bare = RawHit::new(Source::GitHub, "a/b", "https://github.com/a/b", "", "cuda");
        let starred = bare.clone().with_stars(3);
        let described = RawHit::new(Source::GitHub, "a/b", "https://github.com/a/b", "GPU kernels", "cuda");

        assert!(starred.richness() > bare.richness());
        assert!(described.richness() > starred.richness());
    }
}
