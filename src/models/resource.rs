//! Classified, scored resource records and the per-run catalog.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hit::Source;

/// Resource type assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Book,
    Course,
    Blog,
    Code,
    Docs,
    Forum,
    Whitepaper,
    Website,
    Uncategorized,
}

impl Category {
    /// Every category, in export order.
    pub const ALL: [Category; 9] = [
        Category::Book,
        Category::Course,
        Category::Blog,
        Category::Code,
        Category::Docs,
        Category::Forum,
        Category::Whitepaper,
        Category::Website,
        Category::Uncategorized,
    ];

    /// Stable lowercase identifier (matches the serde form).
    pub fn id(&self) -> &'static str {
        match self {
            Category::Book => "book",
            Category::Course => "course",
            Category::Blog => "blog",
            Category::Code => "code",
            Category::Docs => "docs",
            Category::Forum => "forum",
            Category::Whitepaper => "whitepaper",
            Category::Website => "website",
            Category::Uncategorized => "uncategorized",
        }
    }

    /// Noun used when composing recommendation sentences.
    pub fn noun(&self) -> &'static str {
        match self {
            Category::Book => "book",
            Category::Course => "course",
            Category::Blog => "blog post",
            Category::Code => "code repository",
            Category::Docs => "documentation",
            Category::Forum => "discussion thread",
            Category::Whitepaper => "technical paper",
            Category::Website => "website",
            Category::Uncategorized => "resource",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Natural language of a resource's title and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
    Mixed,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Mixed => "mixed",
            Language::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized catalog entry. Built once by the aggregator, then read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Short stable identifier derived from `dedup_key`
    pub id: String,

    pub title: String,
    pub url: String,
    pub description: String,
    pub source: Source,
    pub keyword: String,

    /// Exactly one category, never absent
    pub category: Category,

    /// Integer quality score in `1..=5`
    pub quality_score: u8,

    /// Templated justification for the score
    pub recommendation: String,

    /// Normalized URL the resource was deduplicated on
    pub dedup_key: String,

    /// Detected natural language
    pub language: Language,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programming_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Output of one aggregation run.
///
/// Resources are sorted by descending score with ties in discovery order.
/// Nothing here outlives the run; a new search builds a new catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub resources: Vec<Resource>,

    /// Hits excluded for a missing URL
    pub dropped: usize,

    /// Hits collapsed into an earlier fingerprint group
    pub duplicates: usize,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Partition by category, preserving the sorted order within each bucket.
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&Resource>> {
        partition(&self.resources)
    }
}

/// Group resources by category without reordering them.
pub fn partition(resources: &[Resource]) -> BTreeMap<Category, Vec<&Resource>> {
    let mut buckets: BTreeMap<Category, Vec<&Resource>> = BTreeMap::new();
    for resource in resources {
        buckets.entry(resource.category).or_default().push(resource);
    }
    buckets
}
