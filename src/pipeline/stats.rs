//! Catalog statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Category, Language, Resource, Source};

/// Score at or above which a resource counts as high quality.
pub const HIGH_QUALITY_SCORE: u8 = 4;

/// Summary counters for a set of resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogStats {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_language: BTreeMap<Language, usize>,
    pub by_source: BTreeMap<Source, usize>,
    pub average_score: f64,
    pub max_score: u8,
    /// Zero when there are no resources
    pub min_score: u8,
    pub high_quality: usize,
}

impl CatalogStats {
    pub fn from_resources(resources: &[Resource]) -> Self {
        let mut stats = Self {
            total: resources.len(),
            ..Self::default()
        };
        if resources.is_empty() {
            return stats;
        }

        let mut score_sum = 0u64;
        stats.min_score = u8::MAX;
        for resource in resources {
            *stats.by_category.entry(resource.category).or_default() += 1;
            *stats.by_language.entry(resource.language).or_default() += 1;
            *stats.by_source.entry(resource.source).or_default() += 1;
            score_sum += u64::from(resource.quality_score);
            stats.max_score = stats.max_score.max(resource.quality_score);
            stats.min_score = stats.min_score.min(resource.quality_score);
            if resource.quality_score >= HIGH_QUALITY_SCORE {
                stats.high_quality += 1;
            }
        }
        stats.average_score = score_sum as f64 / resources.len() as f64;

        stats
    }
}

/// The first `n` resources by descending score, ties in input order.
pub fn top_resources(resources: &[Resource], n: usize) -> Vec<&Resource> {
    let mut ranked: Vec<&Resource> = resources.iter().collect();
    ranked.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
    ranked.truncate(n);
    ranked
}
