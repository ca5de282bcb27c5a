//! Dedup, classify, score and rank a batch of raw hits.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Catalog, Config, RawHit, Resource};
use crate::utils::short_id;

use super::classify::Classifier;
use super::fingerprint::fingerprint;
use super::language::detect_language;
use super::recommend::Recommender;
use super::score::Scorer;

/// Turns one run's raw hits into a ranked catalog.
///
/// Stateless between calls: every `aggregate` starts from an empty set of
/// fingerprints.
#[derive(Debug, Clone)]
pub struct Aggregator {
    classifier: Classifier,
    scorer: Scorer,
    recommender: Recommender,
}

impl Aggregator {
    pub fn new(classifier: Classifier, scorer: Scorer) -> Self {
        let recommender = Recommender::new(scorer.clone());
        Self {
            classifier,
            scorer,
            recommender,
        }
    }

    /// Build from configuration with `now` as the recency reference.
    pub fn from_config(config: &Config, now: DateTime<Utc>) -> Result<Self> {
        let classifier = Classifier::from_config(&config.classifier)?;
        let scorer = Scorer::new(config.scoring.clone(), now);
        Ok(Self::new(classifier, scorer))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Aggregate hits into a catalog sorted by descending score.
    ///
    /// Hits without a URL are dropped and counted. Hits sharing a
    /// fingerprint collapse into one group whose representative is the
    /// first-seen hit unless a later one has strictly richer metadata.
    pub fn aggregate(&self, hits: &[RawHit]) -> Catalog {
        let mut dropped = 0;
        let mut duplicates = 0;
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, &RawHit)> = Vec::new();

        for hit in hits {
            if !hit.has_url() {
                dropped += 1;
                continue;
            }

            let key = fingerprint(&hit.url);
            match slots.get(&key) {
                Some(&slot) => {
                    duplicates += 1;
                    let representative = &mut groups[slot].1;
                    if hit.richness() > representative.richness() {
                        *representative = hit;
                    }
                }
                None => {
                    slots.insert(key.clone(), groups.len());
                    groups.push((key, hit));
                }
            }
        }

        let mut resources: Vec<Resource> = groups
            .into_iter()
            .map(|(key, hit)| self.build_resource(hit, key))
            .collect();

        // Stable: equal scores keep discovery order.
        resources.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));

        if dropped > 0 {
            log::debug!("Dropped {} hits without a URL", dropped);
        }
        log::info!(
            "Aggregated {} hits into {} resources ({} duplicates, {} dropped)",
            hits.len(),
            resources.len(),
            duplicates,
            dropped
        );

        Catalog {
            resources,
            dropped,
            duplicates,
        }
    }

    /// Classify, score and describe one representative hit.
    pub fn build_resource(&self, hit: &RawHit, dedup_key: String) -> Resource {
        let category = self.classifier.classify(hit);
        let signals = self.scorer.signals(hit);
        let quality_score = self.scorer.score_signals(&signals, category);
        let recommendation = self
            .recommender
            .compose(&signals, hit, category, quality_score);

        Resource {
            id: short_id(&dedup_key),
            title: hit.title.trim().to_string(),
            url: hit.url.trim().to_string(),
            description: hit.description.trim().to_string(),
            source: hit.source,
            keyword: hit.keyword.clone(),
            category,
            quality_score,
            recommendation,
            dedup_key,
            language: detect_language(&hit.title, &hit.description),
            stars: hit.stars,
            programming_language: hit.language.clone(),
            updated_at: hit.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ScoringConfig, Source};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn aggregator() -> Aggregator {
        Aggregator::new(
            Classifier::default(),
            Scorer::new(ScoringConfig::default(), now()),
        )
    }

    fn web(title: &str, url: &str, description: &str) -> RawHit {
        RawHit::new(Source::DuckDuckGo, title, url, description, "cuda")
    }

    #[test]
    fn test_trailing_slash_duplicates_collapse_to_code() {
        let updated = now() - Duration::days(182);
        let hits = vec![
            RawHit::new(Source::GitHub, "a/b", "https://github.com/a/b", "", "cuda")
                .with_stars(1000)
                .with_updated_at(updated),
            RawHit::new(Source::GitHub, "a/b", "https://github.com/a/b/", "", "cuda")
                .with_stars(1000)
                .with_updated_at(updated),
        ];

        let catalog = aggregator().aggregate(&hits);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.duplicates, 1);
        assert_eq!(catalog.resources[0].category, Category::Code);
        assert_eq!(catalog.resources[0].url, "https://github.com/a/b");
    }

    #[test]
    fn test_empty_hit_produces_nothing() {
        let catalog = aggregator().aggregate(&[web("", "", "")]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.dropped, 1);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let catalog = aggregator().aggregate(&[]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.dropped, 0);
    }

    #[test]
    fn test_richer_duplicate_becomes_representative() {
        let hits = vec![
            web("Guide", "https://example.com/guide", ""),
            web("Guide", "https://example.com/guide#top", "A thorough guide"),
        ];
        let catalog = aggregator().aggregate(&hits);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resources[0].description, "A thorough guide");
        assert_eq!(catalog.resources[0].url, "https://example.com/guide#top");
    }

    #[test]
    fn test_equal_richness_keeps_first_seen() {
        let hits = vec![
            web("First", "https://example.com/p", "desc one"),
            web("Second", "https://example.com/p/", "desc two"),
        ];
        let catalog = aggregator().aggregate(&hits);
        assert_eq!(catalog.resources[0].title, "First");
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let hits = vec![
            web("low one", "https://example.com/1", ""),
            web(
                "CUDA Official Docs",
                "https://docs.nvidia.com/cuda/",
                "Official CUDA documentation",
            ),
            web("low two", "https://example.com/2", ""),
        ];
        let catalog = aggregator().aggregate(&hits);
        let titles: Vec<&str> = catalog.resources.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["CUDA Official Docs", "low one", "low two"]);
        assert_eq!(catalog.resources[0].category, Category::Docs);
        assert!(catalog.resources[0].quality_score >= 3);
    }

    #[test]
    fn test_resource_carries_metadata() {
        let hit = RawHit::new(
            Source::GitHub,
            "NVIDIA/cuda-samples",
            "https://github.com/NVIDIA/cuda-samples",
            "Samples for CUDA developers",
            "CUDA programming tutorial",
        )
        .with_stars(5000)
        .with_language("C++");

        let catalog = aggregator().aggregate(&[hit]);
        let resource = &catalog.resources[0];
        assert_eq!(resource.id, short_id(&resource.dedup_key));
        assert_eq!(resource.stars, Some(5000));
        assert_eq!(resource.programming_language.as_deref(), Some("C++"));
        assert_eq!(resource.keyword, "CUDA programming tutorial");
        assert!(!resource.recommendation.is_empty());
    }

    #[test]
    fn test_runs_are_independent() {
        let agg = aggregator();
        let hits = vec![web("Guide", "https://example.com/guide", "")];
        assert_eq!(agg.aggregate(&hits), agg.aggregate(&hits));
    }
}
