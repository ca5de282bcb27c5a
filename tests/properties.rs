//! Property tests for the resource engine.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use harvester::models::{Category, Config, RawHit, Source};
use harvester::pipeline::{Aggregator, MAX_SCORE, MIN_SCORE, Signals, fingerprint};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn aggregator() -> Aggregator {
    Aggregator::from_config(&Config::default(), now()).unwrap()
}

fn source() -> impl Strategy<Value = Source> {
    prop_oneof![Just(Source::DuckDuckGo), Just(Source::GitHub)]
}

fn category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

fn url() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
        1 => "[a-z ]{1,12}",
        8 => (
            prop_oneof![
                Just("https://github.com"),
                Just("http://GitHub.com"),
                Just("https://docs.nvidia.com"),
                Just("https://example.com"),
                Just("https://mit.edu"),
                Just("https://medium.com"),
                Just("https://stackoverflow.com"),
            ],
            "(/[a-c]{1,2}){0,3}",
            prop_oneof![Just(""), Just("/"), Just("#frag"), Just("?utm_source=x")],
        )
            .prop_map(|(host, path, suffix)| format!("{host}{path}{suffix}")),
    ]
}

prop_compose! {
    fn raw_hit()(
        source in source(),
        title in "[a-zA-Z 课程书]{0,24}",
        url in url(),
        description in "[a-z ,]{0,40}",
        stars in proptest::option::of(0u64..200_000),
        age_days in proptest::option::of(0i64..2_000),
        keyword in "[a-z]{1,8}",
    ) -> RawHit {
        let mut hit = RawHit::new(source, title, url, description, keyword);
        hit.stars = stars;
        hit.updated_at = age_days.map(|d| now() - Duration::days(d));
        hit
    }
}

/// Position of the first hit in each fingerprint group.
fn discovery_index(hits: &[RawHit]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, hit) in hits.iter().enumerate() {
        if hit.has_url() {
            index.entry(fingerprint(&hit.url)).or_insert(i);
        }
    }
    index
}

proptest! {
    #[test]
    fn engine_is_deterministic(hit in raw_hit(), category in category()) {
        let agg = aggregator();
        let first_category = agg.classifier().classify(&hit);
        let first_score = agg.scorer().score(&hit, category);
        let first_text = agg.recommender().recommend(&hit, category, first_score);

        for _ in 0..3 {
            prop_assert_eq!(agg.classifier().classify(&hit), first_category);
            prop_assert_eq!(agg.scorer().score(&hit, category), first_score);
            prop_assert_eq!(
                agg.recommender().recommend(&hit, category, first_score),
                first_text.clone()
            );
        }
    }

    #[test]
    fn score_is_bounded(hit in raw_hit(), category in category()) {
        let score = aggregator().scorer().score(&hit, category);
        prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
    }

    #[test]
    fn score_is_monotonic_in_signals(
        base in (0.0f64..3.0, 0.0f64..1.0, 0.0f64..2.0, 0.0f64..1.0),
        delta in (0.0f64..3.0, 0.0f64..1.0, 0.0f64..2.0, 0.0f64..1.0),
        category in category(),
    ) {
        let agg = aggregator();
        let low = Signals {
            authority: base.0,
            recency: base.1,
            reputation: base.2,
            completeness: base.3,
        };
        let high = Signals {
            authority: base.0 + delta.0,
            recency: base.1 + delta.1,
            reputation: base.2 + delta.2,
            completeness: base.3 + delta.3,
        };
        prop_assert!(
            agg.scorer().score_signals(&high, category) >= agg.scorer().score_signals(&low, category)
        );
    }

    #[test]
    fn adding_recency_or_stars_never_lowers_score(hit in raw_hit(), category in category()) {
        let agg = aggregator();
        let before = agg.scorer().score(&hit, category);

        let recent = RawHit { updated_at: Some(now() - Duration::days(1)), ..hit.clone() };
        prop_assert!(agg.scorer().score(&recent, category) >= before);

        let starred = RawHit { stars: Some(hit.stars.unwrap_or(0) + 1_000), ..hit.clone() };
        prop_assert!(agg.scorer().score(&starred, category) >= before);
    }

    #[test]
    fn reputable_host_never_lowers_score(
        hit in raw_hit(),
        path in "(/[a-z]{1,4}){0,2}",
        category in category(),
    ) {
        let agg = aggregator();
        let plain = RawHit { url: format!("https://example.com{path}"), ..hit.clone() };
        let official = RawHit { url: format!("https://developer.nvidia.com{path}"), ..hit };
        prop_assert!(
            agg.scorer().score(&official, category) >= agg.scorer().score(&plain, category)
        );
    }

    #[test]
    fn aggregate_is_idempotent_under_duplication(hits in prop::collection::vec(raw_hit(), 0..20)) {
        let agg = aggregator();
        let once = agg.aggregate(&hits);

        let doubled: Vec<RawHit> = hits.iter().chain(hits.iter()).cloned().collect();
        let twice = agg.aggregate(&doubled);

        prop_assert_eq!(once.resources, twice.resources);
    }

    #[test]
    fn aggregate_sort_is_stable(hits in prop::collection::vec(raw_hit(), 0..20)) {
        let catalog = aggregator().aggregate(&hits);
        let index = discovery_index(&hits);

        for pair in catalog.resources.windows(2) {
            prop_assert!(pair[0].quality_score >= pair[1].quality_score);
            if pair[0].quality_score == pair[1].quality_score {
                prop_assert!(index[&pair[0].dedup_key] < index[&pair[1].dedup_key]);
            }
        }
    }

    #[test]
    fn hits_without_url_never_become_resources(hits in prop::collection::vec(raw_hit(), 0..20)) {
        let catalog = aggregator().aggregate(&hits);
        let missing = hits.iter().filter(|h| !h.has_url()).count();

        prop_assert_eq!(catalog.dropped, missing);
        prop_assert!(catalog.resources.iter().all(|r| !r.url.trim().is_empty()));
        prop_assert_eq!(
            catalog.resources.len() + catalog.duplicates + catalog.dropped,
            hits.len()
        );
    }

    #[test]
    fn fingerprint_is_total_and_stable(raw in "\\PC{0,40}") {
        prop_assert_eq!(fingerprint(&raw), fingerprint(&raw));
    }
}

#[test]
fn scenario_trailing_slash_variants_collapse_to_one_code_resource() {
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
    assert_eq!(catalog.resources[0].category, Category::Code);
}

#[test]
fn scenario_fully_empty_hit_yields_nothing() {
    let catalog = aggregator().aggregate(&[RawHit::new(Source::DuckDuckGo, "", "", "", "")]);
    assert!(catalog.is_empty());
}

#[test]
fn scenario_official_docs_score_at_least_three() {
    let hit = RawHit::new(
        Source::DuckDuckGo,
        "CUDA Official Docs",
        "https://docs.nvidia.com/cuda/",
        "Official CUDA documentation",
        "cuda",
    );
    let catalog = aggregator().aggregate(&[hit]);
    let resource = &catalog.resources[0];
    assert_eq!(resource.category, Category::Docs);
    assert!(resource.quality_score >= 3);
}

#[test]
fn scenario_described_duplicate_is_representative() {
    let hits = vec![
        RawHit::new(Source::DuckDuckGo, "CUDA guide", "https://example.com/guide/", "", "cuda"),
        RawHit::new(
            Source::DuckDuckGo,
            "CUDA guide",
            "https://example.com/guide",
            "Step by step CUDA guide",
            "cuda",
        ),
    ];
    let catalog = aggregator().aggregate(&hits);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.resources[0].description, "Step by step CUDA guide");
}
