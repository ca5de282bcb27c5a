// src/pipeline/collect.rs

//! Concurrent driver over all search collectors.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::models::{RawHit, Source};
use crate::services::CollectorPlan;

/// Summary of a collection run.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Hits in discovery order: collector, then keyword, then provider rank
    pub hits: Vec<RawHit>,
    pub query_total: usize,
    pub query_failures: usize,
    pub per_source: BTreeMap<Source, usize>,
}

/// Query every collector with each of its keywords.
///
/// Up to `concurrency` queries run at once but results are consumed in job
/// order, so the hit sequence is deterministic. A failed query is logged
/// and counted, never fatal.
pub async fn collect_all(
    plans: &[CollectorPlan],
    concurrency: usize,
    delay: Duration,
) -> CollectOutcome {
    let jobs: Vec<_> = plans
        .iter()
        .flat_map(|plan| {
            plan.keywords
                .iter()
                .map(move |keyword| (plan.collector.as_ref(), keyword.as_str()))
        })
        .collect();

    let mut outcome = CollectOutcome {
        query_total: jobs.len(),
        ..CollectOutcome::default()
    };

    let mut results = stream::iter(jobs)
        .map(|(collector, keyword)| async move {
            let result = collector.search(keyword).await;
            (collector.source(), keyword, result)
        })
        .buffered(concurrency.max(1));

    while let Some((source, keyword, result)) = results.next().await {
        match result {
            Ok(hits) => {
                *outcome.per_source.entry(source).or_default() += hits.len();
                outcome.hits.extend(hits);
            }
            Err(error) => {
                outcome.query_failures += 1;
                log::warn!("{} query '{}' failed: {}", source, keyword, error);
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    log::info!(
        "Collected {} hits from {} queries ({} failed)",
        outcome.hits.len(),
        outcome.query_total,
        outcome.query_failures
    );

    outcome
}
