// src/pipeline/search.rs

//! End-to-end search run: collect, aggregate, export.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Catalog, Config};
use crate::services::CollectorPlan;
use crate::storage::{CatalogStorage, ExportOptions, WriteMetadata};
use crate::utils::report;

use super::aggregate::Aggregator;
use super::collect::collect_all;

/// Everything a caller needs to report on a finished run.
#[derive(Debug)]
pub struct SearchReport {
    pub catalog: Catalog,
    pub hit_count: usize,
    pub query_total: usize,
    pub query_failures: usize,
    pub write: WriteMetadata,
}

/// Run one independent search.
///
/// `now` is the reference time for recency scoring.
pub async fn run_search(
    config: &Config,
    storage: &dyn CatalogStorage,
    plans: &[CollectorPlan],
    now: DateTime<Utc>,
) -> Result<SearchReport> {
    let aggregator = Aggregator::from_config(config, now)?;

    report::step(1, 3, "Collecting search results");
    let outcome = collect_all(
        plans,
        config.search.max_concurrent,
        Duration::from_millis(config.search.request_delay_ms),
    )
    .await;
    report::sub_item(&format!(
        "{} hits from {} queries ({} failed)",
        outcome.hits.len(),
        outcome.query_total,
        outcome.query_failures
    ));
    for (source, count) in &outcome.per_source {
        report::sub_item(&format!("{source}: {count}"));
    }

    report::step(2, 3, "Classifying and scoring");
    let catalog = aggregator.aggregate(&outcome.hits);
    report::sub_item(&format!(
        "{} unique resources ({} duplicates, {} without URL)",
        catalog.len(),
        catalog.duplicates,
        catalog.dropped
    ));

    report::step(3, 3, "Exporting catalog");
    let write = storage
        .write_catalog(&catalog, &ExportOptions::from_config(config))
        .await?;
    report::success(&format!(
        "Saved {} resources to {}",
        write.exported_count,
        write.json_path.display()
    ));
    if let Some(csv_path) = &write.csv_path {
        report::sub_item(&format!("CSV backup: {}", csv_path.display()));
    }

    Ok(SearchReport {
        hit_count: outcome.hits.len(),
        query_total: outcome.query_total,
        query_failures: outcome.query_failures,
        catalog,
        write,
    })
}
