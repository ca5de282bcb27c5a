//! Catalog export.
//!
//! The engine hands over its full, unfiltered catalog; the minimum-score and
//! category filters live here.
//!
//! ## Directory Structure
//!
//! ```text
//! {output_dir}/
//! ├── learning_resources.json   # Catalog with per-category index
//! └── learning_resources.csv    # Flat backup copy (optional)
//! ```

mod csv;
pub mod local;

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Catalog, Category, Config, Resource, partition};
use crate::pipeline::{CatalogStats, top_resources};

/// Number of resource ids kept in the exported top list.
pub const EXPORT_TOP_N: usize = 20;

pub use csv::render_csv;
pub use local::LocalStorage;

/// Exporter-side filters and output switches.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Resources scoring below this are not written
    pub min_quality_score: u8,
    /// Allowed categories; empty allows all
    pub categories: Vec<Category>,
    pub csv_backup: bool,
    pub file_stem: String,
}

impl ExportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_quality_score: config.filters.min_quality_score,
            categories: config.filters.categories.clone(),
            csv_backup: config.output.csv_backup,
            file_stem: config.output.file_stem.clone(),
        }
    }

    /// True if the resource passes both filters.
    pub fn admits(&self, resource: &Resource) -> bool {
        resource.quality_score >= self.min_quality_score
            && (self.categories.is_empty() || self.categories.contains(&resource.category))
    }

    /// Admitted resources in catalog order.
    pub fn select<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Resource> {
        catalog.resources.iter().filter(|r| self.admits(r)).collect()
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Metadata about a catalog write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    pub exported_count: usize,
    /// Resources excluded by the export filters
    pub filtered_out: usize,
    pub json_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    /// `generated_at` of the written file
    pub timestamp: DateTime<Utc>,
}

/// On-disk catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    /// Hits the engine dropped for a missing URL
    pub dropped: usize,
    pub min_quality_score: u8,
    pub resources: Vec<Resource>,
    /// Category to resource ids, in score order
    pub categories: BTreeMap<Category, Vec<String>>,
    /// Summary of the exported resources
    #[serde(default)]
    pub stats: CatalogStats,
    /// Ids of the highest scoring resources
    #[serde(default)]
    pub top: Vec<String>,
}

impl CatalogFile {
    pub fn new(resources: Vec<Resource>, dropped: usize, min_quality_score: u8) -> Self {
        let categories: BTreeMap<Category, Vec<String>> = partition(&resources)
            .into_iter()
            .map(|(category, items)| (category, items.iter().map(|r| r.id.clone()).collect()))
            .collect();
        let stats = CatalogStats::from_resources(&resources);
        let top = top_resources(&resources, EXPORT_TOP_N)
            .into_iter()
            .map(|r| r.id.clone())
            .collect();

        Self {
            generated_at: Utc::now(),
            count: resources.len(),
            dropped,
            min_quality_score,
            resources,
            categories,
            stats,
            top,
        }
    }
}

/// Trait for catalog storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Write the filtered catalog, replacing any previous export.
    async fn write_catalog(
        &self,
        catalog: &Catalog,
        options: &ExportOptions,
    ) -> Result<WriteMetadata>;

    /// Load a previously written catalog, `None` if it does not exist.
    async fn load_catalog(&self, file_stem: &str) -> Result<Option<CatalogFile>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Source};

    fn resource(id: &str, category: Category, score: u8) -> Resource {
        Resource {
            id: id.to_string(),
            title: id.to_string(),
            url: format!("https://example.com/{id}"),
            description: String::new(),
            source: Source::DuckDuckGo,
            keyword: "cuda".to_string(),
            category,
            quality_score: score,
            recommendation: String::new(),
            dedup_key: format!("https://example.com/{id}"),
            language: Language::En,
            stars: None,
            programming_language: None,
            updated_at: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            resources: vec![
                resource("a", Category::Docs, 5),
                resource("b", Category::Code, 3),
                resource("c", Category::Blog, 2),
            ],
            ..Catalog::default()
        }
    }

    #[test]
    fn test_min_score_filter() {
        let options = ExportOptions::default();
        let catalog = catalog();
        let ids: Vec<&str> = options.select(&catalog).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_category_filter() {
        let options = ExportOptions {
            min_quality_score: 1,
            categories: vec![Category::Code, Category::Blog],
            ..ExportOptions::default()
        };
        let catalog = catalog();
        let ids: Vec<&str> = options.select(&catalog).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_catalog_file_category_index() {
        let file = CatalogFile::new(catalog().resources, 2, 1);
        assert_eq!(file.count, 3);
        assert_eq!(file.dropped, 2);
        assert_eq!(file.categories[&Category::Docs], vec!["a".to_string()]);
        assert!(!file.categories.contains_key(&Category::Book));
        assert_eq!(file.stats.total, 3);
        assert_eq!(file.stats.min_score, 2);
        assert_eq!(file.top, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_catalog_file_top_list_is_capped() {
        let resources: Vec<Resource> = (0..EXPORT_TOP_N + 5)
            .map(|i| resource(&format!("r{i}"), Category::Website, 3))
            .collect();
        let file = CatalogFile::new(resources, 0, 1);
        assert_eq!(file.top.len(), EXPORT_TOP_N);
        assert_eq!(file.top[0], "r0");
    }
}
