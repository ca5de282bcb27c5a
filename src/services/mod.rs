//! Search providers that feed raw hits into the engine.
//!
//! - DuckDuckGo HTML web search (`DuckDuckGoCollector`)
//! - GitHub repository search (`GitHubCollector`)

mod duckduckgo;
mod github;

pub use duckduckgo::DuckDuckGoCollector;
pub use github::GitHubCollector;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{RawHit, SearchConfig, Source};

/// A search provider queried once per keyword.
#[async_trait]
pub trait SearchCollector: Send + Sync {
    /// Provider this collector tags its hits with.
    fn source(&self) -> Source;

    /// Run one keyword query. An empty result is not an error.
    async fn search(&self, keyword: &str) -> Result<Vec<RawHit>>;
}

/// A collector and the keywords it should be queried with.
pub struct CollectorPlan {
    pub collector: Box<dyn SearchCollector>,
    pub keywords: Vec<String>,
}

impl CollectorPlan {
    pub fn new(collector: Box<dyn SearchCollector>, keywords: Vec<String>) -> Self {
        Self {
            collector,
            keywords,
        }
    }
}

/// Build the enabled providers with their keyword lists.
///
/// DuckDuckGo receives Chinese and English keywords; GitHub only English
/// ones. `extra_keywords` are appended to both.
pub fn default_plans(
    config: &SearchConfig,
    client: &Client,
    extra_keywords: &[String],
) -> Vec<CollectorPlan> {
    let mut plans = Vec::new();

    if config.duckduckgo {
        let mut keywords = config.all_keywords();
        keywords.extend(extra_keywords.iter().cloned());
        plans.push(CollectorPlan::new(
            Box::new(DuckDuckGoCollector::new(client.clone(), config.max_results)),
            keywords,
        ));
    }

    if config.github {
        let mut keywords = config.keywords_en.clone();
        keywords.extend(extra_keywords.iter().cloned());
        plans.push(CollectorPlan::new(
            Box::new(GitHubCollector::new(
                client.clone(),
                config.min_stars,
                config.per_page,
                config.resolved_github_token(),
            )),
            keywords,
        ));
    }

    plans
}
