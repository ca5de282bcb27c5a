//! GitHub repository search collector.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{RawHit, Source};
use crate::utils::http::fetch_text;

use super::SearchCollector;

const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    html_url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    fn into_hit(self, keyword: &str) -> RawHit {
        let mut hit = RawHit::new(
            Source::GitHub,
            self.full_name,
            self.html_url,
            self.description.unwrap_or_default(),
            keyword,
        )
        .with_stars(self.stargazers_count);
        hit.updated_at = self.updated_at;
        hit.language = self.language;
        hit
    }
}

/// Repository search via the GitHub REST API.
pub struct GitHubCollector {
    client: Client,
    api_base: String,
    min_stars: u64,
    per_page: u32,
    token: Option<String>,
}

impl GitHubCollector {
    pub fn new(client: Client, min_stars: u64, per_page: u32, token: Option<String>) -> Self {
        Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            min_stars,
            per_page,
            token,
        }
    }

    /// Point the collector at a different API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn query(&self, keyword: &str) -> String {
        format!("{} stars:>={}", keyword, self.min_stars)
    }

    /// Map a `/search/repositories` response body to hits.
    pub fn parse_response(json: &str, keyword: &str) -> Result<Vec<RawHit>> {
        let response: SearchResponse = serde_json::from_str(json)?;
        Ok(response
            .items
            .into_iter()
            .map(|repo| repo.into_hit(keyword))
            .collect())
    }
}

#[async_trait]
impl SearchCollector for GitHubCollector {
    fn source(&self) -> Source {
        Source::GitHub
    }

    async fn search(&self, keyword: &str) -> Result<Vec<RawHit>> {
        let url = format!("{}/search/repositories", self.api_base.trim_end_matches('/'));
        let per_page = self.per_page.to_string();
        let query = self.query(keyword);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body = fetch_text(request)
            .await
            .map_err(|e| AppError::collect(Source::GitHub.as_str(), e))?;
        let hits = Self::parse_response(&body, keyword)?;
        log::debug!("GitHub '{}': {} repositories", keyword, hits.len());
        Ok(hits)
    }
}
