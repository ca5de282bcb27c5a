// src/services/duckduckgo.rs

//! DuckDuckGo HTML search collector.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{RawHit, Source};
use crate::utils::http::fetch_text;
use crate::utils::url::{query_param, resolve_url};

use super::SearchCollector;

const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const ROW_SELECTOR: &str = "div.result";
const LINK_SELECTOR: &str = "a.result__a";
const SNIPPET_SELECTOR: &str = ".result__snippet";

/// Web search via DuckDuckGo's HTML endpoint.
pub struct DuckDuckGoCollector {
    client: Client,
    endpoint: String,
    max_results: usize,
}

impl DuckDuckGoCollector {
    pub fn new(client: Client, max_results: usize) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results,
        }
    }

    /// Point the collector at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Extract up to `max_results` hits from a result page.
    pub fn parse_results(
        &self,
        html: &str,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<RawHit>> {
        let base = Url::parse(&self.endpoint)?;
        extract_hits(html, &base, keyword, max_results)
    }
}

#[async_trait]
impl SearchCollector for DuckDuckGoCollector {
    fn source(&self) -> Source {
        Source::DuckDuckGo
    }

    async fn search(&self, keyword: &str) -> Result<Vec<RawHit>> {
        let request = self.client.get(&self.endpoint).query(&[("q", keyword)]);
        let html = fetch_text(request)
            .await
            .map_err(|e| AppError::collect(Source::DuckDuckGo.as_str(), e))?;
        let hits = self.parse_results(&html, keyword, self.max_results)?;
        log::debug!("DuckDuckGo '{}': {} hits", keyword, hits.len());
        Ok(hits)
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Unwrap `/l/?uddg=<target>` redirect links to their target.
fn unwrap_redirect(link: &str) -> String {
    Url::parse(link)
        .ok()
        .filter(|u| u.path().starts_with("/l/"))
        .and_then(|u| query_param(&u, "uddg"))
        .unwrap_or_else(|| link.to_string())
}

fn extract_hits(html: &str, base: &Url, keyword: &str, max_results: usize) -> Result<Vec<RawHit>> {
    let row_sel = parse_selector(ROW_SELECTOR)?;
    let link_sel = parse_selector(LINK_SELECTOR)?;
    let snippet_sel = parse_selector(SNIPPET_SELECTOR)?;

    let document = Html::parse_document(html);
    let mut hits = Vec::new();

    for row in document.select(&row_sel) {
        if hits.len() >= max_results {
            break;
        }
        if row.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = row.select(&link_sel).next() else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            continue;
        }

        let url = unwrap_redirect(&resolve_url(base, href));
        let title = element_text(&link);
        let description = row
            .select(&snippet_sel)
            .next()
            .map(|s| element_text(&s))
            .unwrap_or_default();

        hits.push(RawHit::new(Source::DuckDuckGo, title, url, description, keyword));
    }

    Ok(hits)
}
