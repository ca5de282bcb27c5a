//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Category;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search provider settings and keywords
    #[serde(default)]
    pub search: SearchConfig,

    /// Quality score tunables
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Ordered classification rules
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Export destination
    #[serde(default)]
    pub output: OutputConfig,

    /// Export-time filters
    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.user_agent.trim().is_empty() {
            return Err(AppError::validation("search.user_agent is empty"));
        }
        if search.timeout_secs == 0 {
            return Err(AppError::validation("search.timeout_secs must be > 0"));
        }
        if search.max_concurrent == 0 {
            return Err(AppError::validation("search.max_concurrent must be > 0"));
        }
        if search.keywords_zh.is_empty() && search.keywords_en.is_empty() {
            return Err(AppError::validation("No search keywords defined"));
        }

        self.scoring.validate()?;

        for rule in &self.classifier.rules {
            if !rule.has_criteria() {
                return Err(AppError::validation(format!(
                    "classifier rule '{}' has no match criteria",
                    rule.name
                )));
            }
        }

        if !(1..=5).contains(&self.filters.min_quality_score) {
            return Err(AppError::validation(
                "filters.min_quality_score must be within 1..=5",
            ));
        }
        if self.output.file_stem.trim().is_empty() {
            return Err(AppError::validation("output.file_stem is empty"));
        }
        Ok(())
    }
}

/// Search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Chinese keywords (web search only)
    #[serde(default = "defaults::keywords_zh")]
    pub keywords_zh: Vec<String>,

    /// English keywords (web and repository search)
    #[serde(default = "defaults::keywords_en")]
    pub keywords_en: Vec<String>,

    /// Maximum web results kept per keyword
    #[serde(default = "defaults::max_results")]
    pub max_results: usize,

    /// Minimum stargazers for repository search
    #[serde(default = "defaults::min_stars")]
    pub min_stars: u64,

    /// Repository results requested per keyword
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    #[serde(default = "defaults::enabled")]
    pub duckduckgo: bool,

    #[serde(default = "defaults::enabled")]
    pub github: bool,

    /// Optional GitHub API token; `GITHUB_TOKEN` is used when unset
    #[serde(default)]
    pub github_token: Option<String>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between completed queries in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum queries in flight
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl SearchConfig {
    /// Chinese then English keywords, as queried on the web provider.
    pub fn all_keywords(&self) -> Vec<String> {
        self.keywords_zh
            .iter()
            .chain(self.keywords_en.iter())
            .cloned()
            .collect()
    }

    /// Token from config, falling back to the environment.
    pub fn resolved_github_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords_zh: defaults::keywords_zh(),
            keywords_en: defaults::keywords_en(),
            max_results: defaults::max_results(),
            min_stars: defaults::min_stars(),
            per_page: defaults::per_page(),
            duckduckgo: true,
            github: true,
            github_token: None,
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Weights and thresholds for the quality scorer.
///
/// Every weight must be non-negative so that each signal can only raise
/// the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Constant starting point of every score
    #[serde(default = "defaults::base")]
    pub base: f64,

    /// Flat authority credit for web search hits
    #[serde(default = "defaults::web_baseline")]
    pub web_baseline: f64,

    /// Multiplier on `ln(1 + stars)` for repository hits
    #[serde(default = "defaults::stars_weight")]
    pub stars_weight: f64,

    /// Cap on the authority signal
    #[serde(default = "defaults::max_authority")]
    pub max_authority: f64,

    /// Updates within this many days earn the recency bonus
    #[serde(default = "defaults::recency_window_days")]
    pub recency_window_days: i64,

    #[serde(default = "defaults::recency_bonus")]
    pub recency_bonus: f64,

    #[serde(default = "defaults::reputation_bonus")]
    pub reputation_bonus: f64,

    /// Authoritative hosts. `.edu` style entries match any host with that
    /// suffix; other entries match the host or any of its subdomains.
    #[serde(default = "defaults::reputable_domains")]
    pub reputable_domains: Vec<String>,

    #[serde(default = "defaults::description_bonus")]
    pub description_bonus: f64,

    /// Descriptions shorter than this (in graphemes) earn nothing
    #[serde(default = "defaults::min_description_length")]
    pub min_description_length: usize,

    #[serde(default = "defaults::title_bonus")]
    pub title_bonus: f64,

    /// Titles must be strictly longer than this (in graphemes)
    #[serde(default = "defaults::min_title_length")]
    pub min_title_length: usize,

    /// Star count at which a repository is called "highly starred"
    #[serde(default = "defaults::highly_starred")]
    pub highly_starred: u64,

    /// Optional per-category credit
    #[serde(default)]
    pub category_weights: BTreeMap<Category, f64>,
}

impl ScoringConfig {
    fn validate(&self) -> Result<()> {
        let weights = [
            ("base", self.base),
            ("web_baseline", self.web_baseline),
            ("stars_weight", self.stars_weight),
            ("max_authority", self.max_authority),
            ("recency_bonus", self.recency_bonus),
            ("reputation_bonus", self.reputation_bonus),
            ("description_bonus", self.description_bonus),
            ("title_bonus", self.title_bonus),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::validation(format!(
                    "scoring.{name} must be a non-negative number"
                )));
            }
        }
        for (category, value) in &self.category_weights {
            if !value.is_finite() || *value < 0.0 {
                return Err(AppError::validation(format!(
                    "scoring.category_weights.{category} must be a non-negative number"
                )));
            }
        }
        if self.recency_window_days < 0 {
            return Err(AppError::validation(
                "scoring.recency_window_days must be >= 0",
            ));
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: defaults::base(),
            web_baseline: defaults::web_baseline(),
            stars_weight: defaults::stars_weight(),
            max_authority: defaults::max_authority(),
            recency_window_days: defaults::recency_window_days(),
            recency_bonus: defaults::recency_bonus(),
            reputation_bonus: defaults::reputation_bonus(),
            reputable_domains: defaults::reputable_domains(),
            description_bonus: defaults::description_bonus(),
            min_description_length: defaults::min_description_length(),
            title_bonus: defaults::title_bonus(),
            min_title_length: defaults::min_title_length(),
            highly_starred: defaults::highly_starred(),
            category_weights: BTreeMap::new(),
        }
    }
}

/// Ordered classification rules; the first matching rule wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "defaults::classifier_rules")]
    pub rules: Vec<ClassifierRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: defaults::classifier_rules(),
        }
    }
}

/// A single classification rule.
///
/// The rule matches when any of its non-empty criteria matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRule {
    /// Rule name for logs
    pub name: String,

    /// Category assigned on match
    pub category: Category,

    /// Host patterns: exact host, parent domain, or `prefix.` host prefix
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Substrings of the lower-cased URL path
    #[serde(default)]
    pub path_contains: Vec<String>,

    /// Code hosts that match only with an `owner/repo` shaped path
    #[serde(default)]
    pub repository_hosts: Vec<String>,

    /// Terms searched at word starts in title and description
    #[serde(default)]
    pub text_contains: Vec<String>,
}

impl ClassifierRule {
    /// True if at least one criterion list is non-empty.
    pub fn has_criteria(&self) -> bool {
        !(self.hosts.is_empty()
            && self.path_contains.is_empty()
            && self.repository_hosts.is_empty()
            && self.text_contains.is_empty())
    }
}

/// Export destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving exported catalogs
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// File name without extension
    #[serde(default = "defaults::file_stem")]
    pub file_stem: String,

    /// Also write a CSV copy of the catalog
    #[serde(default = "defaults::enabled")]
    pub csv_backup: bool,

    /// Number of top resources listed after a run
    #[serde(default = "defaults::top_n")]
    pub top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            file_stem: defaults::file_stem(),
            csv_backup: true,
            top_n: defaults::top_n(),
        }
    }
}

/// Filters applied by the exporter, never by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "defaults::min_quality_score")]
    pub min_quality_score: u8,

    /// Categories to export; empty exports all
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_quality_score: defaults::min_quality_score(),
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use super::ClassifierRule;
    use crate::models::Category;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    pub fn enabled() -> bool {
        true
    }

    // Search defaults
    pub fn keywords_zh() -> Vec<String> {
        strings(&[
            "CUDA编程教程",
            "GPU并行计算",
            "高性能计算HPC",
            "CUDA优化技巧",
            "NVIDIA GPU编程",
        ])
    }
    pub fn keywords_en() -> Vec<String> {
        strings(&[
            "CUDA programming tutorial",
            "GPU parallel computing",
            "HPC high performance computing",
            "CUDA optimization guide",
            "NVIDIA GPU development",
        ])
    }
    pub fn max_results() -> usize {
        30
    }
    pub fn min_stars() -> u64 {
        10
    }
    pub fn per_page() -> u32 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; harvester/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        1000
    }
    pub fn max_concurrent() -> usize {
        2
    }

    // Scoring defaults
    pub fn base() -> f64 {
        1.0
    }
    pub fn web_baseline() -> f64 {
        0.5
    }
    pub fn stars_weight() -> f64 {
        0.3
    }
    pub fn max_authority() -> f64 {
        2.0
    }
    pub fn recency_window_days() -> i64 {
        365
    }
    pub fn recency_bonus() -> f64 {
        0.5
    }
    pub fn reputation_bonus() -> f64 {
        1.0
    }
    pub fn reputable_domains() -> Vec<String> {
        strings(&[
            ".edu",
            ".gov",
            ".org",
            "nvidia.com",
            "intel.com",
            "amd.com",
            "microsoft.com",
            "readthedocs.io",
        ])
    }
    pub fn description_bonus() -> f64 {
        0.5
    }
    pub fn min_description_length() -> usize {
        10
    }
    pub fn title_bonus() -> f64 {
        0.5
    }
    pub fn min_title_length() -> usize {
        8
    }
    pub fn highly_starred() -> u64 {
        1000
    }

    // Output defaults
    pub fn output_dir() -> String {
        "resources".into()
    }
    pub fn file_stem() -> String {
        "learning_resources".into()
    }
    pub fn top_n() -> usize {
        5
    }
    pub fn min_quality_score() -> u8 {
        3
    }
    pub fn log_level() -> String {
        "info".into()
    }

    // Classifier defaults, highest precision first
    pub fn classifier_rules() -> Vec<ClassifierRule> {
        vec![
            ClassifierRule {
                name: "documentation".into(),
                category: Category::Docs,
                hosts: strings(&[
                    "docs.",
                    "readthedocs.io",
                    "readthedocs.org",
                    "docs.rs",
                    "devdocs.io",
                    "cppreference.com",
                    "learn.microsoft.com",
                ]),
                path_contains: strings(&["/docs/", "/documentation/", "/manual/", "/reference/"]),
                repository_hosts: Vec::new(),
                text_contains: Vec::new(),
            },
            ClassifierRule {
                name: "code_hosting".into(),
                category: Category::Code,
                hosts: Vec::new(),
                path_contains: Vec::new(),
                repository_hosts: strings(&[
                    "github.com",
                    "gitlab.com",
                    "bitbucket.org",
                    "gitee.com",
                    "codeberg.org",
                ]),
                text_contains: Vec::new(),
            },
            ClassifierRule {
                name: "course".into(),
                category: Category::Course,
                hosts: strings(&["coursera.org", "edx.org", "udemy.com", "udacity.com"]),
                path_contains: Vec::new(),
                repository_hosts: Vec::new(),
                text_contains: strings(&[
                    "course", "lecture", "syllabus", "tutorial", "mooc", "课程", "讲座", "教程",
                ]),
            },
            ClassifierRule {
                name: "book".into(),
                category: Category::Book,
                hosts: strings(&["oreilly.com", "manning.com", "books.google.com"]),
                path_contains: Vec::new(),
                repository_hosts: Vec::new(),
                text_contains: strings(&[
                    "book",
                    "ebook",
                    "handbook",
                    "textbook",
                    "guidebook",
                    "isbn",
                    "电子书",
                    "教材",
                ]),
            },
            ClassifierRule {
                name: "forum".into(),
                category: Category::Forum,
                hosts: strings(&[
                    "stackoverflow.com",
                    "stackexchange.com",
                    "superuser.com",
                    "reddit.com",
                    "quora.com",
                    "news.ycombinator.com",
                    "forums.",
                    "discourse.",
                    "zhihu.com",
                    "segmentfault.com",
                    "v2ex.com",
                ]),
                path_contains: strings(&["/forum/", "/forums/", "/questions/"]),
                repository_hosts: Vec::new(),
                text_contains: Vec::new(),
            },
            ClassifierRule {
                name: "whitepaper".into(),
                category: Category::Whitepaper,
                hosts: strings(&["arxiv.org", "dl.acm.org", "ieeexplore.ieee.org"]),
                path_contains: Vec::new(),
                repository_hosts: Vec::new(),
                text_contains: strings(&[
                    "whitepaper",
                    "white paper",
                    "technical report",
                    "tech report",
                    "research paper",
                    "白皮书",
                    "论文",
                ]),
            },
            ClassifierRule {
                name: "blog".into(),
                category: Category::Blog,
                hosts: strings(&[
                    "blog.",
                    "medium.com",
                    "dev.to",
                    "substack.com",
                    "hashnode.dev",
                    "blogspot.com",
                    "wordpress.com",
                    "csdn.net",
                    "cnblogs.com",
                    "juejin.cn",
                    "jianshu.com",
                ]),
                path_contains: strings(&["/blog/", "/blogs/"]),
                repository_hosts: Vec::new(),
                text_contains: Vec::new(),
            },
        ]
    }
}
