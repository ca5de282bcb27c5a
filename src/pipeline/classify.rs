//! Rule-based resource classification.
//!
//! Rules are evaluated in declaration order and the first match wins, so
//! high-precision URL rules must come before broad vocabulary rules.

use regex::Regex;

use crate::error::Result;
use crate::models::{Category, ClassifierConfig, ClassifierRule, RawHit};
use crate::utils::url::{host_matches, parse_web_url};

/// First path segments on code hosts that are site pages, not owners.
const RESERVED_OWNERS: &[&str] = &[
    "about",
    "collections",
    "explore",
    "features",
    "login",
    "marketplace",
    "orgs",
    "pricing",
    "search",
    "settings",
    "sponsors",
    "topics",
    "trending",
];

/// Lower-cased view of a hit that rules are evaluated against.
struct ClassifyInput {
    title: String,
    description: String,
    host: Option<String>,
    /// Lower-cased path, always ending in `/`
    path: String,
    /// Non-empty path segments, lower-cased
    segments: Vec<String>,
    blank: bool,
}

impl ClassifyInput {
    fn from_hit(hit: &RawHit) -> Self {
        let parsed = parse_web_url(&hit.url);
        let host = parsed
            .as_ref()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()));
        let raw_path = parsed
            .as_ref()
            .map(|u| u.path().to_lowercase())
            .unwrap_or_default();
        let segments = raw_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            title: hit.title.trim().to_lowercase(),
            description: hit.description.trim().to_lowercase(),
            host,
            path: format!("{}/", raw_path.trim_end_matches('/')),
            segments,
            blank: hit.is_blank(),
        }
    }

    fn is_repository_path(&self) -> bool {
        self.segments.len() >= 2 && !RESERVED_OWNERS.contains(&self.segments[0].as_str())
    }
}

/// A rule with its text terms compiled into one matcher.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: ClassifierRule,
    text: Option<Regex>,
}

impl CompiledRule {
    fn compile(rule: ClassifierRule) -> Result<Self> {
        let (latin, other): (Vec<String>, Vec<String>) = rule
            .text_contains
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .partition(|t| t.starts_with(|c: char| c.is_ascii_alphanumeric()));

        // Latin terms must start a word: "book" matches "books" but not
        // "notebook". CJK text has no word breaks, so those match anywhere.
        let mut alternatives = Vec::new();
        if !latin.is_empty() {
            let escaped: Vec<String> = latin.iter().map(|t| regex::escape(t)).collect();
            alternatives.push(format!("(?:^|[^a-z0-9])(?:{})", escaped.join("|")));
        }
        if !other.is_empty() {
            let escaped: Vec<String> = other.iter().map(|t| regex::escape(t)).collect();
            alternatives.push(format!("(?:{})", escaped.join("|")));
        }

        let text = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&alternatives.join("|"))?)
        };

        Ok(Self { rule, text })
    }

    fn matches(&self, input: &ClassifyInput) -> bool {
        let rule = &self.rule;

        if let Some(host) = &input.host {
            if rule.hosts.iter().any(|p| host_matches(host, p)) {
                return true;
            }
            if input.is_repository_path()
                && rule.repository_hosts.iter().any(|p| host_matches(host, p))
            {
                return true;
            }
            let path_hit = rule
                .path_contains
                .iter()
                .map(|p| p.trim().to_lowercase())
                .any(|p| !p.is_empty() && input.path.contains(&p));
            if path_hit {
                return true;
            }
        }

        match &self.text {
            Some(re) => re.is_match(&input.title) || re.is_match(&input.description),
            None => false,
        }
    }
}

/// Ordered-rule classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    /// Build a classifier from rules in priority order.
    pub fn new(rules: Vec<ClassifierRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Self::new(config.rules.clone())
    }

    /// Assign exactly one category to a hit.
    ///
    /// Falls back to `Website` when no rule matches, and to
    /// `Uncategorized` only when title, description and URL are all blank.
    pub fn classify(&self, hit: &RawHit) -> Category {
        let input = ClassifyInput::from_hit(hit);
        if input.blank {
            return Category::Uncategorized;
        }

        match self.rules.iter().find(|rule| rule.matches(&input)) {
            Some(compiled) => {
                log::trace!("rule '{}' matched {}", compiled.rule.name, hit.url);
                compiled.rule.category
            }
            None => Category::Website,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        // Built-in terms are escaped literals; compiling them cannot fail.
        Self::from_config(&ClassifierConfig::default()).unwrap_or(Self { rules: Vec::new() })
    }
}
