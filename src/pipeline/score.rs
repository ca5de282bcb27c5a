//! Quality scoring from independent weighted signals.
//!
//! Each signal is a pure function of the hit returning a non-negative,
//! bounded contribution. The score is `base + sum(signals)`, rounded, then
//! clamped to `1..=5` as the very last step, so it is monotonic in every
//! signal.

use chrono::{DateTime, Duration, Utc};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Category, RawHit, ScoringConfig, Source};
use crate::utils::url::{get_domain, host_matches};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Per-signal contributions for one hit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    /// Stars-derived credit for repositories, flat baseline for web hits
    pub authority: f64,
    /// Bonus for a recent update
    pub recency: f64,
    /// Bonus for an allow-listed host
    pub reputation: f64,
    /// Bonuses for a substantive description and title
    pub completeness: f64,
}

impl Signals {
    pub fn total(&self) -> f64 {
        self.authority + self.recency + self.reputation + self.completeness
    }
}

/// Clamp a weighted contribution into `[0, inf)`, mapping NaN to zero.
fn contribution(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

fn grapheme_len(text: &str) -> usize {
    text.trim().graphemes(true).count()
}

/// Round and clamp a raw total into the score range.
fn to_score(total: f64) -> u8 {
    if total.is_nan() {
        return MIN_SCORE;
    }
    total
        .round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Weighted-signal scorer.
///
/// Holds the reference time for the recency window so repeated calls are
/// deterministic within a run.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
    now: DateTime<Utc>,
}

impl Scorer {
    pub fn new(config: ScoringConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Reference time used for the recency window.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Evaluate every signal for a hit.
    pub fn signals(&self, hit: &RawHit) -> Signals {
        Signals {
            authority: self.authority(hit),
            recency: self.recency(hit),
            reputation: self.reputation(hit),
            completeness: self.completeness(hit),
        }
    }

    /// Score a hit in `1..=5`.
    pub fn score(&self, hit: &RawHit, category: Category) -> u8 {
        self.score_signals(&self.signals(hit), category)
    }

    /// Score from precomputed signals.
    pub fn score_signals(&self, signals: &Signals, category: Category) -> u8 {
        let category_weight = self
            .config
            .category_weights
            .get(&category)
            .copied()
            .map(contribution)
            .unwrap_or(0.0);
        to_score(contribution(self.config.base) + signals.total() + category_weight)
    }

    fn authority(&self, hit: &RawHit) -> f64 {
        match hit.source {
            Source::GitHub => hit
                .stars
                .map(|stars| {
                    let weighted = contribution(self.config.stars_weight) * (stars as f64).ln_1p();
                    contribution(weighted).min(contribution(self.config.max_authority))
                })
                .unwrap_or(0.0),
            Source::DuckDuckGo => contribution(self.config.web_baseline),
        }
    }

    /// Only GitHub reports `updated_at`; absent or stale timestamps add nothing.
    fn recency(&self, hit: &RawHit) -> f64 {
        let Some(updated_at) = hit.updated_at else {
            return 0.0;
        };
        let age = self.now.signed_duration_since(updated_at);
        let within_window = Duration::try_days(self.config.recency_window_days)
            .map_or(true, |window| age <= window);
        if within_window {
            contribution(self.config.recency_bonus)
        } else {
            0.0
        }
    }

    fn reputation(&self, hit: &RawHit) -> f64 {
        let Some(host) = get_domain(&hit.url) else {
            return 0.0;
        };
        let reputable = self
            .config
            .reputable_domains
            .iter()
            .any(|domain| host_matches(&host, domain));
        if reputable {
            contribution(self.config.reputation_bonus)
        } else {
            0.0
        }
    }

    fn completeness(&self, hit: &RawHit) -> f64 {
        let mut total = 0.0;

        let description_len = grapheme_len(&hit.description);
        if description_len > 0 && description_len >= self.config.min_description_length {
            total += contribution(self.config.description_bonus);
        }
        if grapheme_len(&hit.title) > self.config.min_title_length {
            total += contribution(self.config.title_bonus);
        }

        total
    }
}
