//! Templated recommendation sentences.

use crate::models::{Category, RawHit, Source};

use super::score::{MAX_SCORE, Scorer, Signals};

/// Builds a one-sentence justification from the signals that scored.
///
/// Phrases are picked in a fixed priority order: reputation, authority,
/// recency, completeness. The web baseline is not a phrase of its own.
#[derive(Debug, Clone)]
pub struct Recommender {
    scorer: Scorer,
}

impl Recommender {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    /// Recommendation for a hit already classified and scored.
    pub fn recommend(&self, hit: &RawHit, category: Category, score: u8) -> String {
        self.compose(&self.scorer.signals(hit), hit, category, score)
    }

    /// Same as [`Recommender::recommend`] with precomputed signals.
    pub fn compose(&self, signals: &Signals, hit: &RawHit, category: Category, score: u8) -> String {
        let phrases = self.phrases(signals, hit);

        let body = if phrases.is_empty() {
            fallback(category).to_string()
        } else {
            format!("{} {}.", capitalize(&join(&phrases)), category.noun())
        };

        if score >= MAX_SCORE {
            format!("Top pick: {body}")
        } else {
            body
        }
    }

    fn phrases(&self, signals: &Signals, hit: &RawHit) -> Vec<String> {
        let mut phrases = Vec::new();

        if signals.reputation > 0.0 {
            phrases.push("officially maintained".to_string());
        }
        if hit.source == Source::GitHub && signals.authority > 0.0 {
            if let Some(stars) = hit.stars {
                if stars >= self.scorer.config().highly_starred {
                    phrases.push(format!("highly starred ({stars} stars)"));
                } else {
                    phrases.push(format!("community starred ({stars} stars)"));
                }
            }
        }
        if signals.recency > 0.0 {
            phrases.push("actively updated".to_string());
        }
        if signals.completeness > 0.0 {
            phrases.push("clearly described".to_string());
        }

        phrases
    }
}

fn fallback(category: Category) -> &'static str {
    match category {
        Category::Book => "A book for systematic study.",
        Category::Course => "A structured learning path.",
        Category::Blog => "A write-up of hands-on experience.",
        Category::Code => "Practical code examples.",
        Category::Docs => "Reference documentation.",
        Category::Forum => "Community answers and discussion.",
        Category::Whitepaper => "An in-depth technical report.",
        Category::Website | Category::Uncategorized => "A resource worth a look.",
    }
}

/// "a", "a and b", "a, b and c"
fn join(phrases: &[String]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
