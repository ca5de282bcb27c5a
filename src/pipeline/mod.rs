//! Resource engine and the run that drives it.
//!
//! - `fingerprint`, `classify`, `score`, `recommend`, `aggregate`: the pure,
//!   synchronous engine
//! - `collect`: concurrent collector driver
//! - `search`: collect, aggregate, export

pub mod aggregate;
pub mod classify;
pub mod collect;
pub mod fingerprint;
pub mod language;
pub mod recommend;
pub mod score;
pub mod search;
pub mod stats;

pub use aggregate::Aggregator;
pub use classify::Classifier;
pub use collect::{CollectOutcome, collect_all};
pub use fingerprint::fingerprint;
pub use language::detect_language;
pub use recommend::Recommender;
pub use score::{MAX_SCORE, MIN_SCORE, Scorer, Signals};
pub use search::{SearchReport, run_search};
pub use stats::{CatalogStats, top_resources};
