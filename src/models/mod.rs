// src/models/mod.rs

//! Domain models for the harvester.
//!
//! Raw provider hits, the finalized resource records built from them, and
//! the configuration that tunes the engine.

mod config;
mod hit;
mod resource;

// Re-export all public types
pub use config::{
    ClassifierConfig, ClassifierRule, Config, FilterConfig, LoggingConfig, OutputConfig,
    ScoringConfig, SearchConfig,
};
pub use hit::{RawHit, Source};
pub use resource::{Catalog, Category, Language, Resource, partition};
