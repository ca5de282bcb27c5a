// src/lib.rs

//! Harvester library: learning-resource search, classification and scoring.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
