//! Utility functions and helpers.

pub mod http;
pub mod report;
pub mod url;

use sha2::{Digest, Sha256};

/// Short stable identifier: the first 16 hex chars of a SHA-256 digest.
pub fn short_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(16);
    id
}
