//! Author distribution narrative.

use bt_common::AuthorCount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsSection {
    /// Author with the most records.
    pub top_author: String,
    /// Records by the top author.
    pub top_author_count: usize,
}

impl AuthorsSection {
    pub fn from_counts(counts: &AuthorCount) -> Option<Self> {
        let (author, count) = counts.first()?;
        Some(Self {
            top_author: author.clone(),
            top_author_count: *count,
        })
    }
}
