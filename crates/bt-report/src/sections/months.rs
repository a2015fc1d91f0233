//! Month distribution narrative.

use bt_common::MonthCount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthsSection {
    /// First entry of the frequency-descending month counts.
    pub most_published_month: u32,
    /// Last entry of the frequency-descending month counts.
    ///
    /// Positional: with tied counts this is whichever tied month was seen
    /// last, not a unique minimum.
    pub least_published_month: u32,
}

impl MonthsSection {
    pub fn from_counts(counts: &MonthCount) -> Option<Self> {
        Some(Self {
            most_published_month: counts.first()?.0,
            least_published_month: counts.last()?.0,
        })
    }
}
