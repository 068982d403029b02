//! Filter selection keys for slicing hierarchical forecast payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel meaning "aggregate across all values of that dimension".
pub const ALL: &str = "all";

/// A `(site, sector)` pair identifying which slice of a forecast payload
/// to extract. Either component may be the [`ALL`] sentinel, selecting the
/// aggregate level for that dimension. A concrete component that the
/// payload lacks is an error; aggregates never stand in for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    pub site: String,
    pub sector: String,
}

impl SelectionKey {
    pub fn new(site: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            sector: sector.into(),
        }
    }

    /// The global aggregate: `("all", "all")`.
    pub fn all() -> Self {
        Self::new(ALL, ALL)
    }

    pub fn is_all_sites(&self) -> bool {
        self.site == ALL
    }

    pub fn is_all_sectors(&self) -> bool {
        self.sector == ALL
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.site, self.sector)
    }
}
