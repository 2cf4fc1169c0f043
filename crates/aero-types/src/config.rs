//! Pathfinding search parameters.

/// Which cells count as neighbors during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Only the 6 face-adjacent cells.
    Face6,
    /// All 26 surrounding cells, permitting diagonal movement through
    /// edges and corners.
    #[default]
    Full26,
}

impl Connectivity {
    /// Returns the neighbor count for this connectivity.
    #[must_use]
    pub const fn degree(self) -> usize {
        match self {
            Self::Face6 => 6,
            Self::Full26 => 26,
        }
    }
}

/// Parameters controlling a path search.
///
/// # Example
///
/// ```
/// use aero_types::{Connectivity, SearchConfig};
///
/// let config = SearchConfig::default().with_connectivity(Connectivity::Face6);
/// assert_eq!(config.connectivity, Connectivity::Face6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Neighbor set used when expanding cells.
    pub connectivity: Connectivity,
}

impl SearchConfig {
    /// Creates the default configuration (full 26-connectivity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the neighbor connectivity.
    #[must_use]
    pub const fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}
