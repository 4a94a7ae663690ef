//! The standard 75-region map.
//!
//! Shipped as an embedded JSON definition: 14 landlocked regions, 19 seas,
//! 39 single-coast regions and 3 split-coast regions (bul, spa, stp).

use super::adjacency::{AdjacencyGraph, MapError};

/// The number of regions on the standard map.
pub const STANDARD_REGION_COUNT: usize = 75;

/// The number of supply centers on the standard map.
pub const STANDARD_SUPPLY_CENTER_COUNT: usize = 34;

static STANDARD_DEFINITION: &str = include_str!("standard.json");

/// Builds the standard map.
pub fn standard_map() -> Result<AdjacencyGraph, MapError> {
    AdjacencyGraph::from_json(STANDARD_DEFINITION)
}
