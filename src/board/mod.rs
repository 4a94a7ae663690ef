//! Map model and board state.
//!
//! Contains regions and coasts, the adjacency graph and its builders,
//! units, orders, and unit placement.

pub mod adjacency;
pub mod definition;
pub mod order;
pub mod region;
pub mod standard;
pub mod state;
pub mod unit;

pub use adjacency::{AdjacencyGraph, MapBuilder, MapError};
pub use definition::{BorderDefinition, MapDefinition, RegionDefinition};
pub use order::{Order, Route};
pub use region::{Border, CoastKind, Location, Region, RegionInfo, RegionKind};
pub use standard::{standard_map, STANDARD_REGION_COUNT, STANDARD_SUPPLY_CENTER_COUNT};
pub use state::{BoardState, UnitPlacement};
pub use unit::{Unit, UnitType};
