//! Graph searches over an `AdjacencyGraph`.

pub mod distance;
pub mod finder;
pub mod routes;

pub use distance::{min_distance, DistanceTable};
pub use finder::PathFinder;
pub use routes::{find_all_sea_routes, RouteTree, TreeNode};
