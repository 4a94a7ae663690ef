//! Region-level orders and convoy routes.
//!
//! Only the slice of the order model the convoy engine reads is represented:
//! holds, moves (optionally carrying explicitly chosen convoy routes), and
//! convoys. Orders are issued by, and owned by, the outer adjudicator.

use super::region::{Location, Region};

/// An ordered sequence of regions an army is carried along.
///
/// The first and last regions are the land endpoints; every interior region
/// must host a fleet convoying the same source and destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(Vec<Region>);

impl Route {
    /// Wraps a region sequence.
    pub fn new(regions: Vec<Region>) -> Self {
        Route(regions)
    }

    /// Returns all regions, endpoints included.
    pub fn regions(&self) -> &[Region] {
        &self.0
    }

    /// Returns the first region.
    pub fn source(&self) -> Option<Region> {
        self.0.first().copied()
    }

    /// Returns the last region.
    pub fn destination(&self) -> Option<Region> {
        self.0.last().copied()
    }

    /// Returns the regions strictly between the endpoints.
    pub fn interior(&self) -> &[Region] {
        if self.0.len() < 2 {
            return &[];
        }
        &self.0[1..self.0.len() - 1]
    }

    /// Returns true if `region` appears anywhere on the route.
    pub fn contains(&self, region: Region) -> bool {
        self.0.contains(&region)
    }

    /// Returns the number of regions, endpoints included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the route holds no regions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps the region sequence.
    pub fn into_regions(self) -> Vec<Region> {
        self.0
    }
}

impl From<Vec<Region>> for Route {
    fn from(regions: Vec<Region>) -> Self {
        Route(regions)
    }
}

/// An order, reduced to what convoy evaluation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    /// Hold: the unit at `unit` stays put.
    Hold { unit: Region },

    /// Move: `A lon - nwy`. `routes` holds explicitly chosen convoy routes,
    /// empty when the mover leaves the route to the adjudicator.
    Move {
        unit: Location,
        dest: Location,
        routes: Vec<Route>,
    },

    /// Convoy: `F nth C A lon - nwy`.
    Convoy {
        unit: Region,
        source: Region,
        destination: Region,
    },
}

impl Order {
    /// Returns the region of the ordered unit.
    pub fn region(&self) -> Region {
        match self {
            Order::Hold { unit } => *unit,
            Order::Move { unit, .. } => unit.region,
            Order::Convoy { unit, .. } => *unit,
        }
    }

    /// Returns true for convoy orders.
    pub fn is_convoy_order(&self) -> bool {
        matches!(self, Order::Convoy { .. })
    }

    /// Returns the declared source of a convoy order.
    pub fn convoy_source(&self) -> Option<Region> {
        match self {
            Order::Convoy { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// Returns the declared destination of a convoy order.
    pub fn convoy_destination(&self) -> Option<Region> {
        match self {
            Order::Convoy { destination, .. } => Some(*destination),
            _ => None,
        }
    }

    /// Returns true if this is a convoy of exactly `src` to `dest`.
    pub fn convoys(&self, src: Region, dest: Region) -> bool {
        self.convoy_source() == Some(src) && self.convoy_destination() == Some(dest)
    }

    /// Returns the explicitly chosen routes of a move order.
    pub fn explicit_routes(&self) -> &[Route] {
        match self {
            Order::Move { routes, .. } => routes,
            _ => &[],
        }
    }
}
