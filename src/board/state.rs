//! Unit placement.
//!
//! The convoy engine only reads which unit stands in a region. Placement is
//! owned by the outer adjudicator, which implements `UnitPlacement` for its
//! own board type or uses `BoardState`.

use super::adjacency::AdjacencyGraph;
use super::region::Region;
use super::unit::Unit;

/// Read-only view of where units stand.
pub trait UnitPlacement {
    /// Returns the unit occupying `region`, if any.
    fn unit_at(&self, region: Region) -> Option<Unit>;

    /// Returns the unit dislodged from `region` this turn, if any.
    fn dislodged_at(&self, _region: Region) -> Option<Unit> {
        None
    }
}

/// Unit placement for one map.
///
/// Uses vectors indexed by `Region::index` for O(1) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    units: Vec<Option<Unit>>,
    dislodged: Vec<Option<Unit>>,
}

impl BoardState {
    /// Creates an empty board for a map with `region_count` regions.
    pub fn new(region_count: usize) -> Self {
        BoardState {
            units: vec![None; region_count],
            dislodged: vec![None; region_count],
        }
    }

    /// Creates an empty board sized for `graph`.
    pub fn for_graph(graph: &AdjacencyGraph) -> Self {
        BoardState::new(graph.region_count())
    }

    /// Places a unit. Returns false if the region is already occupied.
    pub fn place_unit(&mut self, region: Region, unit: Unit) -> bool {
        let slot = &mut self.units[region.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(unit);
        true
    }

    /// Removes and returns the unit at `region`.
    pub fn remove_unit(&mut self, region: Region) -> Option<Unit> {
        self.units[region.index()].take()
    }

    /// Records a dislodged unit at `region`.
    pub fn set_dislodged(&mut self, region: Region, unit: Unit) {
        self.dislodged[region.index()] = Some(unit);
    }
}

impl UnitPlacement for BoardState {
    fn unit_at(&self, region: Region) -> Option<Unit> {
        self.units.get(region.index()).copied().flatten()
    }

    fn dislodged_at(&self, region: Region) -> Option<Unit> {
        self.dislodged.get(region.index()).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::region::CoastKind;

    #[test]
    fn empty_board_has_no_units() {
        let board = BoardState::new(4);
        assert!((0..4).all(|i| board.unit_at(Region::new(i)).is_none()));
        assert!((0..4).all(|i| board.dislodged_at(Region::new(i)).is_none()));
    }

    #[test]
    fn place_unit_rejects_duplicate() {
        let mut board = BoardState::new(4);
        assert!(board.place_unit(Region::new(1), Unit::army()));
        assert!(!board.place_unit(Region::new(1), Unit::fleet()));
        assert_eq!(board.unit_at(Region::new(1)), Some(Unit::army()));
    }

    #[test]
    fn remove_then_place() {
        let mut board = BoardState::new(4);
        board.place_unit(Region::new(2), Unit::fleet_on(CoastKind::South));
        assert_eq!(
            board.remove_unit(Region::new(2)),
            Some(Unit::fleet_on(CoastKind::South))
        );
        assert!(board.place_unit(Region::new(2), Unit::army()));
    }

    #[test]
    fn dislodged_tracked_separately() {
        let mut board = BoardState::new(4);
        board.place_unit(Region::new(0), Unit::army());
        board.set_dislodged(Region::new(0), Unit::fleet());
        assert_eq!(board.unit_at(Region::new(0)), Some(Unit::army()));
        assert_eq!(board.dislodged_at(Region::new(0)), Some(Unit::fleet()));
    }

    #[test]
    fn out_of_range_region_is_empty() {
        let board = BoardState::new(2);
        assert_eq!(board.unit_at(Region::new(9)), None);
    }
}
