//! Convoy acceptance policies.
//!
//! Route search asks a `RoutePolicy` whether a region may be crossed and
//! whether the search has reached the destination. Three strategies share
//! one carrier rule (a fleet standing in a sea or convoyable-coast region)
//! and differ in how they read the fleet's convoy order:
//!
//! - `Theoretical` ignores orders entirely.
//! - `Legal` accepts fleets whose matching convoy has not failed.
//! - `Staged` accepts only succeeded fleets, optionally undecided ones too,
//!   and skips one invalidated region.

use std::cell::Cell;

use crate::board::adjacency::AdjacencyGraph;
use crate::board::region::{CoastKind, Location, Region};
use crate::board::state::UnitPlacement;

use super::status::{DislodgedState, EvalError, OrderStateLookup, Tristate};

/// Edge-acceptance capability used by route search.
pub trait RoutePolicy {
    /// Returns true if the search may step into `candidate`.
    fn accepts(&self, candidate: Region) -> Result<bool, EvalError>;

    /// Returns true if an army carried to `current` can land at `dest`.
    fn is_adjacent_to_dest(&self, current: Location, dest: Location) -> bool;
}

impl<P: RoutePolicy + ?Sized> RoutePolicy for &P {
    fn accepts(&self, candidate: Region) -> Result<bool, EvalError> {
        (**self).accepts(candidate)
    }

    fn is_adjacent_to_dest(&self, current: Location, dest: Location) -> bool {
        (**self).is_adjacent_to_dest(current, dest)
    }
}

/// Returns true if a fleet stands in a region it can convoy from.
fn is_carrier<U: UnitPlacement + ?Sized>(graph: &AdjacencyGraph, units: &U, region: Region) -> bool {
    graph.is_sea_or_convoyable(region) && units.unit_at(region).is_some_and(|u| u.is_fleet())
}

/// The search has left the source and touches the destination.
fn reaches(graph: &AdjacencyGraph, src: Region, current: Location, dest: Location) -> bool {
    current.region != src && graph.is_adjacent(current.region, CoastKind::Wing, dest.region, None)
}

/// How the fleet in a region stands with respect to one convoy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetStatus {
    /// No fleet, or the fleet is not convoying this source and destination.
    Absent,
    /// The matching convoy failed or the fleet is dislodged.
    Failed,
    /// The matching convoy is not decided yet.
    Uncertain,
    /// The matching convoy succeeded.
    Succeeded,
}

/// Everything needed to judge fleets for one convoyed move.
pub struct ConvoyScope<'a, U: ?Sized, O: ?Sized> {
    pub graph: &'a AdjacencyGraph,
    pub units: &'a U,
    pub orders: &'a O,
    pub src: Region,
    pub dest: Region,
}

impl<U: ?Sized, O: ?Sized> Clone for ConvoyScope<'_, U, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: ?Sized, O: ?Sized> Copy for ConvoyScope<'_, U, O> {}

impl<'a, U, O> ConvoyScope<'a, U, O>
where
    U: UnitPlacement + ?Sized,
    O: OrderStateLookup + ?Sized,
{
    pub fn new(
        graph: &'a AdjacencyGraph,
        units: &'a U,
        orders: &'a O,
        src: Region,
        dest: Region,
    ) -> Self {
        ConvoyScope { graph, units, orders, src, dest }
    }

    /// Classifies the fleet in `region`.
    ///
    /// An occupied carrier region without an order state is a contract
    /// violation and aborts with `EvalError::MissingOrderState`.
    pub fn fleet_status(&self, region: Region) -> Result<FleetStatus, EvalError> {
        if !is_carrier(self.graph, self.units, region) {
            return Ok(FleetStatus::Absent);
        }
        let state = self
            .orders
            .by_region(region)
            .ok_or(EvalError::MissingOrderState(region))?;
        if !state.order().convoys(self.src, self.dest) {
            return Ok(FleetStatus::Absent);
        }
        Ok(match (state.eval_state(), state.dislodged_state()) {
            (Tristate::Failure, _) | (_, DislodgedState::Yes) => FleetStatus::Failed,
            (Tristate::Uncertain, _) => FleetStatus::Uncertain,
            (Tristate::Success, _) => FleetStatus::Succeeded,
        })
    }
}

/// Accepts any fleet, ignoring orders.
pub struct Theoretical<'a, U: ?Sized> {
    graph: &'a AdjacencyGraph,
    units: &'a U,
    src: Region,
}

impl<'a, U: UnitPlacement + ?Sized> Theoretical<'a, U> {
    pub fn new(graph: &'a AdjacencyGraph, units: &'a U, src: Region) -> Self {
        Theoretical { graph, units, src }
    }
}

impl<U: UnitPlacement + ?Sized> RoutePolicy for Theoretical<'_, U> {
    fn accepts(&self, candidate: Region) -> Result<bool, EvalError> {
        Ok(is_carrier(self.graph, self.units, candidate))
    }

    fn is_adjacent_to_dest(&self, current: Location, dest: Location) -> bool {
        reaches(self.graph, self.src, current, dest)
    }
}

/// Accepts fleets whose matching convoy has neither failed nor been
/// dislodged. Undecided convoys count as legal.
pub struct Legal<'a, U: ?Sized, O: ?Sized> {
    scope: ConvoyScope<'a, U, O>,
}

impl<'a, U, O> Legal<'a, U, O>
where
    U: UnitPlacement + ?Sized,
    O: OrderStateLookup + ?Sized,
{
    pub fn new(scope: ConvoyScope<'a, U, O>) -> Self {
        Legal { scope }
    }
}

impl<U, O> RoutePolicy for Legal<'_, U, O>
where
    U: UnitPlacement + ?Sized,
    O: OrderStateLookup + ?Sized,
{
    fn accepts(&self, candidate: Region) -> Result<bool, EvalError> {
        Ok(matches!(
            self.scope.fleet_status(candidate)?,
            FleetStatus::Uncertain | FleetStatus::Succeeded
        ))
    }

    fn is_adjacent_to_dest(&self, current: Location, dest: Location) -> bool {
        reaches(self.scope.graph, self.scope.src, current, dest)
    }
}

/// Strict acceptance for the two-pass convoy evaluation.
///
/// Succeeded fleets are accepted. Failed or dislodged fleets are rejected
/// and counted. Undecided fleets are rejected unless `note_uncertain` is
/// set, in which case they are accepted and counted. The fleet at the
/// invalidated region is rejected without being counted.
pub struct Staged<'a, U: ?Sized, O: ?Sized> {
    scope: ConvoyScope<'a, U, O>,
    invalid: Option<Region>,
    note_uncertain: bool,
    failures: Cell<usize>,
    uncertain: Cell<usize>,
}

impl<'a, U, O> Staged<'a, U, O>
where
    U: UnitPlacement + ?Sized,
    O: OrderStateLookup + ?Sized,
{
    pub fn new(scope: ConvoyScope<'a, U, O>, invalid: Option<Region>, note_uncertain: bool) -> Self {
        Staged {
            scope,
            invalid,
            note_uncertain,
            failures: Cell::new(0),
            uncertain: Cell::new(0),
        }
    }

    /// Returns true if a failed or dislodged convoying fleet was rejected.
    pub fn saw_failure(&self) -> bool {
        self.failures.get() > 0
    }

    /// Returns true if an undecided convoying fleet was accepted.
    pub fn saw_uncertain(&self) -> bool {
        self.uncertain.get() > 0
    }
}

impl<U, O> RoutePolicy for Staged<'_, U, O>
where
    U: UnitPlacement + ?Sized,
    O: OrderStateLookup + ?Sized,
{
    fn accepts(&self, candidate: Region) -> Result<bool, EvalError> {
        if self.invalid == Some(candidate) {
            return Ok(false);
        }
        Ok(match self.scope.fleet_status(candidate)? {
            FleetStatus::Absent => false,
            FleetStatus::Failed => {
                self.failures.set(self.failures.get() + 1);
                false
            }
            FleetStatus::Uncertain if self.note_uncertain => {
                self.uncertain.set(self.uncertain.get() + 1);
                true
            }
            FleetStatus::Uncertain => false,
            FleetStatus::Succeeded => true,
        })
    }

    fn is_adjacent_to_dest(&self, current: Location, dest: Location) -> bool {
        reaches(self.scope.graph, self.scope.src, current, dest)
    }
}
