//! Convoy route discovery and classification.
//!
//! `ConvoyEvaluator` is the entry point the adjudicator calls while it
//! iterates toward a fixpoint. Every call reads the current unit placement and
//! order states afresh; the evaluator holds only borrowed references and
//! caches nothing between calls.

use crate::board::adjacency::AdjacencyGraph;
use crate::board::order::{Order, Route};
use crate::board::region::{CoastKind, Location, Region};
use crate::board::state::UnitPlacement;
use crate::path::distance;
use crate::path::finder::PathFinder;
use crate::path::routes;

use super::policy::{ConvoyScope, FleetStatus, Legal, RoutePolicy, Staged, Theoretical};
use super::status::{EvalError, OrderStateLookup, Tristate};

/// Outcome of a convoy evaluation.
///
/// `route` is set only on success, and names the route that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvoyEvaluation {
    pub state: Tristate,
    pub route: Option<Route>,
}

impl ConvoyEvaluation {
    fn success(route: Route) -> Self {
        ConvoyEvaluation {
            state: Tristate::Success,
            route: Some(route),
        }
    }

    fn without_route(state: Tristate) -> Self {
        ConvoyEvaluation { state, route: None }
    }

    pub fn is_success(&self) -> bool {
        self.state == Tristate::Success
    }
}

/// Answers convoy questions against one board position.
pub struct ConvoyEvaluator<'a, U: ?Sized, O: ?Sized> {
    graph: &'a AdjacencyGraph,
    units: &'a U,
    orders: &'a O,
}

impl<'a, U, O> ConvoyEvaluator<'a, U, O>
where
    U: UnitPlacement + ?Sized,
    O: OrderStateLookup + ?Sized,
{
    pub fn new(graph: &'a AdjacencyGraph, units: &'a U, orders: &'a O) -> Self {
        ConvoyEvaluator { graph, units, orders }
    }

    pub fn graph(&self) -> &'a AdjacencyGraph {
        self.graph
    }

    fn scope(&self, src: Region, dest: Region) -> ConvoyScope<'a, U, O> {
        ConvoyScope::new(self.graph, self.units, self.orders, src, dest)
    }

    /// Policy accepting any fleet at sea, orders ignored.
    pub fn theoretical(&self, src: Region) -> Theoretical<'a, U> {
        Theoretical::new(self.graph, self.units, src)
    }

    /// Policy accepting fleets whose convoy of `src` to `dest` has not failed.
    pub fn legal(&self, src: Region, dest: Region) -> Legal<'a, U, O> {
        Legal::new(self.scope(src, dest))
    }

    /// Convoys only ever link two distinct land regions.
    fn valid_endpoints(&self, src: Region, dest: Region) -> bool {
        src != dest && self.graph.is_land(src) && self.graph.is_land(dest)
    }

    /// Returns true if an army moving from `src` to `dest` can only get there
    /// by convoy: both are land and they share no land border.
    pub fn needs_convoy(&self, src: Region, dest: Region) -> bool {
        self.valid_endpoints(src, dest)
            && !self.graph.is_adjacent(src, CoastKind::Land, dest, None)
    }

    fn search<P: RoutePolicy + ?Sized>(
        &self,
        src: Region,
        dest: Region,
        policy: &P,
    ) -> Result<Option<Route>, EvalError> {
        if !self.valid_endpoints(src, dest) {
            return Ok(None);
        }
        let path = PathFinder::new(self.graph).find_path(
            Location::new(src, CoastKind::Land),
            Location::new(dest, CoastKind::Land),
            policy,
        )?;
        Ok(path.map(|locations| Route::new(locations.into_iter().map(|l| l.region).collect())))
    }

    /// Returns a route along which fleets are placed to carry an army from
    /// `src` to `dest`, whatever their orders.
    pub fn get_convoy_route(&self, src: Region, dest: Region) -> Option<Route> {
        let policy = self.theoretical(src);
        // The theoretical policy never reads order states.
        self.search(src, dest, &policy).ok().flatten()
    }

    /// Returns true if fleets are placed so that `src` to `dest` could be
    /// convoyed, whatever their orders.
    pub fn is_possible_convoy_route(&self, src: Region, dest: Region) -> bool {
        self.get_convoy_route(src, dest).is_some()
    }

    /// Returns a route whose fleets all convoy `src` to `dest` and have not
    /// failed.
    pub fn get_legal_convoy_route(
        &self,
        src: Region,
        dest: Region,
    ) -> Result<Option<Route>, EvalError> {
        self.search(src, dest, &self.legal(src, dest))
    }

    /// Returns true if `get_legal_convoy_route` finds a route.
    pub fn is_legal_convoy_route(&self, src: Region, dest: Region) -> Result<bool, EvalError> {
        Ok(self.get_legal_convoy_route(src, dest)?.is_some())
    }

    /// Classifies the convoy of `src` to `dest`, treating the fleet at
    /// `invalid` (if any) as unable to convoy.
    ///
    /// A route whose fleets all succeeded makes the convoy a success. Failing
    /// that, a route that also crosses undecided fleets leaves it uncertain.
    /// Otherwise it fails.
    pub fn evaluate_convoy(
        &self,
        src: Region,
        dest: Region,
        invalid: Option<Region>,
    ) -> Result<ConvoyEvaluation, EvalError> {
        let strict = Staged::new(self.scope(src, dest), invalid, false);
        if let Some(route) = self.search(src, dest, &strict)? {
            tracing::debug!(
                src = self.graph.info(src).short_name(),
                dest = self.graph.info(dest).short_name(),
                len = route.len(),
                "convoy succeeds"
            );
            return Ok(ConvoyEvaluation::success(route));
        }

        let lenient = Staged::new(self.scope(src, dest), invalid, true);
        let state = if self.search(src, dest, &lenient)?.is_some() {
            Tristate::Uncertain
        } else {
            Tristate::Failure
        };
        tracing::debug!(
            src = self.graph.info(src).short_name(),
            dest = self.graph.info(dest).short_name(),
            ?state,
            failed_fleets = lenient.saw_failure(),
            "convoy undecided or failed"
        );
        Ok(ConvoyEvaluation::without_route(state))
    }

    /// Classifies a single route by its interior fleets. A two-region route
    /// has none to fail, so it succeeds: the endpoints touch directly.
    fn classify_route(&self, route: &Route, invalid: Option<Region>) -> Result<Tristate, EvalError> {
        let (Some(src), Some(dest)) = (route.source(), route.destination()) else {
            return Ok(Tristate::Failure);
        };
        if src == dest {
            return Ok(Tristate::Failure);
        }
        let scope = self.scope(src, dest);
        let mut state = Tristate::Success;
        for &region in route.interior() {
            if invalid == Some(region) {
                return Ok(Tristate::Failure);
            }
            match scope.fleet_status(region)? {
                FleetStatus::Absent | FleetStatus::Failed => return Ok(Tristate::Failure),
                FleetStatus::Uncertain => state = Tristate::Uncertain,
                FleetStatus::Succeeded => {}
            }
        }
        Ok(state)
    }

    /// Combines per-route classifications: any successful route wins, then
    /// any uncertain one. The first successful route is reported.
    pub fn evaluate_routes(
        &self,
        candidates: &[Route],
        invalid: Option<Region>,
    ) -> Result<ConvoyEvaluation, EvalError> {
        let mut best = Tristate::Failure;
        for route in candidates {
            match self.classify_route(route, invalid)? {
                Tristate::Success => return Ok(ConvoyEvaluation::success(route.clone())),
                state => best = best.max(state),
            }
        }
        Ok(ConvoyEvaluation::without_route(best))
    }

    /// Classifies the explicitly chosen routes of a move order. Orders
    /// without explicit routes fail.
    pub fn evaluate_explicit_routes(
        &self,
        order: &Order,
        invalid: Option<Region>,
    ) -> Result<ConvoyEvaluation, EvalError> {
        self.evaluate_routes(order.explicit_routes(), invalid)
    }

    /// Enumerates every legal route of `src` to `dest` and classifies them
    /// together, so that disrupting one fleet leaves the others' routes open.
    pub fn evaluate_all_routes(
        &self,
        src: Region,
        dest: Region,
        invalid: Option<Region>,
    ) -> Result<ConvoyEvaluation, EvalError> {
        let candidates = self.find_all_sea_routes(&self.legal(src, dest), src, dest)?;
        let evaluation = self.evaluate_routes(&candidates, invalid)?;
        tracing::debug!(
            src = self.graph.info(src).short_name(),
            dest = self.graph.info(dest).short_name(),
            routes = candidates.len(),
            state = ?evaluation.state,
            "multi-route convoy evaluated"
        );
        Ok(evaluation)
    }

    /// Every simple sea route of `src` to `dest` through regions `policy`
    /// accepts.
    pub fn find_all_sea_routes<P: RoutePolicy + ?Sized>(
        &self,
        policy: &P,
        src: Region,
        dest: Region,
    ) -> Result<Vec<Route>, EvalError> {
        routes::find_all_sea_routes(self.graph, policy, src, dest)
    }

    /// Shortest step count between two regions; `None` if disconnected.
    pub fn min_distance(&self, src: Region, dest: Region) -> Option<usize> {
        distance::min_distance(self.graph, src, dest)
    }
}
