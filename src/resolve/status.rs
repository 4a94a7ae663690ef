//! Order evaluation state shared with the outer adjudicator.
//!
//! The adjudicator refines each order's `Tristate` and dislodged state over
//! repeated iterations until a fixpoint. The convoy engine only reads these
//! values, and re-reads them on every call: nothing derived from them is
//! cached.

use std::collections::HashMap;

use crate::board::order::Order;
use crate::board::region::Region;

/// Three-valued outcome used before adjudication reaches a fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tristate {
    Success,
    Failure,
    Uncertain,
}

impl Tristate {
    /// Returns the stronger of two outcomes: Success > Uncertain > Failure.
    pub fn max(self, other: Tristate) -> Tristate {
        match (self, other) {
            (Tristate::Success, _) | (_, Tristate::Success) => Tristate::Success,
            (Tristate::Uncertain, _) | (_, Tristate::Uncertain) => Tristate::Uncertain,
            _ => Tristate::Failure,
        }
    }
}

/// Whether the ordered unit is dislodged this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DislodgedState {
    Yes,
    No,
    Unknown,
}

/// An issued order together with its current evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderState {
    order: Order,
    eval: Tristate,
    dislodged: DislodgedState,
}

impl OrderState {
    /// Wraps a freshly issued order: uncertain, dislodgement unknown.
    pub fn new(order: Order) -> Self {
        OrderState {
            order,
            eval: Tristate::Uncertain,
            dislodged: DislodgedState::Unknown,
        }
    }

    /// Wraps an order with explicit evaluation values.
    pub fn with_states(order: Order, eval: Tristate, dislodged: DislodgedState) -> Self {
        OrderState { order, eval, dislodged }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn eval_state(&self) -> Tristate {
        self.eval
    }

    pub fn dislodged_state(&self) -> DislodgedState {
        self.dislodged
    }

    pub fn set_eval_state(&mut self, eval: Tristate) {
        self.eval = eval;
    }

    pub fn set_dislodged_state(&mut self, dislodged: DislodgedState) {
        self.dislodged = dislodged;
    }
}

/// Read-only lookup of order states by the region of the ordered unit.
pub trait OrderStateLookup {
    fn by_region(&self, region: Region) -> Option<&OrderState>;
}

impl OrderStateLookup for HashMap<Region, OrderState> {
    fn by_region(&self, region: Region) -> Option<&OrderState> {
        self.get(&region)
    }
}

/// Order states for one map, indexed by region.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    states: Vec<Option<OrderState>>,
}

impl OrderBook {
    /// Creates an empty book for a map with `region_count` regions.
    pub fn new(region_count: usize) -> Self {
        OrderBook {
            states: vec![None; region_count],
        }
    }

    /// Stores `state` under its order's region, returning any previous state.
    pub fn insert(&mut self, state: OrderState) -> Option<OrderState> {
        let idx = state.order().region().index();
        if idx >= self.states.len() {
            self.states.resize(idx + 1, None);
        }
        self.states[idx].replace(state)
    }

    /// Issues `order` with uncertain, undecided state.
    pub fn issue(&mut self, order: Order) -> Option<OrderState> {
        self.insert(OrderState::new(order))
    }

    pub fn get_mut(&mut self, region: Region) -> Option<&mut OrderState> {
        self.states.get_mut(region.index()).and_then(Option::as_mut)
    }

    /// Updates the evaluation of the order at `region`.
    /// Returns false if no order is stored there.
    pub fn set_eval_state(&mut self, region: Region, eval: Tristate) -> bool {
        match self.get_mut(region) {
            Some(state) => {
                state.set_eval_state(eval);
                true
            }
            None => false,
        }
    }

    /// Updates the dislodged state of the order at `region`.
    /// Returns false if no order is stored there.
    pub fn set_dislodged_state(&mut self, region: Region, dislodged: DislodgedState) -> bool {
        match self.get_mut(region) {
            Some(state) => {
                state.set_dislodged_state(dislodged);
                true
            }
            None => false,
        }
    }

    /// Iterates over all stored order states.
    pub fn iter(&self) -> impl Iterator<Item = &OrderState> {
        self.states.iter().flatten()
    }
}

impl OrderStateLookup for OrderBook {
    fn by_region(&self, region: Region) -> Option<&OrderState> {
        self.states.get(region.index()).and_then(Option::as_ref)
    }
}

/// Fatal errors raised while evaluating convoys.
///
/// These signal a broken contract with the outer adjudicator, never an
/// ordinary "no route" result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("no order state for the unit in region #{}", .0.index())]
    MissingOrderState(Region),
}
