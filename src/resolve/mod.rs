//! Convoy resolution.
//!
//! Classifies convoyed moves as succeeded, failed, or not yet decided against
//! order states supplied by the adjudicator, using one of three acceptance
//! policies for the fleets along a route.

pub mod convoy;
pub mod policy;
pub mod status;

pub use convoy::{ConvoyEvaluation, ConvoyEvaluator};
pub use policy::{ConvoyScope, FleetStatus, Legal, RoutePolicy, Staged, Theoretical};
pub use status::{DislodgedState, EvalError, OrderBook, OrderState, OrderStateLookup, Tristate};
