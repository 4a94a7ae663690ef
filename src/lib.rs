//! Convoy route engine library.
//!
//! Exposes the map model, graph searches, and convoy resolution used by a
//! Diplomacy-style adjudicator. Integration tests and benches build on the
//! same public modules.

pub mod board;
pub mod path;
pub mod resolve;
