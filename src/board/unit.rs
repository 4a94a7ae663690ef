//! Unit types and placement.
//!
//! Represents armies and fleets and the coast a fleet occupies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::region::CoastKind;

/// The type of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    /// Returns the uppercase abbreviation used in order notation.
    pub const fn abbr(self) -> char {
        match self {
            UnitType::Army => 'A',
            UnitType::Fleet => 'F',
        }
    }

    /// Parses a unit type from its uppercase abbreviation.
    pub fn from_abbr(c: char) -> Option<UnitType> {
        match c {
            'A' => Some(UnitType::Army),
            'F' => Some(UnitType::Fleet),
            _ => None,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbr())
    }
}

/// A military unit on the board.
///
/// Armies always stand on the `Land` coast; fleets record the coast they
/// occupy (`Single` or a direction on split-coast regions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub unit_type: UnitType,
    pub coast: CoastKind,
}

impl Unit {
    /// Creates an army.
    pub const fn army() -> Self {
        Unit { unit_type: UnitType::Army, coast: CoastKind::Land }
    }

    /// Creates a fleet on an undivided coast or at sea.
    pub const fn fleet() -> Self {
        Unit { unit_type: UnitType::Fleet, coast: CoastKind::Single }
    }

    /// Creates a fleet on the given coast.
    pub const fn fleet_on(coast: CoastKind) -> Self {
        Unit { unit_type: UnitType::Fleet, coast }
    }

    /// Returns the unit type.
    pub const fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// Returns true if this unit is a fleet.
    pub const fn is_fleet(&self) -> bool {
        matches!(self.unit_type, UnitType::Fleet)
    }
}
