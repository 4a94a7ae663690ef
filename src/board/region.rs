//! Regions, coasts, and locations.
//!
//! A `Region` is an opaque dense index handed out by the map builder. All
//! metadata (names, kind, flags, borders) lives in the `AdjacencyGraph` that
//! created the handle, so two handles compare equal exactly when they name
//! the same region of the same map.

use serde::{Deserialize, Serialize};

use super::unit::UnitType;

/// Handle to a region of an `AdjacencyGraph`.
///
/// The inner value is the region's dense index, usable for array lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Region(u16);

impl Region {
    /// Most regions a single map can hold.
    pub const MAX_COUNT: usize = u16::MAX as usize + 1;

    pub(crate) const fn new(index: usize) -> Self {
        debug_assert!(index < Region::MAX_COUNT);
        Region(index as u16)
    }

    /// Returns the dense index of this region.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Edge-type discriminator for adjacency lists.
///
/// `Land` carries army adjacency, `Single` fleet adjacency of sea and
/// single-coast regions, and the four directions the separate coasts of
/// split-coast regions. `Wing` is the derived "touching" adjacency and is
/// never set directly. `Undefined` marks an unspecified coast.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CoastKind {
    Land = 0,
    Single = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
    Wing = 6,
    Undefined = 7,
}

impl CoastKind {
    /// Number of coast kinds.
    pub const COUNT: usize = 8;

    /// Coast kinds that may carry directly loaded adjacency, in storage order.
    pub const DIRECT: [CoastKind; 6] = [
        CoastKind::Land,
        CoastKind::Single,
        CoastKind::North,
        CoastKind::South,
        CoastKind::West,
        CoastKind::East,
    ];

    /// Returns the storage index of this coast kind.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for North, South, West and East.
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            CoastKind::North | CoastKind::South | CoastKind::West | CoastKind::East
        )
    }

    /// Returns true if adjacency may be loaded for this kind.
    pub const fn is_direct(self) -> bool {
        !matches!(self, CoastKind::Wing | CoastKind::Undefined)
    }

    /// Returns true if this kind carries fleet adjacency.
    pub const fn is_fleet_coast(self) -> bool {
        matches!(self, CoastKind::Single) || self.is_directional()
    }

    /// Returns the 2-letter suffix used in region references (`spa/nc`).
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            CoastKind::North => Some("nc"),
            CoastKind::South => Some("sc"),
            CoastKind::West => Some("wc"),
            CoastKind::East => Some("ec"),
            _ => None,
        }
    }

    /// Parses a directional coast from its 2-letter suffix.
    pub fn from_suffix(s: &str) -> Option<CoastKind> {
        match s {
            "nc" => Some(CoastKind::North),
            "sc" => Some(CoastKind::South),
            "wc" => Some(CoastKind::West),
            "ec" => Some(CoastKind::East),
            _ => None,
        }
    }
}

/// Terrain classification derived from a region's direct coasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Army adjacency only.
    Landlocked,
    /// Single-coast fleet adjacency only.
    Sea,
    /// Army adjacency plus one undivided coast.
    SingleCoastal,
    /// Army adjacency plus one or more directional coasts.
    MultiCoastal,
}

impl RegionKind {
    /// Returns true for every kind an army can stand on.
    pub const fn is_land(self) -> bool {
        !matches!(self, RegionKind::Sea)
    }
}

/// The addressable endpoint of an adjacency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub region: Region,
    pub coast: CoastKind,
}

impl Location {
    pub const fn new(region: Region, coast: CoastKind) -> Self {
        Location { region, coast }
    }
}

/// A transit restriction attached to a region.
///
/// The border forbids the listed unit types from entering its region. When
/// `from` is non-empty it only applies to units arriving from those regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    pub name: String,
    pub forbidden: Vec<UnitType>,
    pub from: Vec<Region>,
}

impl Border {
    /// Returns true if this border stops a unit of `unit_type` coming from `from`.
    pub fn forbids(&self, from: Region, unit_type: UnitType) -> bool {
        self.forbidden.contains(&unit_type) && (self.from.is_empty() || self.from.contains(&from))
    }
}

/// Static metadata for a region.
#[derive(Debug, Clone)]
pub struct RegionInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub kind: RegionKind,
    pub is_convoyable_coast: bool,
    pub has_supply_center: bool,
    pub borders: Vec<Border>,
}

impl RegionInfo {
    /// Returns the first alias, or the full name if there is none.
    pub fn short_name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coast_suffix_roundtrip() {
        for c in [CoastKind::North, CoastKind::South, CoastKind::West, CoastKind::East] {
            let suffix = c.suffix().unwrap();
            assert_eq!(CoastKind::from_suffix(suffix), Some(c));
        }
        assert_eq!(CoastKind::Single.suffix(), None);
        assert_eq!(CoastKind::from_suffix("xc"), None);
    }

    #[test]
    fn coast_indices_are_sequential() {
        for (i, c) in CoastKind::DIRECT.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(CoastKind::Undefined.index(), CoastKind::COUNT - 1);
    }

    #[test]
    fn wing_and_undefined_are_not_direct() {
        assert!(!CoastKind::Wing.is_direct());
        assert!(!CoastKind::Undefined.is_direct());
        assert!(CoastKind::DIRECT.iter().all(|c| c.is_direct()));
        assert!(!CoastKind::Land.is_fleet_coast());
        assert!(CoastKind::East.is_fleet_coast());
    }

    #[test]
    fn border_scoped_to_origin() {
        let border = Border {
            name: "pass".into(),
            forbidden: vec![UnitType::Army],
            from: vec![Region::new(3)],
        };
        assert!(border.forbids(Region::new(3), UnitType::Army));
        assert!(!border.forbids(Region::new(4), UnitType::Army));
        assert!(!border.forbids(Region::new(3), UnitType::Fleet));
    }

    #[test]
    fn unscoped_border_applies_everywhere() {
        let border = Border {
            name: "reef".into(),
            forbidden: vec![UnitType::Fleet],
            from: Vec::new(),
        };
        assert!(border.forbids(Region::new(0), UnitType::Fleet));
        assert!(border.forbids(Region::new(9), UnitType::Fleet));
    }

    #[test]
    fn short_name_prefers_alias() {
        let info = RegionInfo {
            name: "London".into(),
            aliases: vec!["lon".into()],
            kind: RegionKind::SingleCoastal,
            is_convoyable_coast: false,
            has_supply_center: true,
            borders: Vec::new(),
        };
        assert_eq!(info.short_name(), "lon");
        assert!(info.kind.is_land());
        assert!(!RegionKind::Sea.is_land());
    }
}
