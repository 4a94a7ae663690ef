//! Coast-typed adjacency graph.
//!
//! Each region stores one adjacency list per direct coast kind: `Land` for
//! army movement, `Single` for fleets on undivided coasts and at sea, and
//! one list per direction for split-coast regions. Edges are directed; map
//! data lists both directions.
//!
//! The derived `Wing` ("touching") list is the union of every direct list,
//! deduplicated by region. It is computed once per region by
//! `MapBuilder::build`, after all direct coasts are loaded, and the graph is
//! immutable from then on, so one instance can be shared across games.

use std::collections::HashMap;

use super::region::{Border, CoastKind, Location, Region, RegionInfo, RegionKind};
use super::unit::UnitType;

/// Errors detected while building a map.
///
/// All of these are configuration errors: they are reported to whoever is
/// loading the map and never surface during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("duplicate region name or alias: '{0}'")]
    DuplicateName(String),

    #[error("unknown region reference: '{0}'")]
    UnknownRegion(String),

    #[error("invalid coast in reference: '{0}'")]
    InvalidCoast(String),

    #[error("coast kind {1:?} cannot carry direct adjacency (region '{0}')")]
    NotDirectCoast(String, CoastKind),

    #[error("region '{0}' is adjacent to itself")]
    SelfAdjacent(String),

    #[error("region '{0}' mixes a single coast with directional coasts")]
    MixedCoasts(String),

    #[error("region '{0}' has directional coasts but no land adjacency")]
    DirectionalWithoutLand(String),

    #[error("region '{0}' has no adjacency")]
    Isolated(String),

    #[error("region '{0}' links to coast {2:?} of '{1}', which has no adjacency")]
    MissingTargetCoast(String, String, CoastKind),

    #[error("convoyable coast '{0}' must be a land region with a sea coast")]
    InvalidConvoyableCoast(String),

    #[error("cannot add region '{0}': a map holds at most {max} regions", max = Region::MAX_COUNT)]
    TooManyRegions(String),

    #[error("flag '{1}' already set on region '{0}'")]
    FlagAlreadySet(String, &'static str),

    #[error("malformed map definition: {0}")]
    Json(#[from] serde_json::Error),
}

type CoastLists = [Vec<Location>; CoastKind::COUNT];

fn empty_lists() -> CoastLists {
    std::array::from_fn(|_| Vec::new())
}

/// Region data accumulated before the graph is frozen.
struct PendingRegion {
    name: String,
    aliases: Vec<String>,
    convoyable_coast: Option<bool>,
    supply_center: Option<bool>,
    borders: Vec<Border>,
    adjacency: CoastLists,
}

/// Incremental constructor for an `AdjacencyGraph`.
///
/// Regions are added first, then adjacency, flags, and borders. `build`
/// validates coast combinations, derives the `Wing` lists, and freezes the
/// result.
pub struct MapBuilder {
    name: String,
    regions: Vec<PendingRegion>,
    names: HashMap<String, Region>,
}

impl MapBuilder {
    /// Creates an empty builder for a map with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        MapBuilder {
            name: name.into(),
            regions: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Adds a region and returns its handle.
    ///
    /// The full name and every alias must be unique (case-insensitively)
    /// across the map, and the map may not outgrow `Region::MAX_COUNT`.
    pub fn add_region(&mut self, name: &str, aliases: &[&str]) -> Result<Region, MapError> {
        if self.regions.len() >= Region::MAX_COUNT {
            return Err(MapError::TooManyRegions(name.to_string()));
        }
        let region = Region::new(self.regions.len());
        let mut keys: Vec<String> = Vec::with_capacity(aliases.len() + 1);
        for key in std::iter::once(name).chain(aliases.iter().copied()) {
            let key = key.to_ascii_lowercase();
            if self.names.contains_key(&key) || keys.contains(&key) {
                return Err(MapError::DuplicateName(key));
            }
            keys.push(key);
        }
        self.names.extend(keys.into_iter().map(|k| (k, region)));
        self.regions.push(PendingRegion {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            convoyable_coast: None,
            supply_center: None,
            borders: Vec::new(),
            adjacency: empty_lists(),
        });
        Ok(region)
    }

    /// Looks up a region added so far by name or alias.
    pub fn region(&self, name: &str) -> Option<Region> {
        self.names.get(&name.to_ascii_lowercase()).copied()
    }

    /// Resolves a reference such as `lon` or `spa/nc`.
    ///
    /// References without a coast suffix get `default_coast`.
    pub fn resolve(&self, reference: &str, default_coast: CoastKind) -> Result<Location, MapError> {
        let (name, coast) = match reference.split_once('/') {
            Some((name, suffix)) => {
                let coast = CoastKind::from_suffix(&suffix.to_ascii_lowercase())
                    .ok_or_else(|| MapError::InvalidCoast(reference.to_string()))?;
                (name, coast)
            }
            None => (reference, default_coast),
        };
        let region = self
            .region(name)
            .ok_or_else(|| MapError::UnknownRegion(name.to_string()))?;
        Ok(Location::new(region, coast))
    }

    /// Adds a directed edge from `(from, coast)` to `to`.
    ///
    /// Duplicate edges are ignored.
    pub fn add_adjacency(
        &mut self,
        from: Region,
        coast: CoastKind,
        to: Location,
    ) -> Result<(), MapError> {
        let pending = &mut self.regions[from.index()];
        if !coast.is_direct() {
            return Err(MapError::NotDirectCoast(pending.name.clone(), coast));
        }
        if !to.coast.is_direct() {
            return Err(MapError::NotDirectCoast(pending.name.clone(), to.coast));
        }
        if to.region == from {
            return Err(MapError::SelfAdjacent(pending.name.clone()));
        }
        let list = &mut pending.adjacency[coast.index()];
        if !list.contains(&to) {
            list.push(to);
        }
        Ok(())
    }

    /// Adds edges in both directions between two locations.
    pub fn connect(&mut self, a: Location, b: Location) -> Result<(), MapError> {
        self.add_adjacency(a.region, a.coast, b)?;
        self.add_adjacency(b.region, b.coast, a)
    }

    /// Marks a region as a convoyable coast. May only be set once.
    pub fn set_convoyable_coast(&mut self, region: Region, value: bool) -> Result<(), MapError> {
        let pending = &mut self.regions[region.index()];
        if pending.convoyable_coast.is_some() {
            return Err(MapError::FlagAlreadySet(pending.name.clone(), "convoyable_coast"));
        }
        pending.convoyable_coast = Some(value);
        Ok(())
    }

    /// Marks a region as holding a supply center. May only be set once.
    pub fn set_supply_center(&mut self, region: Region, value: bool) -> Result<(), MapError> {
        let pending = &mut self.regions[region.index()];
        if pending.supply_center.is_some() {
            return Err(MapError::FlagAlreadySet(pending.name.clone(), "supply_center"));
        }
        pending.supply_center = Some(value);
        Ok(())
    }

    /// Attaches a transit restriction to a region.
    pub fn add_border(&mut self, region: Region, border: Border) {
        self.regions[region.index()].borders.push(border);
    }

    /// Validates the map, derives `Wing` adjacency, and freezes the graph.
    pub fn build(self) -> Result<AdjacencyGraph, MapError> {
        let mut kinds = Vec::with_capacity(self.regions.len());
        for pending in &self.regions {
            kinds.push(classify(&pending.name, &pending.adjacency)?);
        }

        for pending in &self.regions {
            for coast in CoastKind::DIRECT {
                for to in &pending.adjacency[coast.index()] {
                    let target = &self.regions[to.region.index()];
                    if target.adjacency[to.coast.index()].is_empty() {
                        return Err(MapError::MissingTargetCoast(
                            pending.name.clone(),
                            target.name.clone(),
                            to.coast,
                        ));
                    }
                }
            }
        }

        let mut regions = Vec::with_capacity(self.regions.len());
        let mut adjacency = Vec::with_capacity(self.regions.len());
        for (pending, kind) in self.regions.into_iter().zip(kinds) {
            let convoyable = pending.convoyable_coast.unwrap_or(false);
            if convoyable && !matches!(kind, RegionKind::SingleCoastal | RegionKind::MultiCoastal) {
                return Err(MapError::InvalidConvoyableCoast(pending.name));
            }

            let mut lists = pending.adjacency;
            lists[CoastKind::Wing.index()] = derive_wing(&lists);
            adjacency.push(lists);

            regions.push(RegionInfo {
                name: pending.name,
                aliases: pending.aliases,
                kind,
                is_convoyable_coast: convoyable,
                has_supply_center: pending.supply_center.unwrap_or(false),
                borders: pending.borders,
            });
        }

        tracing::debug!(map = %self.name, regions = regions.len(), "adjacency graph built");

        Ok(AdjacencyGraph {
            name: self.name,
            regions,
            adjacency,
            names: self.names,
        })
    }
}

/// Determines the region kind from which direct coasts carry adjacency.
fn classify(name: &str, lists: &CoastLists) -> Result<RegionKind, MapError> {
    let land = !lists[CoastKind::Land.index()].is_empty();
    let single = !lists[CoastKind::Single.index()].is_empty();
    let directional = CoastKind::DIRECT
        .iter()
        .any(|c| c.is_directional() && !lists[c.index()].is_empty());

    match (land, single, directional) {
        (_, true, true) => Err(MapError::MixedCoasts(name.to_string())),
        (false, false, true) => Err(MapError::DirectionalWithoutLand(name.to_string())),
        (false, false, false) => Err(MapError::Isolated(name.to_string())),
        (true, false, false) => Ok(RegionKind::Landlocked),
        (false, true, false) => Ok(RegionKind::Sea),
        (true, true, false) => Ok(RegionKind::SingleCoastal),
        (true, false, true) => Ok(RegionKind::MultiCoastal),
    }
}

/// Unions all direct lists, keeping the first occurrence of each region.
fn derive_wing(lists: &CoastLists) -> Vec<Location> {
    let mut wing: Vec<Location> = Vec::new();
    for coast in CoastKind::DIRECT {
        for loc in &lists[coast.index()] {
            if !wing.iter().any(|w| w.region == loc.region) {
                wing.push(Location::new(loc.region, CoastKind::Wing));
            }
        }
    }
    wing
}

/// Immutable region/coast adjacency model for one map.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    name: String,
    regions: Vec<RegionInfo>,
    adjacency: Vec<CoastLists>,
    names: HashMap<String, Region>,
}

impl AdjacencyGraph {
    /// Returns the map's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Iterates over all regions in index order.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.regions.len()).map(Region::new)
    }

    /// Returns the metadata for a region.
    #[inline]
    pub fn info(&self, region: Region) -> &RegionInfo {
        &self.regions[region.index()]
    }

    /// Looks up a region by full name or alias, ignoring case.
    pub fn region_by_name(&self, name: &str) -> Option<Region> {
        self.names.get(&name.to_ascii_lowercase()).copied()
    }

    /// Resolves a reference such as `stp/sc` to a location.
    ///
    /// References without a suffix resolve to the `Land` coast for land
    /// regions and `Single` for seas.
    pub fn location(&self, reference: &str) -> Option<Location> {
        let (name, coast) = match reference.split_once('/') {
            Some((name, suffix)) => (name, Some(CoastKind::from_suffix(suffix)?)),
            None => (reference, None),
        };
        let region = self.region_by_name(name)?;
        let coast = coast.unwrap_or(if self.is_land(region) {
            CoastKind::Land
        } else {
            CoastKind::Single
        });
        Some(Location::new(region, coast))
    }

    /// Returns the region's terrain kind.
    #[inline]
    pub fn kind(&self, region: Region) -> RegionKind {
        self.regions[region.index()].kind
    }

    /// Returns true if the region is a sea.
    #[inline]
    pub fn is_sea(&self, region: Region) -> bool {
        self.kind(region) == RegionKind::Sea
    }

    /// Returns true if an army can stand on the region.
    #[inline]
    pub fn is_land(&self, region: Region) -> bool {
        self.kind(region).is_land()
    }

    /// Returns true if a fleet in this region can take part in a convoy.
    #[inline]
    pub fn is_sea_or_convoyable(&self, region: Region) -> bool {
        let info = &self.regions[region.index()];
        info.kind == RegionKind::Sea || info.is_convoyable_coast
    }

    /// Returns the locations adjacent to `(region, coast)`; empty if none.
    #[inline]
    pub fn get_adjacent(&self, region: Region, coast: CoastKind) -> &[Location] {
        &self.adjacency[region.index()][coast.index()]
    }

    /// Returns every region touching `region` across all coasts, once each.
    ///
    /// Entries carry the `Wing` coast.
    #[inline]
    pub fn get_all_adjacent(&self, region: Region) -> &[Location] {
        self.get_adjacent(region, CoastKind::Wing)
    }

    /// Iterates over the coasts of `region` that carry direct adjacency.
    pub fn direct_coasts(&self, region: Region) -> impl Iterator<Item = CoastKind> + '_ {
        let lists = &self.adjacency[region.index()];
        CoastKind::DIRECT
            .into_iter()
            .filter(move |c| !lists[c.index()].is_empty())
    }

    /// Returns true if `dest` is reachable in one step from `(from, from_coast)`.
    ///
    /// When `dest_coast` is given the edge must also land on that coast.
    pub fn is_adjacent(
        &self,
        from: Region,
        from_coast: CoastKind,
        dest: Region,
        dest_coast: Option<CoastKind>,
    ) -> bool {
        self.get_adjacent(from, from_coast)
            .iter()
            .any(|l| l.region == dest && dest_coast.map_or(true, |c| l.coast == c))
    }

    /// Returns true if a unit of `unit_type` may cross from `from` into `to`.
    ///
    /// Only the borders attached to `to` are consulted; adjacency is not.
    pub fn can_transit(&self, from: Region, to: Region, unit_type: UnitType) -> bool {
        !self.regions[to.index()]
            .borders
            .iter()
            .any(|b| b.forbids(from, unit_type))
    }
}
