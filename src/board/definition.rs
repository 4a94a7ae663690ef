//! Map definitions.
//!
//! A `MapDefinition` is the serde form of a map: regions with their names,
//! flags, borders, and per-coast adjacency references. References are region
//! names or aliases, optionally suffixed with a coast (`stp/nc`). A reference
//! without a suffix lands on the `Land` coast when listed under `land`, and
//! on the `Single` coast otherwise.
//!
//! ```json
//! {
//!   "name": "Standard",
//!   "regions": [
//!     {"name": "London", "aliases": ["lon"], "supply_center": true,
//!      "adjacency": {"land": ["wal", "yor"], "single": ["eng", "nth", "wal", "yor"]}}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::adjacency::{AdjacencyGraph, MapBuilder, MapError};
use super::region::{Border, CoastKind};
use super::unit::UnitType;

/// Serializable description of a whole map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    #[serde(default)]
    pub name: String,
    pub regions: Vec<RegionDefinition>,
}

/// Serializable description of one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub supply_center: bool,
    #[serde(default)]
    pub convoyable_coast: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<BorderDefinition>,
    #[serde(default)]
    pub adjacency: BTreeMap<CoastKind, Vec<String>>,
}

/// Serializable transit restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderDefinition {
    pub name: String,
    pub forbid: Vec<UnitType>,
    #[serde(default)]
    pub from: Vec<String>,
}

impl MapDefinition {
    /// Parses a definition from JSON text.
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the adjacency graph described by this definition.
    ///
    /// Regions are registered first so references may point forward.
    pub fn to_graph(&self) -> Result<AdjacencyGraph, MapError> {
        let mut builder = MapBuilder::new(self.name.clone());
        let mut handles = Vec::with_capacity(self.regions.len());
        for def in &self.regions {
            let aliases: Vec<&str> = def.aliases.iter().map(String::as_str).collect();
            handles.push(builder.add_region(&def.name, &aliases)?);
        }

        for (def, &region) in self.regions.iter().zip(&handles) {
            for (&coast, references) in &def.adjacency {
                let default_coast = if coast == CoastKind::Land {
                    CoastKind::Land
                } else {
                    CoastKind::Single
                };
                for reference in references {
                    let to = builder.resolve(reference, default_coast)?;
                    builder.add_adjacency(region, coast, to)?;
                }
            }

            if def.supply_center {
                builder.set_supply_center(region, true)?;
            }
            if def.convoyable_coast {
                builder.set_convoyable_coast(region, true)?;
            }

            for border in &def.borders {
                let from = border
                    .from
                    .iter()
                    .map(|name| {
                        builder
                            .region(name)
                            .ok_or_else(|| MapError::UnknownRegion(name.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                builder.add_border(
                    region,
                    Border {
                        name: border.name.clone(),
                        forbidden: border.forbid.clone(),
                        from,
                    },
                );
            }
        }

        builder.build()
    }
}

impl AdjacencyGraph {
    /// Parses a JSON map definition and builds its graph.
    pub fn from_json(text: &str) -> Result<AdjacencyGraph, MapError> {
        MapDefinition::from_json(text)?.to_graph()
    }
}
