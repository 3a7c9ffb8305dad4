//! JSON interchange format for placed designs.
//!
//! ```json
//! {
//!   "cells": [
//!     { "name": "ff0", "type": "ICESTORM_LC",
//!       "params": { "DFF_ENABLE": "1" },
//!       "ports": { "CLK": { "direction": "input", "net": "clk" },
//!                  "O":   { "direction": "output", "net": "q0" } } }
//!   ],
//!   "placement": [
//!     { "cell": "ff0", "site": "X1/Y1/lc0", "strength": "fixed" }
//!   ]
//! }
//! ```
//!
//! Nets are created on first mention. Ports are declared in name order.

use crate::netlist::{CellKind, Netlist, NetlistError, ParamValue, PortDirection};
use crate::placement::{BindStrength, Placement, PlacementError};
use frost_arch::Architecture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors raised while loading a design file.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    /// The design file could not be read.
    #[error("failed to read design: {0}")]
    Io(#[from] std::io::Error),

    /// The design file is not valid JSON for this format.
    #[error("failed to parse design: {0}")]
    Parse(String),

    /// The netlist is malformed.
    #[error(transparent)]
    Netlist(#[from] NetlistError),

    /// A placement entry names a cell that does not exist.
    #[error("placement refers to unknown cell '{0}'")]
    UnknownCell(String),

    /// A placement entry names a site the fabric does not have.
    #[error("placement refers to unknown site '{0}'")]
    UnknownSite(String),

    /// A placement entry conflicts with an earlier one.
    #[error("cannot place '{cell}' at '{site}': {source}")]
    Bind {
        /// Cell name.
        cell: String,
        /// Site name.
        site: String,
        /// The conflict.
        source: PlacementError,
    },
}

/// One port of a cell in the design file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port direction.
    pub direction: PortDirection,
    /// Connected net name; absent means unconnected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
}

/// One cell in the design file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSpec {
    /// Instance name.
    pub name: String,
    /// Primitive kind.
    #[serde(rename = "type")]
    pub kind: CellKind,
    /// Parameters by name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
    /// Ports by name.
    #[serde(default)]
    pub ports: BTreeMap<String, PortSpec>,
}

/// One binding in the design file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSpec {
    /// Cell name.
    pub cell: String,
    /// Site name.
    pub site: String,
    /// Binding strength; defaults to `placer`.
    #[serde(default)]
    pub strength: BindStrength,
}

/// A placed design as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignFile {
    /// All cells.
    #[serde(default)]
    pub cells: Vec<CellSpec>,
    /// All bindings.
    #[serde(default)]
    pub placement: Vec<PlacementSpec>,
}

impl DesignFile {
    /// Parses a design from JSON.
    pub fn from_json(json: &str) -> Result<Self, DesignError> {
        serde_json::from_str(json).map_err(|e| DesignError::Parse(e.to_string()))
    }

    /// Reads and parses a design from disk.
    pub fn load(path: &Path) -> Result<Self, DesignError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds the netlist and resolves the placement against `arch`.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names, multiply driven nets, unknown cells or
    /// sites, and bindings that reuse a site or a cell.
    pub fn into_netlist(self, arch: &dyn Architecture) -> Result<(Netlist, Placement), DesignError> {
        let mut netlist = Netlist::new();

        for spec in self.cells {
            let cell = netlist.add_cell(spec.name, spec.kind)?;
            for (name, value) in spec.params {
                netlist.set_param(cell, &name, value);
            }
            for (port, port_spec) in spec.ports {
                let net = match port_spec.net {
                    Some(net_name) => Some(match netlist.net_by_name(&net_name) {
                        Some(net) => net,
                        None => netlist.add_net(net_name)?,
                    }),
                    None => None,
                };
                netlist.connect(cell, &port, port_spec.direction, net)?;
            }
        }

        let mut placement = Placement::new();
        for spec in self.placement {
            let cell = netlist
                .cell_by_name(&spec.cell)
                .ok_or_else(|| DesignError::UnknownCell(spec.cell.clone()))?;
            let site = arch
                .site_by_name(&spec.site)
                .ok_or_else(|| DesignError::UnknownSite(spec.site.clone()))?;
            placement
                .bind(cell, site, spec.strength)
                .map_err(|source| DesignError::Bind {
                    cell: spec.cell,
                    site: spec.site,
                    source,
                })?;
        }

        Ok((netlist, placement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constids::{CLK, DFF_ENABLE, O};
    use frost_arch::{FabricBuilder, Location, SiteType};

    fn fabric() -> frost_arch::Fabric {
        let mut b = FabricBuilder::new("t");
        for z in 0..2 {
            b.add_site(SiteType::Logic, Location::new(1, 1, z), "").unwrap();
        }
        b.build()
    }

    const DESIGN: &str = r#"{
        "cells": [
            { "name": "ff0", "type": "ICESTORM_LC",
              "params": { "DFF_ENABLE": "1" },
              "ports": { "CLK": { "direction": "input", "net": "clk" },
                         "O": { "direction": "output", "net": "q0" },
                         "SR": { "direction": "input" } } },
            { "name": "ff1", "type": "ICESTORM_LC",
              "ports": { "I0": { "direction": "input", "net": "q0" } } }
        ],
        "placement": [
            { "cell": "ff0", "site": "X1/Y1/lc0", "strength": "fixed" },
            { "cell": "ff1", "site": "X1/Y1/lc1" }
        ]
    }"#;

    #[test]
    fn builds_netlist_and_placement() {
        let fabric = fabric();
        let (nl, p) = DesignFile::from_json(DESIGN)
            .unwrap()
            .into_netlist(&fabric)
            .unwrap();

        assert_eq!(nl.cell_count(), 2);
        assert_eq!(nl.net_count(), 2);
        let ff0 = nl.cell_by_name("ff0").unwrap();
        let ff1 = nl.cell_by_name("ff1").unwrap();
        assert!(nl.bool_param(ff0, DFF_ENABLE, false).unwrap());
        assert_eq!(nl.net_of(ff0, CLK), nl.net_by_name("clk"));
        assert_eq!(nl.users_of(nl.net_of(ff0, O).unwrap()).len(), 1);
        assert_eq!(nl.ports_of(ff0).len(), 3);

        let lc0 = fabric.site_by_name("X1/Y1/lc0").unwrap();
        assert_eq!(p.binding(lc0).unwrap().strength, BindStrength::Fixed);
        assert_eq!(p.site_of(ff1), fabric.site_by_name("X1/Y1/lc1"));
    }

    #[test]
    fn unknown_site_rejected() {
        let json = r#"{
            "cells": [ { "name": "a", "type": "ICESTORM_LC" } ],
            "placement": [ { "cell": "a", "site": "X9/Y9/lc0" } ]
        }"#;
        let err = DesignFile::from_json(json)
            .unwrap()
            .into_netlist(&fabric())
            .unwrap_err();
        assert_eq!(err.to_string(), "placement refers to unknown site 'X9/Y9/lc0'");
    }

    #[test]
    fn unknown_cell_rejected() {
        let json = r#"{ "placement": [ { "cell": "ghost", "site": "X1/Y1/lc0" } ] }"#;
        let err = DesignFile::from_json(json)
            .unwrap()
            .into_netlist(&fabric())
            .unwrap_err();
        assert!(matches!(err, DesignError::UnknownCell(name) if name == "ghost"));
    }

    #[test]
    fn double_booked_site_rejected() {
        let json = r#"{
            "cells": [ { "name": "a", "type": "ICESTORM_LC" },
                       { "name": "b", "type": "ICESTORM_LC" } ],
            "placement": [ { "cell": "a", "site": "X1/Y1/lc0" },
                           { "cell": "b", "site": "X1/Y1/lc0" } ]
        }"#;
        let err = DesignFile::from_json(json)
            .unwrap()
            .into_netlist(&fabric())
            .unwrap_err();
        assert!(matches!(err, DesignError::Bind { ref cell, .. } if cell == "b"));
    }

    #[test]
    fn multiple_drivers_rejected() {
        let json = r#"{
            "cells": [
                { "name": "a", "type": "ICESTORM_LC",
                  "ports": { "O": { "direction": "output", "net": "n" } } },
                { "name": "b", "type": "ICESTORM_LC",
                  "ports": { "O": { "direction": "output", "net": "n" } } }
            ]
        }"#;
        let err = DesignFile::from_json(json)
            .unwrap()
            .into_netlist(&fabric())
            .unwrap_err();
        assert!(matches!(err, DesignError::Netlist(NetlistError::MultipleDrivers { .. })));
    }

    #[test]
    fn unknown_cell_type_is_parse_error() {
        let json = r#"{ "cells": [ { "name": "a", "type": "SB_DFF" } ] }"#;
        assert!(matches!(DesignFile::from_json(json), Err(DesignError::Parse(_))));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.json");
        std::fs::write(&path, DESIGN).unwrap();
        let design = DesignFile::load(&path).unwrap();
        assert_eq!(design.cells.len(), 2);
        assert_eq!(design.placement[1].strength, BindStrength::Placer);
    }
}
