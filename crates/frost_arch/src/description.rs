//! Loader for JSON fabric descriptions.
//!
//! A description lists every site with its location and package pin. Global
//! buffers additionally name the wire on their output pin:
//!
//! ```json
//! {
//!   "name": "hx-mini",
//!   "sites": [
//!     { "type": "logic", "x": 1, "y": 1, "z": 0 },
//!     { "type": "io", "x": 0, "y": 1, "z": 0, "package_pin": "A1" },
//!     { "type": "global_buffer", "x": 0, "y": 1, "z": 2,
//!       "global_wire": "X0/Y1/glb_netwk_3" }
//!   ]
//! }
//! ```

use crate::fabric::{Fabric, FabricBuilder, FabricError};
use crate::types::{Location, PinTag, SiteType};
use frost_config::FabricSource;
use serde::Deserialize;
use std::path::Path;

/// Raw JSON structure for a whole fabric.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFabric {
    name: String,
    #[serde(default)]
    sites: Vec<RawSite>,
}

/// Raw JSON structure for one site.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    site_type: SiteType,
    x: u32,
    y: u32,
    z: u32,
    #[serde(default)]
    package_pin: String,
    #[serde(default)]
    global_wire: Option<String>,
}

impl Fabric {
    /// Parses a fabric from its JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Parse`] for malformed JSON, or the builder's
    /// error when two sites collide or a logic tile holds other site kinds.
    pub fn from_json(json: &str) -> Result<Fabric, FabricError> {
        let raw: RawFabric = serde_json::from_str(json)
            .map_err(|e| FabricError::Parse(format!("fabric JSON parse error: {e}")))?;

        let mut builder = FabricBuilder::new(raw.name);
        for site in raw.sites {
            let location = Location::new(site.x, site.y, site.z);
            let id = match site.name {
                Some(name) => {
                    builder.add_named_site(name, site.site_type, location, &site.package_pin)?
                }
                None => builder.add_site(site.site_type, location, &site.package_pin)?,
            };
            if let Some(wire_name) = site.global_wire {
                let wire = match builder.wire_by_name(&wire_name) {
                    Some(wire) => wire,
                    None => builder.add_wire(wire_name)?,
                };
                builder.attach_output_wire(id, PinTag::GlobalBufferOutput, wire);
            }
        }
        Ok(builder.build())
    }

    /// Reads and parses a JSON fabric description from disk.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Io`] if the file cannot be read, otherwise as
    /// [`Fabric::from_json`].
    pub fn load(path: &Path) -> Result<Fabric, FabricError> {
        let json = std::fs::read_to_string(path)?;
        Fabric::from_json(&json)
    }

    /// Materializes a fabric from a configured source.
    ///
    /// Relative file paths are resolved against `base_dir`.
    pub fn from_source(source: &FabricSource, base_dir: &Path) -> Result<Fabric, FabricError> {
        match source {
            FabricSource::File { path } => Fabric::load(&base_dir.join(path)),
            FabricSource::Grid { grid } => crate::ice40::build_grid(grid),
        }
    }
}
