//! Generator for iCE40-style rectangular fabrics.
//!
//! The grid is an IO ring around a core of logic tiles. Corner tiles are
//! empty. Each non-corner ring tile holds two IO sites bonded to sequential
//! package pins. The eight global buffers are spread round-robin over the
//! ring tiles above the IO sites, buffer `i` driving `glb_netwk_{i}`.

use crate::fabric::{Fabric, FabricBuilder, FabricError};
use crate::types::{Location, PinTag, SiteType};
use frost_config::GridConfig;
use std::collections::HashSet;

/// Logic cells per core tile.
pub const LOGIC_CELLS_PER_TILE: u32 = 8;

/// IO sites per ring tile.
pub const IO_SITES_PER_TILE: u32 = 2;

/// Number of global networks, and therefore global buffers.
pub const GLOBAL_NETWORKS: u32 = 8;

/// Builds a fabric from grid dimensions.
///
/// IO sites listed in `unbonded_sites` get no package pin; the pin counter
/// still advances past them.
///
/// # Errors
///
/// Returns [`FabricError::InvalidGrid`] if the grid has no core tile or an
/// unbonded site name does not match a generated IO site.
pub fn build_grid(grid: &GridConfig) -> Result<Fabric, FabricError> {
    let (columns, rows) = (grid.columns, grid.rows);
    if columns < 3 || rows < 3 {
        return Err(FabricError::InvalidGrid(format!(
            "{columns}x{rows} grid has no core tiles"
        )));
    }

    let mut unbonded: HashSet<&str> = grid.unbonded_sites.iter().map(String::as_str).collect();
    let mut builder = FabricBuilder::new(format!("ice40-{columns}x{rows}"));
    let mut ring = Vec::new();
    let mut next_pin = 1u32;

    for y in 0..rows {
        for x in 0..columns {
            let on_x_edge = x == 0 || x == columns - 1;
            let on_y_edge = y == 0 || y == rows - 1;
            match (on_x_edge, on_y_edge) {
                (true, true) => {}
                (false, false) => {
                    for z in 0..LOGIC_CELLS_PER_TILE {
                        builder.add_site(SiteType::Logic, Location::new(x, y, z), "")?;
                    }
                }
                _ => {
                    for z in 0..IO_SITES_PER_TILE {
                        let location = Location::new(x, y, z);
                        let name = format!("{location}/{}{z}", SiteType::Io.name_prefix());
                        let pin = if unbonded.remove(name.as_str()) {
                            String::new()
                        } else {
                            next_pin.to_string()
                        };
                        next_pin += 1;
                        builder.add_named_site(name, SiteType::Io, location, &pin)?;
                    }
                    ring.push((x, y));
                }
            }
        }
    }

    if let Some(name) = unbonded.into_iter().min() {
        return Err(FabricError::InvalidGrid(format!(
            "unbonded site '{name}' is not an IO site of this grid"
        )));
    }

    for i in 0..GLOBAL_NETWORKS {
        let (x, y) = ring[i as usize % ring.len()];
        let z = IO_SITES_PER_TILE + i / ring.len() as u32;
        let gb = builder.add_site(SiteType::GlobalBuffer, Location::new(x, y, z), "")?;
        let wire = builder.add_wire(format!("X{x}/Y{y}/glb_netwk_{i}"))?;
        builder.attach_output_wire(gb, PinTag::GlobalBufferOutput, wire);
    }

    Ok(builder.build())
}
