//! In-memory fabric database.

use crate::ids::{SiteId, TileId, WireId};
use crate::types::{Location, PinTag, SiteType};
use crate::Architecture;
use std::collections::HashMap;

/// Errors raised while assembling or loading a fabric.
#[derive(Debug, thiserror::Error)]
pub enum FabricError {
    /// Two sites share a name or a location.
    #[error("duplicate site '{0}'")]
    DuplicateSite(String),

    /// Two wires share a name.
    #[error("duplicate wire '{0}'")]
    DuplicateWire(String),

    /// A logic tile would also hold sites of another kind.
    #[error("tile {tile} mixes logic cells with {other} sites")]
    MixedLogicTile {
        /// Tile name, e.g. `X3/Y4`.
        tile: String,
        /// The offending non-logic site type.
        other: SiteType,
    },

    /// A generated grid has impossible parameters.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The fabric description could not be parsed.
    #[error("failed to parse fabric description: {0}")]
    Parse(String),

    /// The fabric description could not be read.
    #[error("failed to read fabric description: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
struct TileData {
    name: String,
    sites: Vec<SiteId>,
}

#[derive(Debug, Clone)]
struct SiteData {
    name: String,
    site_type: SiteType,
    location: Location,
    tile: TileId,
    package_pin: String,
    output_wires: Vec<(PinTag, WireId)>,
}

/// A device fabric held entirely in memory.
///
/// Tiles group sites by `(x, y)`; every site of a tile appears in the tile's
/// co-resident list in insertion order.
#[derive(Debug, Clone)]
pub struct Fabric {
    name: String,
    tiles: Vec<TileData>,
    sites: Vec<SiteData>,
    site_by_name: HashMap<String, SiteId>,
    wires: Vec<String>,
}

impl Fabric {
    /// Returns the number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the display name of a tile, e.g. `X3/Y4`.
    pub fn tile_name(&self, tile: TileId) -> &str {
        &self.tiles[tile.index()].name
    }

    /// Returns the sites of a tile.
    pub fn tile_sites(&self, tile: TileId) -> &[SiteId] {
        &self.tiles[tile.index()].sites
    }

    /// Returns the number of wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    fn site(&self, site: SiteId) -> &SiteData {
        &self.sites[site.index()]
    }
}

impl Architecture for Fabric {
    fn device_name(&self) -> &str {
        &self.name
    }

    fn site_count(&self) -> usize {
        self.sites.len()
    }

    fn site_name(&self, site: SiteId) -> &str {
        &self.site(site).name
    }

    fn site_by_name(&self, name: &str) -> Option<SiteId> {
        self.site_by_name.get(name).copied()
    }

    fn site_type(&self, site: SiteId) -> SiteType {
        self.site(site).site_type
    }

    fn site_location(&self, site: SiteId) -> Location {
        self.site(site).location
    }

    fn tile_of(&self, site: SiteId) -> TileId {
        self.site(site).tile
    }

    fn co_resident_sites(&self, site: SiteId) -> &[SiteId] {
        self.tile_sites(self.site(site).tile)
    }

    fn package_pin(&self, site: SiteId) -> &str {
        &self.site(site).package_pin
    }

    fn wire_of_output_pin(&self, site: SiteId, pin: PinTag) -> Option<WireId> {
        self.site(site)
            .output_wires
            .iter()
            .find(|(tag, _)| *tag == pin)
            .map(|&(_, wire)| wire)
    }

    fn wire_name(&self, wire: WireId) -> &str {
        &self.wires[wire.index()]
    }
}

/// Incrementally assembles a [`Fabric`].
#[derive(Debug)]
pub struct FabricBuilder {
    fabric: Fabric,
    tile_by_xy: HashMap<(u32, u32), TileId>,
    occupied: HashMap<Location, SiteId>,
    wire_by_name: HashMap<String, WireId>,
}

impl FabricBuilder {
    /// Starts an empty fabric with the given device name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            fabric: Fabric {
                name: name.into(),
                tiles: Vec::new(),
                sites: Vec::new(),
                site_by_name: HashMap::new(),
                wires: Vec::new(),
            },
            tile_by_xy: HashMap::new(),
            occupied: HashMap::new(),
            wire_by_name: HashMap::new(),
        }
    }

    fn tile_at(&mut self, x: u32, y: u32) -> TileId {
        let tiles = &mut self.fabric.tiles;
        *self.tile_by_xy.entry((x, y)).or_insert_with(|| {
            let id = TileId::from_raw(tiles.len() as u32);
            tiles.push(TileData {
                name: format!("X{x}/Y{y}"),
                sites: Vec::new(),
            });
            id
        })
    }

    /// Adds a site named after its location, e.g. `X1/Y2/lc3`.
    ///
    /// An empty `package_pin` means the site is not bonded out.
    pub fn add_site(
        &mut self,
        site_type: SiteType,
        location: Location,
        package_pin: &str,
    ) -> Result<SiteId, FabricError> {
        let name = format!("{location}/{}{}", site_type.name_prefix(), location.z);
        self.add_named_site(name, site_type, location, package_pin)
    }

    /// Adds a site with an explicit name.
    pub fn add_named_site(
        &mut self,
        name: impl Into<String>,
        site_type: SiteType,
        location: Location,
        package_pin: &str,
    ) -> Result<SiteId, FabricError> {
        let name = name.into();
        if self.fabric.site_by_name.contains_key(&name) || self.occupied.contains_key(&location)
        {
            return Err(FabricError::DuplicateSite(name));
        }

        let tile = self.tile_at(location.x, location.y);
        let tile_data = &self.fabric.tiles[tile.index()];
        if let Some(&first) = tile_data.sites.first() {
            let first_type = self.fabric.sites[first.index()].site_type;
            let is_logic = site_type == SiteType::Logic;
            if is_logic != (first_type == SiteType::Logic) {
                let other = if is_logic { first_type } else { site_type };
                return Err(FabricError::MixedLogicTile {
                    tile: tile_data.name.clone(),
                    other,
                });
            }
        }

        let id = SiteId::from_raw(self.fabric.sites.len() as u32);
        self.fabric.sites.push(SiteData {
            name: name.clone(),
            site_type,
            location,
            tile,
            package_pin: package_pin.to_string(),
            output_wires: Vec::new(),
        });
        self.fabric.tiles[tile.index()].sites.push(id);
        self.fabric.site_by_name.insert(name, id);
        self.occupied.insert(location, id);
        Ok(id)
    }

    /// Adds a named wire.
    pub fn add_wire(&mut self, name: impl Into<String>) -> Result<WireId, FabricError> {
        let name = name.into();
        if self.wire_by_name.contains_key(&name) {
            return Err(FabricError::DuplicateWire(name));
        }
        let id = WireId::from_raw(self.fabric.wires.len() as u32);
        self.wire_by_name.insert(name.clone(), id);
        self.fabric.wires.push(name);
        Ok(id)
    }

    /// Looks a wire up by name.
    pub fn wire_by_name(&self, name: &str) -> Option<WireId> {
        self.wire_by_name.get(name).copied()
    }

    /// Attaches `wire` to output pin `pin` of `site`, replacing any
    /// previous attachment of that pin.
    pub fn attach_output_wire(&mut self, site: SiteId, pin: PinTag, wire: WireId) {
        let wires = &mut self.fabric.sites[site.index()].output_wires;
        wires.retain(|(tag, _)| *tag != pin);
        wires.push((pin, wire));
    }

    /// Finishes the fabric.
    pub fn build(self) -> Fabric {
        self.fabric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_group_into_tiles_by_xy() {
        let mut b = FabricBuilder::new("t");
        let a = b.add_site(SiteType::Logic, Location::new(1, 1, 0), "").unwrap();
        let c = b.add_site(SiteType::Logic, Location::new(1, 1, 1), "").unwrap();
        let d = b.add_site(SiteType::Logic, Location::new(2, 1, 0), "").unwrap();
        let fabric = b.build();

        assert_eq!(fabric.tile_count(), 2);
        assert_eq!(fabric.co_resident_sites(a), &[a, c]);
        assert_eq!(fabric.co_resident_sites(c), &[a, c]);
        assert_eq!(fabric.co_resident_sites(d), &[d]);
        assert_eq!(fabric.tile_of(a), fabric.tile_of(c));
        assert_eq!(fabric.tile_name(fabric.tile_of(d)), "X2/Y1");
    }

    #[test]
    fn generated_names_and_lookup() {
        let mut b = FabricBuilder::new("t");
        let io = b.add_site(SiteType::Io, Location::new(0, 3, 1), "42").unwrap();
        let fabric = b.build();
        assert_eq!(fabric.site_name(io), "X0/Y3/io1");
        assert_eq!(fabric.site_by_name("X0/Y3/io1"), Some(io));
        assert_eq!(fabric.package_pin(io), "42");
        assert_eq!(fabric.site_type(io), SiteType::Io);
        assert_eq!(fabric.site_location(io), Location::new(0, 3, 1));
    }

    #[test]
    fn duplicate_location_rejected() {
        let mut b = FabricBuilder::new("t");
        b.add_site(SiteType::Logic, Location::new(1, 1, 0), "").unwrap();
        let err = b
            .add_named_site("other", SiteType::Logic, Location::new(1, 1, 0), "")
            .unwrap_err();
        assert!(matches!(err, FabricError::DuplicateSite(name) if name == "other"));
    }

    #[test]
    fn logic_tiles_stay_pure() {
        let mut b = FabricBuilder::new("t");
        b.add_site(SiteType::Logic, Location::new(1, 1, 0), "").unwrap();
        let err = b
            .add_site(SiteType::Io, Location::new(1, 1, 1), "7")
            .unwrap_err();
        assert_eq!(err.to_string(), "tile X1/Y1 mixes logic cells with SB_IO sites");
    }

    #[test]
    fn io_and_global_buffers_may_share_a_tile() {
        let mut b = FabricBuilder::new("t");
        b.add_site(SiteType::Io, Location::new(0, 1, 0), "1").unwrap();
        assert!(b
            .add_site(SiteType::GlobalBuffer, Location::new(0, 1, 2), "")
            .is_ok());
    }

    #[test]
    fn wires_attach_to_output_pins() {
        let mut b = FabricBuilder::new("t");
        let gb = b
            .add_site(SiteType::GlobalBuffer, Location::new(0, 1, 2), "")
            .unwrap();
        let w0 = b.add_wire("glb_netwk_0").unwrap();
        let w1 = b.add_wire("glb_netwk_1").unwrap();
        b.attach_output_wire(gb, PinTag::GlobalBufferOutput, w0);
        b.attach_output_wire(gb, PinTag::GlobalBufferOutput, w1);
        assert!(matches!(
            b.add_wire("glb_netwk_1"),
            Err(FabricError::DuplicateWire(_))
        ));
        let fabric = b.build();
        assert_eq!(
            fabric.wire_of_output_pin(gb, PinTag::GlobalBufferOutput),
            Some(w1)
        );
        assert_eq!(fabric.wire_name(w1), "glb_netwk_1");
        assert_eq!(fabric.wire_count(), 2);
    }
}
