//! Fabric architecture database for the Frost placement checker.
//!
//! The [`Architecture`] trait is the read-only view of the device that the
//! legality oracle consults: which tile a site belongs to, what kind of
//! primitive it hosts, its package pin, and the wires on its pins.
//! [`Fabric`] is the in-memory implementation, assembled by a
//! [`FabricBuilder`], loaded from a JSON description, or generated as an
//! iCE40-style grid by [`ice40::build_grid`].
//!
//! ```
//! use frost_arch::{Architecture, FabricBuilder, Location, SiteType};
//!
//! let mut builder = FabricBuilder::new("tiny");
//! let lc = builder.add_site(SiteType::Logic, Location::new(1, 1, 0), "").unwrap();
//! let fabric = builder.build();
//! assert_eq!(fabric.site_name(lc), "X1/Y1/lc0");
//! assert_eq!(fabric.co_resident_sites(lc), &[lc]);
//! ```

#![warn(missing_docs)]

pub mod description;
pub mod fabric;
pub mod ice40;
pub mod ids;
pub mod types;

pub use fabric::{Fabric, FabricBuilder, FabricError};
pub use ids::{SiteId, TileId, WireId};
pub use types::{Location, PinTag, SiteType};

use frost_common::{ContractViolation, FrostResult};

/// Read-only queries against a device's placement sites.
///
/// Site and wire IDs passed in must come from the same architecture;
/// implementations may panic on foreign IDs.
pub trait Architecture: std::fmt::Debug + Send + Sync {
    /// Returns the device name (e.g. "hx1k-tq144").
    fn device_name(&self) -> &str;

    /// Returns the number of sites. Site IDs are `0..site_count()`.
    fn site_count(&self) -> usize;

    /// Returns the display name of a site, e.g. `X3/Y4/lc2`.
    fn site_name(&self, site: SiteId) -> &str;

    /// Looks a site up by display name.
    fn site_by_name(&self, name: &str) -> Option<SiteId>;

    /// Returns the kind of primitive the site hosts.
    fn site_type(&self, site: SiteId) -> SiteType;

    /// Returns the grid location of a site.
    fn site_location(&self, site: SiteId) -> Location;

    /// Returns the tile containing a site.
    fn tile_of(&self, site: SiteId) -> TileId;

    /// Returns every site in the same tile as `site`, including `site`.
    fn co_resident_sites(&self, site: SiteId) -> &[SiteId];

    /// Returns the package pin bonded to a site, or `""` if none.
    fn package_pin(&self, site: SiteId) -> &str;

    /// Returns the wire attached to an output pin of a site, if it has one.
    fn wire_of_output_pin(&self, site: SiteId, pin: PinTag) -> Option<WireId>;

    /// Returns the name of a wire.
    fn wire_name(&self, wire: WireId) -> &str;

    /// Returns the index of the global network a global-buffer site drives.
    ///
    /// The index is read from the trailing decimal digits of the name of the
    /// wire on the site's [`PinTag::GlobalBufferOutput`] pin (for example
    /// `X6/Y0/glb_netwk_5` yields `5`).
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] if the site has no output wire or the
    /// wire name does not end in a network index.
    fn global_network_index(&self, site: SiteId) -> FrostResult<u8> {
        let wire = self
            .wire_of_output_pin(site, PinTag::GlobalBufferOutput)
            .ok_or_else(|| {
                ContractViolation::new(format!(
                    "site '{}' has no GLOBAL_BUFFER_OUTPUT wire",
                    self.site_name(site)
                ))
            })?;
        let name = self.wire_name(wire);
        parse_network_index(name).ok_or_else(|| {
            ContractViolation::new(format!(
                "wire '{name}' on site '{}' does not encode a global network index",
                self.site_name(site)
            ))
        })
    }
}

/// Extracts the trailing decimal network index from a global wire name.
///
/// Returns `None` when the name has no trailing digits or the number does not
/// fit in a `u8`.
pub fn parse_network_index(wire_name: &str) -> Option<u8> {
    let stem = wire_name.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &wire_name[stem.len()..];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
