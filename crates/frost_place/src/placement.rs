//! The binding of cells to sites.

use crate::ids::CellId;
use frost_arch::SiteId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How firmly a cell is bound to its site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindStrength {
    /// A speculative binding made while evaluating a move.
    Tentative,
    /// Placed by the optimizer.
    #[default]
    Placer,
    /// Locked by the user; the optimizer must not move it.
    Fixed,
}

/// One cell bound to one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// The bound cell.
    pub cell: CellId,
    /// How firmly it is bound.
    pub strength: BindStrength,
}

/// Errors raised by [`Placement::bind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The site already holds a cell.
    #[error("site {site} is already occupied by cell {occupant}")]
    SiteOccupied {
        /// The requested site.
        site: SiteId,
        /// The cell already there.
        occupant: CellId,
    },

    /// The cell is already bound elsewhere.
    #[error("cell {cell} is already placed at site {site}")]
    CellAlreadyPlaced {
        /// The cell being bound.
        cell: CellId,
        /// Where it currently is.
        site: SiteId,
    },
}

/// Cell-to-site binding with at most one cell per site and at most one site
/// per cell.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    by_site: HashMap<SiteId, Binding>,
    by_cell: HashMap<CellId, SiteId>,
}

impl Placement {
    /// Creates an empty placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `cell` to `site`.
    pub fn bind(
        &mut self,
        cell: CellId,
        site: SiteId,
        strength: BindStrength,
    ) -> Result<(), PlacementError> {
        if let Some(existing) = self.by_site.get(&site) {
            return Err(PlacementError::SiteOccupied {
                site,
                occupant: existing.cell,
            });
        }
        if let Some(&current) = self.by_cell.get(&cell) {
            return Err(PlacementError::CellAlreadyPlaced {
                cell,
                site: current,
            });
        }
        self.by_site.insert(site, Binding { cell, strength });
        self.by_cell.insert(cell, site);
        Ok(())
    }

    /// Clears `site`, returning the cell that was bound there.
    pub fn unbind_site(&mut self, site: SiteId) -> Option<CellId> {
        let binding = self.by_site.remove(&site)?;
        self.by_cell.remove(&binding.cell);
        Some(binding.cell)
    }

    /// Unplaces `cell`, returning the site it occupied.
    pub fn unbind_cell(&mut self, cell: CellId) -> Option<SiteId> {
        let site = self.by_cell.remove(&cell)?;
        self.by_site.remove(&site);
        Some(site)
    }

    /// Returns the site `cell` is bound to.
    pub fn site_of(&self, cell: CellId) -> Option<SiteId> {
        self.by_cell.get(&cell).copied()
    }

    /// Returns the binding at `site`, whatever its strength.
    pub fn binding(&self, site: SiteId) -> Option<Binding> {
        self.by_site.get(&site).copied()
    }

    /// Returns the cell at `site`.
    ///
    /// Tentative bindings are reported only when `allow_unplaced` is set.
    pub fn occupant_of(&self, site: SiteId, allow_unplaced: bool) -> Option<CellId> {
        self.by_site
            .get(&site)
            .filter(|b| allow_unplaced || b.strength != BindStrength::Tentative)
            .map(|b| b.cell)
    }

    /// Returns every occupied site, in ascending site order.
    pub fn occupied_sites(&self) -> Vec<SiteId> {
        let mut sites: Vec<SiteId> = self.by_site.keys().copied().collect();
        sites.sort_unstable();
        sites
    }

    /// Returns the number of bound cells.
    pub fn len(&self) -> usize {
        self.by_site.len()
    }

    /// Returns whether no cell is bound.
    pub fn is_empty(&self) -> bool {
        self.by_site.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(i: u32) -> SiteId {
        SiteId::from_raw(i)
    }

    fn cell(i: u32) -> CellId {
        CellId::from_raw(i)
    }

    #[test]
    fn bind_and_lookup() {
        let mut p = Placement::new();
        p.bind(cell(0), site(5), BindStrength::Placer).unwrap();
        assert_eq!(p.site_of(cell(0)), Some(site(5)));
        assert_eq!(p.occupant_of(site(5), false), Some(cell(0)));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn one_cell_per_site_and_site_per_cell() {
        let mut p = Placement::new();
        p.bind(cell(0), site(5), BindStrength::Placer).unwrap();
        assert_eq!(
            p.bind(cell(1), site(5), BindStrength::Placer),
            Err(PlacementError::SiteOccupied {
                site: site(5),
                occupant: cell(0)
            })
        );
        assert_eq!(
            p.bind(cell(0), site(6), BindStrength::Placer),
            Err(PlacementError::CellAlreadyPlaced {
                cell: cell(0),
                site: site(5)
            })
        );
    }

    #[test]
    fn tentative_bindings_hidden_by_default() {
        let mut p = Placement::new();
        p.bind(cell(2), site(1), BindStrength::Tentative).unwrap();
        assert_eq!(p.occupant_of(site(1), false), None);
        assert_eq!(p.occupant_of(site(1), true), Some(cell(2)));
        assert_eq!(p.binding(site(1)).unwrap().strength, BindStrength::Tentative);
    }

    #[test]
    fn unbind_both_ways() {
        let mut p = Placement::new();
        p.bind(cell(0), site(1), BindStrength::Fixed).unwrap();
        p.bind(cell(1), site(2), BindStrength::Placer).unwrap();
        assert_eq!(p.unbind_site(site(1)), Some(cell(0)));
        assert_eq!(p.site_of(cell(0)), None);
        assert_eq!(p.unbind_cell(cell(1)), Some(site(2)));
        assert!(p.is_empty());
        assert_eq!(p.unbind_site(site(9)), None);
    }

    #[test]
    fn occupied_sites_sorted() {
        let mut p = Placement::new();
        for (c, s) in [(0, 9), (1, 3), (2, 6)] {
            p.bind(cell(c), site(s), BindStrength::Placer).unwrap();
        }
        assert_eq!(p.occupied_sites(), vec![site(3), site(6), site(9)]);
    }
}
