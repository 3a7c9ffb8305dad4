//! The placed design's netlist: primitive instances, their ports and
//! parameters, and the nets between them.
//!
//! The netlist is built once and is immutable during placement. Port and
//! parameter names are interned; the names in [`constids`](crate::constids)
//! are reserved in every netlist.

use crate::constids;
use crate::ids::{CellId, NetId};
use frost_arch::SiteType;
use frost_common::{ContractViolation, FrostResult, Ident, Interner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Errors raised while constructing a netlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetlistError {
    /// Two cells share a name.
    #[error("duplicate cell '{0}'")]
    DuplicateCell(String),

    /// Two nets share a name.
    #[error("duplicate net '{0}'")]
    DuplicateNet(String),

    /// A port was connected twice.
    #[error("port '{port}' of cell '{cell}' is already declared")]
    DuplicatePort {
        /// Cell name.
        cell: String,
        /// Port name.
        port: String,
    },

    /// A net gained a second driver.
    #[error("net '{net}' already has a driver, cannot also be driven by '{cell}.{port}'")]
    MultipleDrivers {
        /// Net name.
        net: String,
        /// Cell name of the rejected driver.
        cell: String,
        /// Port name of the rejected driver.
        port: String,
    },
}

/// The closed set of primitive kinds the legality oracle knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// `ICESTORM_LC`: LUT4 plus optional flip-flop.
    #[serde(rename = "ICESTORM_LC")]
    Logic,
    /// `SB_IO`: IO pad.
    #[serde(rename = "SB_IO")]
    Io,
    /// `SB_GB`: global buffer.
    #[serde(rename = "SB_GB")]
    GlobalBuffer,
    /// `ICESTORM_RAM`: block RAM.
    #[serde(rename = "ICESTORM_RAM")]
    Ram,
    /// `ICESTORM_PLL`: PLL.
    #[serde(rename = "ICESTORM_PLL")]
    Pll,
}

impl CellKind {
    /// Returns the site type a cell of this kind is placed on.
    pub fn site_type(self) -> SiteType {
        match self {
            CellKind::Logic => SiteType::Logic,
            CellKind::Io => SiteType::Io,
            CellKind::GlobalBuffer => SiteType::GlobalBuffer,
            CellKind::Ram => SiteType::Ram,
            CellKind::Pll => SiteType::Pll,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.site_type(), f)
    }
}

/// A parameter value as produced by synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string, often a binary or decimal number.
    Str(String),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

/// Direction of a port relative to its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Consumes the net.
    Input,
    /// Drives the net.
    Output,
    /// Bidirectional; treated as a consumer.
    Inout,
}

/// A named connection point on a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port name.
    pub name: Ident,
    /// Port direction.
    pub direction: PortDirection,
    /// Connected net, if any.
    pub net: Option<NetId>,
}

/// Refers to one port of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    /// The cell owning the port.
    pub cell: CellId,
    /// The port name.
    pub port: Ident,
}

/// A primitive instance.
#[derive(Debug, Clone)]
pub struct Cell {
    /// The unique ID of this cell.
    pub id: CellId,
    /// Instance name.
    pub name: String,
    /// Primitive kind.
    pub kind: CellKind,
    /// Parameters by name.
    pub params: HashMap<Ident, ParamValue>,
    /// Ports in declaration order.
    pub ports: Vec<Port>,
}

impl Cell {
    /// Returns the port with the given name.
    pub fn port(&self, name: Ident) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }
}

/// A net: one optional driver and any number of users.
#[derive(Debug, Clone)]
pub struct Net {
    /// The unique ID of this net.
    pub id: NetId,
    /// Net name.
    pub name: String,
    /// The driving port, if the net is driven.
    pub driver: Option<PortRef>,
    /// The consuming ports.
    pub users: Vec<PortRef>,
}

/// The complete netlist of a design.
#[derive(Debug)]
pub struct Netlist {
    interner: Interner,
    cells: Vec<Cell>,
    nets: Vec<Net>,
    cell_by_name: HashMap<String, CellId>,
    net_by_name: HashMap<String, NetId>,
}

impl Netlist {
    /// Creates an empty netlist with the reserved names interned.
    pub fn new() -> Self {
        Self {
            interner: Interner::with_reserved(constids::RESERVED),
            cells: Vec::new(),
            nets: Vec::new(),
            cell_by_name: HashMap::new(),
            net_by_name: HashMap::new(),
        }
    }

    /// Interns a port or parameter name.
    pub fn intern(&self, name: &str) -> Ident {
        self.interner.get_or_intern(name)
    }

    /// Resolves an interned name.
    pub fn resolve(&self, name: Ident) -> &str {
        self.interner.resolve(name)
    }

    /// Adds a cell with no ports or parameters.
    pub fn add_cell(&mut self, name: impl Into<String>, kind: CellKind) -> Result<CellId, NetlistError> {
        let name = name.into();
        if self.cell_by_name.contains_key(&name) {
            return Err(NetlistError::DuplicateCell(name));
        }
        let id = CellId::from_raw(self.cells.len() as u32);
        self.cell_by_name.insert(name.clone(), id);
        self.cells.push(Cell {
            id,
            name,
            kind,
            params: HashMap::new(),
            ports: Vec::new(),
        });
        Ok(id)
    }

    /// Adds an undriven net with no users.
    pub fn add_net(&mut self, name: impl Into<String>) -> Result<NetId, NetlistError> {
        let name = name.into();
        if self.net_by_name.contains_key(&name) {
            return Err(NetlistError::DuplicateNet(name));
        }
        let id = NetId::from_raw(self.nets.len() as u32);
        self.net_by_name.insert(name.clone(), id);
        self.nets.push(Net {
            id,
            name,
            driver: None,
            users: Vec::new(),
        });
        Ok(id)
    }

    /// Sets a parameter on a cell, replacing any previous value.
    pub fn set_param(&mut self, cell: CellId, name: &str, value: impl Into<ParamValue>) {
        let name = self.intern(name);
        self.cells[cell.index()].params.insert(name, value.into());
    }

    /// Declares a port on a cell and connects it to `net`, or leaves it
    /// unconnected when `net` is `None`.
    ///
    /// Output ports become the net's driver; input and inout ports become
    /// users.
    pub fn connect(
        &mut self,
        cell: CellId,
        port: &str,
        direction: PortDirection,
        net: Option<NetId>,
    ) -> Result<(), NetlistError> {
        let name = self.intern(port);
        if self.cells[cell.index()].port(name).is_some() {
            return Err(NetlistError::DuplicatePort {
                cell: self.cells[cell.index()].name.clone(),
                port: port.to_string(),
            });
        }

        if let Some(net) = net {
            let port_ref = PortRef { cell, port: name };
            let net_data = &mut self.nets[net.index()];
            match direction {
                PortDirection::Output => {
                    if net_data.driver.is_some() {
                        return Err(NetlistError::MultipleDrivers {
                            net: net_data.name.clone(),
                            cell: self.cells[cell.index()].name.clone(),
                            port: port.to_string(),
                        });
                    }
                    net_data.driver = Some(port_ref);
                }
                PortDirection::Input | PortDirection::Inout => net_data.users.push(port_ref),
            }
        }

        self.cells[cell.index()].ports.push(Port {
            name,
            direction,
            net,
        });
        Ok(())
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    /// Returns all cells in insertion order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns all nets in insertion order.
    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    /// Looks a cell up by name.
    pub fn cell_by_name(&self, name: &str) -> Option<CellId> {
        self.cell_by_name.get(name).copied()
    }

    /// Looks a net up by name.
    pub fn net_by_name(&self, name: &str) -> Option<NetId> {
        self.net_by_name.get(name).copied()
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the net connected to `port` of `cell`.
    ///
    /// `None` if the cell has no such port or the port is unconnected.
    pub fn net_of(&self, cell: CellId, port: Ident) -> Option<NetId> {
        self.cell(cell).port(port).and_then(|p| p.net)
    }

    /// Returns the ports of a cell.
    pub fn ports_of(&self, cell: CellId) -> &[Port] {
        &self.cell(cell).ports
    }

    /// Returns the parameters of a cell.
    pub fn params_of(&self, cell: CellId) -> &HashMap<Ident, ParamValue> {
        &self.cell(cell).params
    }

    /// Returns the consumers of a net.
    pub fn users_of(&self, net: NetId) -> &[PortRef] {
        &self.net(net).users
    }

    /// Returns the driver of a net.
    pub fn driver_of(&self, net: NetId) -> Option<PortRef> {
        self.net(net).driver
    }

    /// Reads a boolean parameter, or `default` when it is absent.
    ///
    /// Accepts `Bool`, `Int` (nonzero is true) and strings of decimal or
    /// binary digits.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] naming the cell and parameter when the
    /// value is not a boolean.
    pub fn bool_param(&self, cell: CellId, name: Ident, default: bool) -> FrostResult<bool> {
        let data = self.cell(cell);
        match data.params.get(&name) {
            None => Ok(default),
            Some(ParamValue::Bool(value)) => Ok(*value),
            Some(ParamValue::Int(value)) => Ok(*value != 0),
            Some(ParamValue::Str(text)) => parse_bool_str(text).ok_or_else(|| {
                ContractViolation::new(format!(
                    "parameter {} of cell '{}' is not a boolean: {text:?}",
                    self.resolve(name),
                    data.name
                ))
            }),
        }
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool_str(text: &str) -> Option<bool> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.bytes().any(|b| b != b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constids::{CLK, DFF_ENABLE, I0, NEG_CLK, O};

    fn lc(nl: &mut Netlist, name: &str) -> CellId {
        nl.add_cell(name, CellKind::Logic).unwrap()
    }

    #[test]
    fn connect_records_driver_and_users() {
        let mut nl = Netlist::new();
        let a = lc(&mut nl, "a");
        let b = lc(&mut nl, "b");
        let n = nl.add_net("n").unwrap();
        nl.connect(a, "O", PortDirection::Output, Some(n)).unwrap();
        nl.connect(b, "I0", PortDirection::Input, Some(n)).unwrap();

        assert_eq!(nl.driver_of(n), Some(PortRef { cell: a, port: O }));
        assert_eq!(nl.users_of(n), &[PortRef { cell: b, port: I0 }]);
        assert_eq!(nl.net_of(b, I0), Some(n));
    }

    #[test]
    fn net_of_missing_or_unconnected_is_none() {
        let mut nl = Netlist::new();
        let a = lc(&mut nl, "a");
        nl.connect(a, "CLK", PortDirection::Input, None).unwrap();
        assert_eq!(nl.net_of(a, CLK), None);
        assert_eq!(nl.net_of(a, I0), None);
        assert_eq!(nl.ports_of(a).len(), 1);
    }

    #[test]
    fn second_driver_rejected() {
        let mut nl = Netlist::new();
        let a = lc(&mut nl, "a");
        let b = lc(&mut nl, "b");
        let n = nl.add_net("n").unwrap();
        nl.connect(a, "O", PortDirection::Output, Some(n)).unwrap();
        let err = nl.connect(b, "O", PortDirection::Output, Some(n)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "net 'n' already has a driver, cannot also be driven by 'b.O'"
        );
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut nl = Netlist::new();
        lc(&mut nl, "a");
        assert_eq!(
            nl.add_cell("a", CellKind::Io),
            Err(NetlistError::DuplicateCell("a".into()))
        );
        nl.add_net("n").unwrap();
        assert!(nl.add_net("n").is_err());
        let a = nl.cell_by_name("a").unwrap();
        nl.connect(a, "I0", PortDirection::Input, None).unwrap();
        assert!(matches!(
            nl.connect(a, "I0", PortDirection::Input, None),
            Err(NetlistError::DuplicatePort { .. })
        ));
    }

    #[test]
    fn bool_param_accepts_synthesis_forms() {
        let mut nl = Netlist::new();
        let a = lc(&mut nl, "a");
        assert!(!nl.bool_param(a, DFF_ENABLE, false).unwrap());
        assert!(nl.bool_param(a, DFF_ENABLE, true).unwrap());

        nl.set_param(a, "DFF_ENABLE", true);
        assert!(nl.bool_param(a, DFF_ENABLE, false).unwrap());
        nl.set_param(a, "DFF_ENABLE", 0i64);
        assert!(!nl.bool_param(a, DFF_ENABLE, true).unwrap());
        nl.set_param(a, "NEG_CLK", "1");
        assert!(nl.bool_param(a, NEG_CLK, false).unwrap());
        nl.set_param(a, "NEG_CLK", "00000000000000000000000000000000");
        assert!(!nl.bool_param(a, NEG_CLK, true).unwrap());
    }

    #[test]
    fn bool_param_rejects_garbage() {
        let mut nl = Netlist::new();
        let a = lc(&mut nl, "a");
        nl.set_param(a, "NEG_CLK", "yes");
        let err = nl.bool_param(a, NEG_CLK, false).unwrap_err();
        assert!(err.message.contains("NEG_CLK"));
        assert!(err.message.contains("'a'"));
    }

    #[test]
    fn cell_kind_serde_uses_primitive_names() {
        let json = serde_json::to_string(&CellKind::GlobalBuffer).unwrap();
        assert_eq!(json, "\"SB_GB\"");
        assert_eq!(CellKind::Logic.to_string(), "ICESTORM_LC");
    }

    #[test]
    fn param_value_untagged() {
        let v: ParamValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, ParamValue::Bool(true));
        let v: ParamValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, ParamValue::Int(7));
        let v: ParamValue = serde_json::from_str("\"01\"").unwrap();
        assert_eq!(v, ParamValue::Str("01".into()));
    }
}
