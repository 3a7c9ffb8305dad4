//! Shared foundational types used across the Frost placement checker.
//!
//! This crate provides interned identifiers for cell, net, port, and parameter
//! names, and the contract-violation error that every oracle entry point can
//! surface.

#![warn(missing_docs)]

pub mod ident;
pub mod result;

pub use ident::{Ident, Interner};
pub use result::{ContractViolation, FrostResult};
