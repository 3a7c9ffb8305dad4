//! Opaque ID newtypes for fabric entities.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Hash`, and
//! `Serialize`/`Deserialize`, used as an index into a [`Fabric`](crate::Fabric).

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a dense index handed out by the fabric builder.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// The dense index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// A placement location that hosts one primitive (a BEL).
    SiteId
);

define_id!(
    /// A group of sites sharing local routing and sequential control.
    TileId
);

define_id!(
    /// A routing wire in the fabric.
    WireId
);
