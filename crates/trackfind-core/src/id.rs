//! Strongly-typed identifiers for tiles and owners.

use std::fmt;

/// Index of a map cell.
///
/// Opaque to the search engine: arithmetic on tile indices (stepping in a
/// direction, masking to the map bounds) goes through
/// [`MapGeometry`](crate::MapGeometry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex(pub u32);

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u32> for TileIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Company (or other party) owning a piece of infrastructure.
///
/// Rail searches refuse to cross from one owner's track onto another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Owner(pub u8);

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Owner {
    fn from(v: u8) -> Self {
        Self(v)
    }
}
