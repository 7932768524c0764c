//! Error types for map construction.

use std::fmt;

use trackfind_core::{DiagDirection, GeometryError};

/// Errors arising while building a [`TileMap`](crate::TileMap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The requested dimensions are not supported.
    Geometry(GeometryError),
    /// A coordinate lies outside the map or on its void border.
    OutOfBounds {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
    },
    /// The tile already holds something that cannot be combined with the
    /// requested piece.
    Occupied {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
        /// What was being placed.
        placing: &'static str,
    },
    /// A signal was placed on a trackdir the tile does not carry.
    NoTrack {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
    },
    /// A tunnel or bridge would end outside the playable area.
    StructureLeavesMap {
        /// X coordinate of the entry portal.
        x: u32,
        /// Y coordinate of the entry portal.
        y: u32,
        /// Heading from the entry portal.
        direction: DiagDirection,
        /// Requested length.
        length: u32,
    },
    /// A tunnel or bridge needs at least one tile between its portals.
    StructureTooShort {
        /// Requested length.
        length: u32,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(e) => write!(f, "map geometry: {e}"),
            Self::OutOfBounds { x, y } => {
                write!(f, "tile ({x}, {y}) is outside the playable area")
            }
            Self::Occupied { x, y, placing } => {
                write!(f, "cannot place {placing} on occupied tile ({x}, {y})")
            }
            Self::NoTrack { x, y } => {
                write!(f, "tile ({x}, {y}) has no track for the requested signal")
            }
            Self::StructureLeavesMap {
                x,
                y,
                direction,
                length,
            } => write!(
                f,
                "structure of length {length} from ({x}, {y}) heading {direction:?} leaves the map"
            ),
            Self::StructureTooShort { length } => {
                write!(f, "structure length {length} is too short, need at least 2")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for MapError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}
