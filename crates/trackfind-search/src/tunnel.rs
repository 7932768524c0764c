//! Length and exit of tunnels and bridges.

use std::error::Error;
use std::fmt;

use trackfind_core::{DiagDirection, TileIndex, TileQuery};

/// Exit portal reached from an entry portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TunnelProbeResult {
    /// The matching portal at the far end.
    pub exit_tile: TileIndex,
    /// Tiles travelled, excluding the entry and including the exit.
    pub length: u32,
}

/// Why a probe found no exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeError {
    /// The entry tile is not a portal leading into a structure in the given
    /// direction.
    NotAnEntry {
        /// Tile probed from.
        tile: TileIndex,
        /// Direction probed.
        direction: DiagDirection,
    },
    /// No matching portal within the map's largest dimension. The map is
    /// malformed.
    NoExit {
        /// Tile probed from.
        tile: TileIndex,
        /// Direction probed.
        direction: DiagDirection,
        /// Tiles stepped before giving up.
        steps: u32,
    },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnEntry { tile, direction } => {
                write!(f, "tile {tile} is not a portal leading {direction:?}")
            }
            Self::NoExit {
                tile,
                direction,
                steps,
            } => write!(
                f,
                "no exit portal for {tile} heading {direction:?} within {steps} tiles"
            ),
        }
    }
}

impl Error for ProbeError {}

/// Finds the far end of a tunnel or bridge.
///
/// Steps from the entry along its heading until it meets a portal of the
/// same kind that faces back the other way at the same centre height.
/// Tunnels may pass under other tunnels; the height test tells them apart.
///
/// # Examples
///
/// ```
/// use trackfind_core::{DiagDirection, TileQuery, TransportKind};
/// use trackfind_map::TileMapBuilder;
/// use trackfind_search::TunnelProbe;
///
/// let mut builder = TileMapBuilder::new(5, 5).unwrap();
/// builder.tunnel(3, 3, DiagDirection::SouthWest, 5, TransportKind::Rail).unwrap();
/// let map = builder.build();
/// let geo = map.geometry();
///
/// let found = TunnelProbe::new(&map)
///     .probe(geo.tile_xy(3, 3), DiagDirection::SouthWest)
///     .unwrap();
/// assert_eq!(found.exit_tile, geo.tile_xy(8, 3));
/// assert_eq!(found.length, 5);
/// ```
pub struct TunnelProbe<'q, Q: ?Sized> {
    query: &'q Q,
}

impl<'q, Q: TileQuery + ?Sized> TunnelProbe<'q, Q> {
    /// Probe over `query`.
    pub fn new(query: &'q Q) -> Self {
        Self { query }
    }

    /// Locate the exit for a structure entered at `entry` heading
    /// `direction`.
    pub fn probe(
        &self,
        entry: TileIndex,
        direction: DiagDirection,
    ) -> Result<TunnelProbeResult, ProbeError> {
        let kind = match self.query.tunnel_bridge_meta(entry).and_then(|m| m.portal()) {
            Some((kind, dir, _)) if dir == direction => kind,
            _ => {
                return Err(ProbeError::NotAnEntry {
                    tile: entry,
                    direction,
                })
            }
        };
        let geo = self.query.geometry();
        let height = self.query.center_height(entry);
        let cap = geo.size_x().max(geo.size_y());
        let back = direction.reverse();

        let mut tile = entry;
        for length in 1..=cap {
            tile = geo.step(tile, direction);
            let matches = self
                .query
                .tunnel_bridge_meta(tile)
                .and_then(|m| m.portal())
                .is_some_and(|(k, d, _)| k == kind && d == back);
            if matches && self.query.center_height(tile) == height {
                return Ok(TunnelProbeResult {
                    exit_tile: tile,
                    length,
                });
            }
        }
        Err(ProbeError::NoExit {
            tile: entry,
            direction,
            steps: cap,
        })
    }
}
