//! The narrow read-only interface through which the search engine sees a map.

use crate::geometry::MapGeometry;
use crate::id::{Owner, TileIndex};
use crate::tile::{SignalState, Slope, TileKind, TransportKind, TunnelBridgeMeta};
use crate::track::TrackdirBits;

/// Read-only view of tile state used by the searches.
///
/// Every method is a pure query. The searches never mutate the map, so a
/// `TileQuery` that is also `Sync` may serve several searches running on
/// different threads at once.
///
/// Tiles passed in are always inside the map: the engine only produces
/// indices through [`MapGeometry::step`], which masks into range.
pub trait TileQuery {
    /// Map dimensions and tile arithmetic.
    fn geometry(&self) -> MapGeometry;

    /// Coarse tile classification.
    fn tile_kind(&self, tile: TileIndex) -> TileKind;

    /// Trackdirs usable by `transport` on this tile.
    ///
    /// Forward trackdirs occupy the low byte and reversed ones the high byte;
    /// a two-way piece of track reports both.
    fn track_status(&self, tile: TileIndex, transport: TransportKind) -> TrackdirBits;

    /// Owner of the tile's infrastructure, if any.
    fn owner(&self, tile: TileIndex) -> Option<Owner>;

    /// Tunnel or bridge metadata for [`TileKind::TunnelBridge`] tiles.
    fn tunnel_bridge_meta(&self, tile: TileIndex) -> Option<TunnelBridgeMeta>;

    /// Signals on the tile; `None` when it has none.
    fn signal_state(&self, tile: TileIndex) -> Option<SignalState>;

    /// Raised corners of the tile.
    fn slope(&self, tile: TileIndex) -> Slope;

    /// Ground elevation at the centre of the tile.
    ///
    /// Two tunnel portals belong to the same tunnel only if their centre
    /// heights agree.
    fn center_height(&self, tile: TileIndex) -> u8;
}

impl<T: TileQuery + ?Sized> TileQuery for &T {
    fn geometry(&self) -> MapGeometry {
        (**self).geometry()
    }

    fn tile_kind(&self, tile: TileIndex) -> TileKind {
        (**self).tile_kind(tile)
    }

    fn track_status(&self, tile: TileIndex, transport: TransportKind) -> TrackdirBits {
        (**self).track_status(tile, transport)
    }

    fn owner(&self, tile: TileIndex) -> Option<Owner> {
        (**self).owner(tile)
    }

    fn tunnel_bridge_meta(&self, tile: TileIndex) -> Option<TunnelBridgeMeta> {
        (**self).tunnel_bridge_meta(tile)
    }

    fn signal_state(&self, tile: TileIndex) -> Option<SignalState> {
        (**self).signal_state(tile)
    }

    fn slope(&self, tile: TileIndex) -> Slope {
        (**self).slope(tile)
    }

    fn center_height(&self, tile: TileIndex) -> u8 {
        (**self).center_height(tile)
    }
}
