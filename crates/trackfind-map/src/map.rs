//! Dense tile storage implementing [`TileQuery`].

use trackfind_core::{
    MapGeometry, Owner, SignalState, Slope, TileIndex, TileKind, TileQuery, TrackdirBits,
    TransportKind, TunnelBridgeMeta,
};

use crate::tile::TileData;

/// A fully built map: one [`TileData`] per tile, row-major.
///
/// Built with [`TileMapBuilder`](crate::TileMapBuilder). The last row and
/// column are always [`TileKind::Void`].
#[derive(Clone, Debug)]
pub struct TileMap {
    geometry: MapGeometry,
    tiles: Vec<TileData>,
}

impl TileMap {
    pub(crate) fn from_parts(geometry: MapGeometry, tiles: Vec<TileData>) -> Self {
        debug_assert_eq!(tiles.len(), geometry.tile_count());
        Self { geometry, tiles }
    }

    /// Stored state of `tile`.
    pub fn tile(&self, tile: TileIndex) -> &TileData {
        &self.tiles[tile.0 as usize]
    }

    /// Stored state of the tile at `(x, y)`.
    pub fn tile_at(&self, x: u32, y: u32) -> &TileData {
        self.tile(self.geometry.tile_xy(x, y))
    }

    /// Iterate `(tile, data)` over every tile, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (TileIndex, &TileData)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, data)| (TileIndex(i as u32), data))
    }
}

impl TileQuery for TileMap {
    fn geometry(&self) -> MapGeometry {
        self.geometry
    }

    fn tile_kind(&self, tile: TileIndex) -> TileKind {
        self.tile(tile).kind
    }

    fn track_status(&self, tile: TileIndex, transport: TransportKind) -> TrackdirBits {
        self.tile(tile).track_status(transport)
    }

    fn owner(&self, tile: TileIndex) -> Option<Owner> {
        self.tile(tile).owner
    }

    fn tunnel_bridge_meta(&self, tile: TileIndex) -> Option<TunnelBridgeMeta> {
        self.tile(tile).tunnel_bridge
    }

    fn signal_state(&self, tile: TileIndex) -> Option<SignalState> {
        self.tile(tile).signals
    }

    fn slope(&self, tile: TileIndex) -> Slope {
        self.tile(tile).slope
    }

    fn center_height(&self, tile: TileIndex) -> u8 {
        self.tile(tile).center_height()
    }
}
