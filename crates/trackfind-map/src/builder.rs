//! Incremental construction of [`TileMap`] values.

use trackfind_core::{
    DiagDirection, MapGeometry, Owner, PortalKind, Slope, TileIndex, TileKind, Track,
    TrackBits, Trackdir, TrackdirBits, TransportKind, TunnelBridgeMeta,
};

use crate::error::MapError;
use crate::map::TileMap;
use crate::tile::TileData;

/// Whether a signal faces one direction of travel or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    /// Faces only the trackdir it is placed on; blocks the other direction.
    OneWay,
    /// Faces both trackdirs of the track.
    TwoWay,
}

/// What a signal currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aspect {
    /// Proceed.
    Green,
    /// Stop.
    Red,
}

/// Lays out a [`TileMap`] piece by piece.
///
/// Every placement method validates its coordinates against the playable
/// area (the map minus its void border) and returns `&mut Self` so calls
/// chain with `?`. Pieces are owned by the owner most recently set with
/// [`owner`](Self::owner), initially `Owner(0)`.
///
/// # Examples
///
/// ```
/// use trackfind_core::{DiagDirection, TileQuery, TileKind};
/// use trackfind_map::TileMapBuilder;
///
/// let mut builder = TileMapBuilder::new(5, 5).unwrap();
/// builder
///     .rail_line(2, 4, DiagDirection::SouthWest, 10).unwrap()
///     .station(12, 4, DiagDirection::SouthWest).unwrap();
/// let map = builder.build();
/// assert_eq!(map.tile_kind(map.geometry().tile_xy(12, 4)), TileKind::Station);
/// ```
#[derive(Clone, Debug)]
pub struct TileMapBuilder {
    geometry: MapGeometry,
    tiles: Vec<TileData>,
    owner: Owner,
}

impl TileMapBuilder {
    /// Start an empty map of `2^log_x * 2^log_y` tiles.
    pub fn new(log_x: u8, log_y: u8) -> Result<Self, MapError> {
        let geometry = MapGeometry::new(log_x, log_y)?;
        let tiles = (0..geometry.tile_count())
            .map(|i| {
                if geometry.is_border(TileIndex(i as u32)) {
                    TileData::VOID
                } else {
                    TileData::CLEAR
                }
            })
            .collect();
        Ok(Self {
            geometry,
            tiles,
            owner: Owner(0),
        })
    }

    /// Map dimensions.
    pub fn geometry(&self) -> MapGeometry {
        self.geometry
    }

    /// Owner for pieces placed from now on.
    pub fn owner(&mut self, owner: Owner) -> &mut Self {
        self.owner = owner;
        self
    }

    /// Add rail `tracks` to a clear or railway tile.
    pub fn rail(&mut self, x: u32, y: u32, tracks: TrackBits) -> Result<&mut Self, MapError> {
        let owner = self.owner;
        let tile = self.tile_mut(x, y)?;
        match tile.kind {
            TileKind::Clear => {
                tile.kind = TileKind::Railway;
                tile.owner = Some(owner);
                tile.rail = tracks;
            }
            TileKind::Railway => tile.rail = tile.rail | tracks,
            _ => {
                return Err(MapError::Occupied {
                    x,
                    y,
                    placing: "rail",
                })
            }
        }
        Ok(self)
    }

    /// Lay `count` straight rail tiles from `(x, y)` heading `dir`.
    pub fn rail_line(
        &mut self,
        x: u32,
        y: u32,
        dir: DiagDirection,
        count: u32,
    ) -> Result<&mut Self, MapError> {
        let track = TrackBits::single(Track::along_axis(dir));
        for i in 0..count {
            let (tx, ty) = advance(x, y, dir, i).ok_or(MapError::OutOfBounds { x, y })?;
            self.rail(tx, ty, track)?;
        }
        Ok(self)
    }

    /// Place a station platform running along `axis`.
    pub fn station(&mut self, x: u32, y: u32, axis: DiagDirection) -> Result<&mut Self, MapError> {
        self.place_track_tile(x, y, TileKind::Station, axis, "station")
    }

    /// Place a rail depot whose entrance faces `entrance`.
    pub fn depot(
        &mut self,
        x: u32,
        y: u32,
        entrance: DiagDirection,
    ) -> Result<&mut Self, MapError> {
        self.place_track_tile(x, y, TileKind::RailDepot, entrance, "depot")
    }

    /// Add road `pieces` to a clear or road tile.
    pub fn road(&mut self, x: u32, y: u32, pieces: TrackBits) -> Result<&mut Self, MapError> {
        let owner = self.owner;
        let tile = self.tile_mut(x, y)?;
        match tile.kind {
            TileKind::Clear => {
                tile.kind = TileKind::Road;
                tile.owner = Some(owner);
                tile.road = pieces;
            }
            TileKind::Road => tile.road = tile.road | pieces,
            _ => {
                return Err(MapError::Occupied {
                    x,
                    y,
                    placing: "road",
                })
            }
        }
        Ok(self)
    }

    /// Flood a clear tile.
    pub fn water(&mut self, x: u32, y: u32) -> Result<&mut Self, MapError> {
        let tile = self.tile_mut(x, y)?;
        if tile.kind != TileKind::Clear {
            return Err(MapError::Occupied {
                x,
                y,
                placing: "water",
            });
        }
        tile.kind = TileKind::Water;
        tile.owner = None;
        Ok(self)
    }

    /// Put a signal facing trains travelling `td` on a railway tile.
    ///
    /// A two-way signal also faces `td.reverse()` and shows the same aspect
    /// both ways.
    pub fn signal(
        &mut self,
        x: u32,
        y: u32,
        td: Trackdir,
        kind: SignalKind,
        aspect: Aspect,
    ) -> Result<&mut Self, MapError> {
        let tile = self.tile_mut(x, y)?;
        if tile.kind != TileKind::Railway || !tile.rail.contains(td.track()) {
            return Err(MapError::NoTrack { x, y });
        }
        let mut facing = TrackdirBits::single(td);
        if kind == SignalKind::TwoWay {
            facing = facing | TrackdirBits::single(td.reverse());
        }
        let mut state = tile.signals.unwrap_or_default();
        state.present = state.present | facing;
        if aspect == Aspect::Green {
            state.green = state.green | facing;
        } else {
            state.green = TrackdirBits::from_bits(state.green.bits() & !facing.bits());
        }
        tile.signals = Some(state);
        Ok(self)
    }

    /// Set the raised corners of a tile.
    pub fn slope(&mut self, x: u32, y: u32, slope: Slope) -> Result<&mut Self, MapError> {
        self.tile_mut(x, y)?.slope = slope;
        Ok(self)
    }

    /// Set the base height of a tile.
    pub fn height(&mut self, x: u32, y: u32, height: u8) -> Result<&mut Self, MapError> {
        self.tile_mut(x, y)?.height = height;
        Ok(self)
    }

    /// Dig a tunnel from `(x, y)` heading `dir`, with its exit portal
    /// `length` tiles further on.
    ///
    /// Both portals sit at the entry's height; the ground in between is
    /// raised above them.
    pub fn tunnel(
        &mut self,
        x: u32,
        y: u32,
        dir: DiagDirection,
        length: u32,
        transport: TransportKind,
    ) -> Result<&mut Self, MapError> {
        let (ex, ey) = self.structure_end(x, y, dir, length)?;
        self.require_clear(x, y, "tunnel portal")?;
        self.require_clear(ex, ey, "tunnel portal")?;
        let height = self.tile_mut(x, y)?.height;
        for i in 1..length {
            let (mx, my) = advance(x, y, dir, i).ok_or(MapError::OutOfBounds { x, y })?;
            let tile = self.tile_mut(mx, my)?;
            tile.height = tile.height.max(height.saturating_add(1));
        }
        self.portal(x, y, PortalKind::Tunnel, dir, transport, height)?;
        self.portal(ex, ey, PortalKind::Tunnel, dir.reverse(), transport, height)?;
        Ok(self)
    }

    /// Build a bridge from `(x, y)` heading `dir`, with its far ramp
    /// `length` tiles further on.
    ///
    /// Span tiles must be clear or water; they become ownerless bridge
    /// middles carrying track along the bridge axis.
    pub fn bridge(
        &mut self,
        x: u32,
        y: u32,
        dir: DiagDirection,
        length: u32,
        transport: TransportKind,
    ) -> Result<&mut Self, MapError> {
        let (ex, ey) = self.structure_end(x, y, dir, length)?;
        self.require_clear(x, y, "bridge ramp")?;
        self.require_clear(ex, ey, "bridge ramp")?;
        for i in 1..length {
            let (mx, my) = advance(x, y, dir, i).ok_or(MapError::OutOfBounds { x, y })?;
            let tile = self.tile_mut(mx, my)?;
            if !matches!(tile.kind, TileKind::Clear | TileKind::Water) {
                return Err(MapError::Occupied {
                    x: mx,
                    y: my,
                    placing: "bridge span",
                });
            }
        }
        let height = self.tile_mut(x, y)?.height;
        let axis = TrackBits::single(Track::along_axis(dir));
        for i in 1..length {
            let (mx, my) = advance(x, y, dir, i).ok_or(MapError::OutOfBounds { x, y })?;
            let tile = self.tile_mut(mx, my)?;
            *tile = TileData {
                kind: TileKind::TunnelBridge,
                owner: None,
                tunnel_bridge: Some(TunnelBridgeMeta::BridgeMiddle { transport }),
                slope: tile.slope,
                height: tile.height,
                ..TileData::CLEAR
            };
            set_network(tile, transport, axis);
        }
        let back = dir.reverse();
        self.portal(x, y, PortalKind::BridgeRamp, dir, transport, height)?;
        self.portal(ex, ey, PortalKind::BridgeRamp, back, transport, height)?;
        Ok(self)
    }

    /// Snapshot the map built so far.
    pub fn build(&self) -> TileMap {
        TileMap::from_parts(self.geometry, self.tiles.clone())
    }

    // ── Internals ───────────────────────────────────────────────

    fn tile_mut(&mut self, x: u32, y: u32) -> Result<&mut TileData, MapError> {
        if x >= self.geometry.max_x() || y >= self.geometry.max_y() {
            return Err(MapError::OutOfBounds { x, y });
        }
        let index = self.geometry.tile_xy(x, y).0 as usize;
        Ok(&mut self.tiles[index])
    }

    fn require_clear(&mut self, x: u32, y: u32, placing: &'static str) -> Result<(), MapError> {
        if self.tile_mut(x, y)?.kind != TileKind::Clear {
            return Err(MapError::Occupied { x, y, placing });
        }
        Ok(())
    }

    fn place_track_tile(
        &mut self,
        x: u32,
        y: u32,
        kind: TileKind,
        axis: DiagDirection,
        placing: &'static str,
    ) -> Result<&mut Self, MapError> {
        let owner = self.owner;
        let tile = self.tile_mut(x, y)?;
        if tile.kind != TileKind::Clear {
            return Err(MapError::Occupied { x, y, placing });
        }
        tile.kind = kind;
        tile.owner = Some(owner);
        tile.rail = TrackBits::single(Track::along_axis(axis));
        Ok(self)
    }

    fn structure_end(
        &self,
        x: u32,
        y: u32,
        dir: DiagDirection,
        length: u32,
    ) -> Result<(u32, u32), MapError> {
        if length < 2 {
            return Err(MapError::StructureTooShort { length });
        }
        let leaves = MapError::StructureLeavesMap {
            x,
            y,
            direction: dir,
            length,
        };
        let (ex, ey) = advance(x, y, dir, length).ok_or(leaves.clone())?;
        if ex >= self.geometry.max_x() || ey >= self.geometry.max_y() {
            return Err(leaves);
        }
        Ok((ex, ey))
    }

    fn portal(
        &mut self,
        x: u32,
        y: u32,
        kind: PortalKind,
        direction: DiagDirection,
        transport: TransportKind,
        height: u8,
    ) -> Result<(), MapError> {
        let owner = self.owner;
        let tile = self.tile_mut(x, y)?;
        *tile = TileData {
            kind: TileKind::TunnelBridge,
            owner: Some(owner),
            tunnel_bridge: Some(TunnelBridgeMeta::Portal {
                kind,
                direction,
                transport,
            }),
            height,
            ..TileData::CLEAR
        };
        let straight = TrackBits::single(Track::along_axis(direction));
        set_network(tile, transport, straight);
        Ok(())
    }
}

fn set_network(tile: &mut TileData, transport: TransportKind, pieces: TrackBits) {
    match transport {
        TransportKind::Rail => tile.rail = pieces,
        TransportKind::Road => tile.road = pieces,
        TransportKind::Water => {}
    }
}

/// Coordinates `n` tiles from `(x, y)` heading `dir`, if non-negative.
fn advance(x: u32, y: u32, dir: DiagDirection, n: u32) -> Option<(u32, u32)> {
    match dir {
        DiagDirection::NorthEast => x.checked_sub(n).map(|x| (x, y)),
        DiagDirection::SouthEast => y.checked_add(n).map(|y| (x, y)),
        DiagDirection::SouthWest => x.checked_add(n).map(|x| (x, y)),
        DiagDirection::NorthWest => y.checked_sub(n).map(|y| (x, y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use trackfind_core::TileQuery;

    #[test]
    fn border_is_void() {
        let map = TileMapBuilder::new(4, 4).unwrap().build();
        assert_eq!(map.tile_at(15, 2).kind, TileKind::Void);
        assert_eq!(map.tile_at(2, 15).kind, TileKind::Void);
        assert_eq!(map.tile_at(2, 2).kind, TileKind::Clear);
    }

    #[test]
    fn placing_on_border_is_rejected() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        assert_eq!(
            b.rail(15, 3, TrackBits::CROSS).err(),
            Some(MapError::OutOfBounds { x: 15, y: 3 })
        );
    }

    #[test]
    fn rail_merges_tracks() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        b.rail(3, 3, TrackBits::single(Track::X))
            .unwrap()
            .rail(3, 3, TrackBits::single(Track::Upper))
            .unwrap();
        let map = b.build();
        let rail = map.tile_at(3, 3).rail;
        assert!(rail.contains(Track::X) && rail.contains(Track::Upper));
        assert_eq!(map.tile_at(3, 3).owner, Some(Owner(0)));
    }

    #[test]
    fn rail_line_follows_direction() {
        let mut b = TileMapBuilder::new(5, 5).unwrap();
        b.rail_line(8, 8, DiagDirection::NorthWest, 4).unwrap();
        let map = b.build();
        for y in 5..=8 {
            assert!(map.tile_at(8, y).rail.contains(Track::Y));
        }
        assert_eq!(map.tile_at(8, 4).kind, TileKind::Clear);
    }

    #[test]
    fn station_on_rail_is_occupied() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        b.rail(3, 3, TrackBits::CROSS).unwrap();
        assert!(matches!(
            b.station(3, 3, DiagDirection::NorthEast),
            Err(MapError::Occupied { .. })
        ));
    }

    #[test]
    fn signal_requires_matching_track() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        b.rail_line(2, 2, DiagDirection::SouthWest, 3).unwrap();
        assert_eq!(
            b.signal(3, 2, Trackdir::Y_SE, SignalKind::OneWay, Aspect::Green)
                .err(),
            Some(MapError::NoTrack { x: 3, y: 2 })
        );
        b.signal(3, 2, Trackdir::X_SW, SignalKind::TwoWay, Aspect::Red)
            .unwrap();
        let sig = b.build().tile_at(3, 2).signals.unwrap();
        assert!(sig.along(Trackdir::X_SW) && sig.against(Trackdir::X_SW));
        assert!(!sig.green_along(Trackdir::X_SW));
    }

    #[test]
    fn tunnel_portals_face_each_other() {
        let mut b = TileMapBuilder::new(5, 5).unwrap();
        b.height(4, 6, 2).unwrap();
        b.tunnel(4, 6, DiagDirection::SouthWest, 5, TransportKind::Rail)
            .unwrap();
        let map = b.build();
        let geo = map.geometry();
        let entry = map.tunnel_bridge_meta(geo.tile_xy(4, 6)).unwrap();
        let exit = map.tunnel_bridge_meta(geo.tile_xy(9, 6)).unwrap();
        let rail_tunnel = |inward| Some((PortalKind::Tunnel, inward, TransportKind::Rail));
        assert_eq!(entry.portal(), rail_tunnel(DiagDirection::SouthWest));
        assert_eq!(exit.portal(), rail_tunnel(DiagDirection::NorthEast));
        assert_eq!(
            map.center_height(geo.tile_xy(4, 6)),
            map.center_height(geo.tile_xy(9, 6))
        );
        let inside = map.center_height(geo.tile_xy(6, 6));
        assert!(inside > map.center_height(geo.tile_xy(4, 6)));
    }

    #[test]
    fn tunnel_must_fit() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        assert!(matches!(
            b.tunnel(2, 2, DiagDirection::NorthEast, 5, TransportKind::Rail),
            Err(MapError::StructureLeavesMap { .. })
        ));
        assert!(matches!(
            b.tunnel(2, 2, DiagDirection::SouthWest, 13, TransportKind::Rail),
            Err(MapError::StructureLeavesMap { .. })
        ));
        assert_eq!(
            b.tunnel(2, 2, DiagDirection::SouthWest, 1, TransportKind::Rail)
                .err(),
            Some(MapError::StructureTooShort { length: 1 })
        );
    }

    #[test]
    fn bridge_middle_is_ownerless() {
        let mut b = TileMapBuilder::new(5, 5).unwrap();
        b.owner(Owner(3));
        b.water(6, 4).unwrap();
        b.bridge(4, 4, DiagDirection::SouthWest, 4, TransportKind::Rail)
            .unwrap();
        let map = b.build();
        let middle = map.tile_at(6, 4);
        assert_eq!(middle.owner, None);
        assert!(middle.tunnel_bridge.unwrap().is_bridge_middle());
        assert!(middle.rail.contains(Track::X));
        assert_eq!(map.tile_at(4, 4).owner, Some(Owner(3)));
        assert_eq!(map.tile_at(8, 4).owner, Some(Owner(3)));
    }

    #[test]
    fn built_maps_satisfy_query_contract() {
        let mut b = TileMapBuilder::new(5, 5).unwrap();
        b.rail_line(1, 2, DiagDirection::SouthWest, 6)
            .unwrap()
            .tunnel(7, 2, DiagDirection::SouthWest, 4, TransportKind::Rail)
            .unwrap()
            .water(4, 9)
            .unwrap()
            .bridge(2, 8, DiagDirection::SouthEast, 3, TransportKind::Road)
            .unwrap()
            .station(20, 20, DiagDirection::NorthWest)
            .unwrap();
        compliance::run_full_compliance(&b.build());
    }

    #[test]
    fn road_tunnel_has_no_rail() {
        let mut b = TileMapBuilder::new(5, 5).unwrap();
        b.tunnel(3, 3, DiagDirection::SouthEast, 3, TransportKind::Road)
            .unwrap();
        let map = b.build();
        let portal = map.geometry().tile_xy(3, 3);
        assert!(map.track_status(portal, TransportKind::Rail).is_empty());
        assert!(map
            .track_status(portal, TransportKind::Road)
            .contains(Trackdir::Y_SE));
    }
}
