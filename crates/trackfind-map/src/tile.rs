//! Stored state of one map tile.

use trackfind_core::{
    Owner, SignalState, Slope, TileKind, TrackBits, TrackdirBits, TransportKind,
    TunnelBridgeMeta,
};

/// Everything a [`TileMap`](crate::TileMap) knows about one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileData {
    /// Coarse classification.
    pub kind: TileKind,
    /// Infrastructure owner.
    pub owner: Option<Owner>,
    /// Rail tracks, usable in both directions.
    pub rail: TrackBits,
    /// Road pieces, usable in both directions.
    pub road: TrackBits,
    /// Signals on the rail tracks.
    pub signals: Option<SignalState>,
    /// Tunnel or bridge part.
    pub tunnel_bridge: Option<TunnelBridgeMeta>,
    /// Raised corners.
    pub slope: Slope,
    /// Base height level.
    pub height: u8,
}

impl TileData {
    /// Bare, flat, unowned ground at height zero.
    pub const CLEAR: TileData = TileData {
        kind: TileKind::Clear,
        owner: None,
        rail: TrackBits::EMPTY,
        road: TrackBits::EMPTY,
        signals: None,
        tunnel_bridge: None,
        slope: Slope::FLAT,
        height: 0,
    };

    /// Map border tile.
    pub const VOID: TileData = TileData {
        kind: TileKind::Void,
        ..Self::CLEAR
    };

    /// Trackdirs usable by `transport`.
    ///
    /// Water tiles allow every trackdir to ships; rail and road report their
    /// stored pieces in both directions.
    pub fn track_status(&self, transport: TransportKind) -> TrackdirBits {
        match transport {
            TransportKind::Rail => self.rail.both_directions(),
            TransportKind::Road => self.road.both_directions(),
            TransportKind::Water if self.kind == TileKind::Water => {
                TrackBits::ALL.both_directions()
            }
            TransportKind::Water => TrackdirBits::EMPTY,
        }
    }

    /// Centre elevation in half levels: twice the base height, plus one
    /// when any corner is raised.
    pub fn center_height(&self) -> u8 {
        self.height
            .saturating_mul(2)
            .saturating_add(u8::from(!self.slope.is_flat()))
    }
}

impl Default for TileData {
    fn default() -> Self {
        Self::CLEAR
    }
}
