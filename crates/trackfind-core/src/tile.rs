//! Per-tile metadata reported by a [`TileQuery`](crate::TileQuery).

use crate::track::{DiagDirection, Trackdir, TrackdirBits};

/// Vehicle family whose network is being searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Railway track.
    Rail,
    /// Road pieces.
    Road,
    /// Navigable water.
    Water,
}

impl TransportKind {
    /// Every transport kind.
    pub const ALL: [TransportKind; 3] = [Self::Rail, Self::Road, Self::Water];
}

/// Coarse classification of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Bare land.
    Clear,
    /// Plain railway track, with or without signals.
    Railway,
    /// Railway depot.
    RailDepot,
    /// Road.
    Road,
    /// Station platform or stop.
    Station,
    /// Sea, river or canal.
    Water,
    /// Tunnel portal or any part of a bridge.
    TunnelBridge,
    /// Map border.
    Void,
}

impl TileKind {
    /// Tile kinds that carry an owner relevant to rail continuity.
    pub fn is_rail_infrastructure(self) -> bool {
        matches!(self, Self::Railway | Self::Station | Self::TunnelBridge)
    }
}

/// Raised corners of a tile.
///
/// Bit layout: west = 1, south = 2, east = 4, north = 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Slope(u8);

/// Uphill trackdirs for each of the fifteen non-steep corner combinations.
const UPHILL: [u16; 15] = {
    const X_NE: u16 = 1 << 0;
    const Y_SE: u16 = 1 << 1;
    const X_SW: u16 = 1 << 8;
    const Y_NW: u16 = 1 << 9;
    [
        0,
        X_SW | Y_NW,
        X_SW | Y_SE,
        X_SW,
        X_NE | Y_SE,
        0,
        Y_SE,
        0,
        X_NE | Y_NW,
        Y_NW,
        0,
        0,
        X_NE,
        0,
        0,
    ]
};

impl Slope {
    /// Level ground.
    pub const FLAT: Slope = Slope(0);
    /// West corner raised.
    pub const W: Slope = Slope(1);
    /// South corner raised.
    pub const S: Slope = Slope(2);
    /// East corner raised.
    pub const E: Slope = Slope(4);
    /// North corner raised.
    pub const N: Slope = Slope(8);
    /// South-west edge raised.
    pub const SW: Slope = Slope(1 | 2);
    /// South-east edge raised.
    pub const SE: Slope = Slope(2 | 4);
    /// North-east edge raised.
    pub const NE: Slope = Slope(4 | 8);
    /// North-west edge raised.
    pub const NW: Slope = Slope(8 | 1);

    /// Build from raw corner bits; bits above the four corners are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// The raw corner bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether no corner is raised.
    pub fn is_flat(self) -> bool {
        self.0 == 0
    }

    /// Straight trackdirs that climb when driven across this slope.
    pub fn uphill_trackdirs(self) -> TrackdirBits {
        UPHILL
            .get(self.0 as usize)
            .map_or(TrackdirBits::EMPTY, |&b| TrackdirBits::from_bits(b))
    }

    /// Whether travelling `td` across this slope goes uphill.
    pub fn is_uphill(self, td: Trackdir) -> bool {
        td.is_diagonal() && self.uphill_trackdirs().contains(td)
    }
}

/// Which opaque structure a portal opens onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortalKind {
    /// Tunnel mouth.
    Tunnel,
    /// Bridge ramp.
    BridgeRamp,
}

/// Tunnel and bridge information for a [`TileKind::TunnelBridge`] tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TunnelBridgeMeta {
    /// Entrance or exit of a tunnel or bridge.
    Portal {
        /// Tunnel mouth or bridge ramp.
        kind: PortalKind,
        /// Direction of travel that leads *into* the structure.
        direction: DiagDirection,
        /// Network the structure belongs to.
        transport: TransportKind,
    },
    /// Span between two bridge ramps. Has no owner.
    BridgeMiddle {
        /// Network carried by the bridge.
        transport: TransportKind,
    },
}

impl TunnelBridgeMeta {
    /// Whether this is the ownerless middle part of a bridge.
    pub fn is_bridge_middle(&self) -> bool {
        matches!(self, Self::BridgeMiddle { .. })
    }

    /// Portal kind and inward direction, if this is a portal.
    pub fn portal(&self) -> Option<(PortalKind, DiagDirection, TransportKind)> {
        match *self {
            Self::Portal {
                kind,
                direction,
                transport,
            } => Some((kind, direction, transport)),
            Self::BridgeMiddle { .. } => None,
        }
    }
}

/// Signals on a railway tile.
///
/// A signal *along* a trackdir faces a train travelling that trackdir; a
/// signal *against* it faces the opposite direction. A two-way signal sets
/// both bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SignalState {
    /// Trackdirs that have a signal facing them.
    pub present: TrackdirBits,
    /// Trackdirs whose facing signal currently shows green.
    pub green: TrackdirBits,
}

impl SignalState {
    /// A signal faces a train travelling `td`.
    pub fn along(&self, td: Trackdir) -> bool {
        self.present.contains(td)
    }

    /// A signal faces a train travelling the other way on `td`'s track.
    pub fn against(&self, td: Trackdir) -> bool {
        self.present.contains(td.reverse())
    }

    /// The signal facing `td` shows green.
    pub fn green_along(&self, td: Trackdir) -> bool {
        self.green.contains(td)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uphill_table_spot_checks() {
        assert!(Slope::SW.is_uphill(Trackdir::X_SW));
        assert!(!Slope::SW.is_uphill(Trackdir::X_NE));
        assert!(Slope::NE.is_uphill(Trackdir::X_NE));
        assert!(Slope::SE.is_uphill(Trackdir::Y_SE));
        assert!(Slope::NW.is_uphill(Trackdir::Y_NW));
        assert!(Slope::N.is_uphill(Trackdir::X_NE));
        assert!(Slope::N.is_uphill(Trackdir::Y_NW));
        assert!(Slope::FLAT.uphill_trackdirs().is_empty());
    }

    #[test]
    fn curves_never_climb() {
        assert!(!Slope::SW.is_uphill(Trackdir::UPPER_E));
        assert!(!Slope::N.is_uphill(Trackdir::LEFT_N));
    }

    #[test]
    fn steep_bits_are_dropped() {
        assert_eq!(Slope::from_bits(0x1F).bits(), 0x0F);
        assert!(Slope::from_bits(0x0F).uphill_trackdirs().is_empty());
    }

    #[test]
    fn two_way_signal_is_along_and_against() {
        let td = Trackdir::X_NE;
        let sig = SignalState {
            present: TrackdirBits::single(td) | TrackdirBits::single(td.reverse()),
            green: TrackdirBits::EMPTY,
        };
        assert!(sig.along(td));
        assert!(sig.against(td));
        assert!(!sig.green_along(td));
    }

    #[test]
    fn bridge_middle_has_no_portal() {
        let meta = TunnelBridgeMeta::BridgeMiddle {
            transport: TransportKind::Rail,
        };
        assert!(meta.is_bridge_middle());
        assert!(meta.portal().is_none());
    }
}
