//! Directions, track pieces, and the static transition tables between them.
//!
//! A tile carries up to six [`Track`] pieces. Each piece can be travelled in
//! two directions, giving the [`Trackdir`] codes `0..=5` and their reversed
//! variants `8..=13`. Reachability is stored as bitsets ([`TrackBits`],
//! [`TrackdirBits`]) for speed; the named accessors below exist so calling
//! code reads as intentions rather than masks.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// One of the four edges of a tile, and the direction of travel across it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DiagDirection {
    /// Towards decreasing x.
    NorthEast = 0,
    /// Towards increasing y.
    SouthEast = 1,
    /// Towards increasing x.
    SouthWest = 2,
    /// Towards decreasing y.
    NorthWest = 3,
}

impl DiagDirection {
    /// All directions in index order.
    pub const ALL: [DiagDirection; 4] = [
        DiagDirection::NorthEast,
        DiagDirection::SouthEast,
        DiagDirection::SouthWest,
        DiagDirection::NorthWest,
    ];

    /// Direction from its index (`0..4`).
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Numeric index of this direction.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        Self::ALL[(self.index() ^ 2) as usize]
    }
}

/// A track piece on a tile, independent of travel direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Track {
    /// Straight along the x axis (north-east to south-west edge).
    X = 0,
    /// Straight along the y axis (north-west to south-east edge).
    Y = 1,
    /// Curve in the north corner.
    Upper = 2,
    /// Curve in the south corner.
    Lower = 3,
    /// Curve in the west corner.
    Left = 4,
    /// Curve in the east corner.
    Right = 5,
}

/// `TRACKDIR_FOR_ENTRY[track][dir]`: the trackdir used when entering a tile
/// moving in `dir` and taking `track`, or `NONE` when the track does not
/// touch the entry edge.
const NONE: u8 = 0xFF;
const TRACKDIR_FOR_ENTRY: [[u8; 4]; 6] = [
    [0, NONE, 8, NONE],
    [NONE, 1, NONE, 9],
    [NONE, 2, 10, NONE],
    [3, NONE, NONE, 11],
    [12, 4, NONE, NONE],
    [NONE, NONE, 5, 13],
];

impl Track {
    /// All track pieces in index order.
    pub const ALL: [Track; 6] = [
        Track::X,
        Track::Y,
        Track::Upper,
        Track::Lower,
        Track::Left,
        Track::Right,
    ];

    /// Track from its index (`0..6`).
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Numeric index of this track.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Trackdir for travelling this piece after entering the tile in `dir`.
    ///
    /// `None` if the piece cannot be reached from that side of the tile.
    pub fn trackdir_entering(self, dir: DiagDirection) -> Option<Trackdir> {
        match TRACKDIR_FOR_ENTRY[self as usize][dir as usize] {
            NONE => None,
            code => Some(Trackdir(code)),
        }
    }

    /// The straight track running along `dir`'s axis.
    pub fn along_axis(dir: DiagDirection) -> Self {
        match dir {
            DiagDirection::NorthEast | DiagDirection::SouthWest => Track::X,
            DiagDirection::SouthEast | DiagDirection::NorthWest => Track::Y,
        }
    }
}

/// Exit direction for every trackdir code (`0..14`); codes 6 and 7 are unused.
const EXIT_DIRECTION: [u8; 14] = [0, 1, 0, 1, 2, 1, 0, 0, 2, 3, 3, 2, 3, 0];

/// Direction of travel when entering the tile, for every trackdir code.
const ENTRY_DIRECTION: [u8; 14] = [0, 1, 1, 0, 1, 2, 0, 0, 2, 3, 2, 3, 0, 3];

/// A track piece together with its direction of travel.
///
/// Valid codes are `0..=5` (forward) and `8..=13` (reversed). Bit 3 is the
/// "reversed" flag; the low three bits name the [`Track`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Trackdir(u8);

impl Trackdir {
    /// X axis, heading north-east.
    pub const X_NE: Trackdir = Trackdir(0);
    /// Y axis, heading south-east.
    pub const Y_SE: Trackdir = Trackdir(1);
    /// Upper curve, leaving through the north-east edge.
    pub const UPPER_E: Trackdir = Trackdir(2);
    /// Lower curve, leaving through the south-east edge.
    pub const LOWER_E: Trackdir = Trackdir(3);
    /// Left curve, leaving through the south-west edge.
    pub const LEFT_S: Trackdir = Trackdir(4);
    /// Right curve, leaving through the south-east edge.
    pub const RIGHT_S: Trackdir = Trackdir(5);
    /// X axis, heading south-west.
    pub const X_SW: Trackdir = Trackdir(8);
    /// Y axis, heading north-west.
    pub const Y_NW: Trackdir = Trackdir(9);
    /// Upper curve, leaving through the north-west edge.
    pub const UPPER_W: Trackdir = Trackdir(10);
    /// Lower curve, leaving through the south-west edge.
    pub const LOWER_W: Trackdir = Trackdir(11);
    /// Left curve, leaving through the north-west edge.
    pub const LEFT_N: Trackdir = Trackdir(12);
    /// Right curve, leaving through the north-east edge.
    pub const RIGHT_N: Trackdir = Trackdir(13);

    /// Trackdir from its raw code; `None` for 6, 7 and anything above 13.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0..=5 | 8..=13 => Some(Self(code)),
            _ => None,
        }
    }

    /// The raw code (`0..=5`, `8..=13`).
    pub fn code(self) -> u8 {
        self.0
    }

    /// The track piece this trackdir runs on.
    pub fn track(self) -> Track {
        Track::ALL[(self.0 & 7) as usize]
    }

    /// Whether this is the reversed variant of its track.
    pub fn is_reversed(self) -> bool {
        self.0 & 8 != 0
    }

    /// Same track, opposite direction of travel.
    pub fn reverse(self) -> Self {
        Self(self.0 ^ 8)
    }

    /// Whether this trackdir runs straight along an axis.
    pub fn is_diagonal(self) -> bool {
        (self.0 & 7) <= 1
    }

    /// Direction of travel when leaving the tile on this trackdir.
    pub fn exit_direction(self) -> DiagDirection {
        DiagDirection::ALL[EXIT_DIRECTION[self.0 as usize] as usize]
    }

    /// Direction of travel when entering the tile on this trackdir.
    pub fn entry_direction(self) -> DiagDirection {
        DiagDirection::ALL[ENTRY_DIRECTION[self.0 as usize] as usize]
    }
}

impl fmt::Debug for Trackdir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "X_NE",
            1 => "Y_SE",
            2 => "UPPER_E",
            3 => "LOWER_E",
            4 => "LEFT_S",
            5 => "RIGHT_S",
            8 => "X_SW",
            9 => "Y_NW",
            10 => "UPPER_W",
            11 => "LOWER_W",
            12 => "LEFT_N",
            13 => "RIGHT_N",
            _ => return write!(f, "Trackdir({})", self.0),
        };
        f.write_str(name)
    }
}

impl fmt::Display for Trackdir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Set of [`Track`] pieces, one bit per track index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TrackBits(u8);

impl TrackBits {
    /// No track.
    pub const EMPTY: TrackBits = TrackBits(0);
    /// All six pieces.
    pub const ALL: TrackBits = TrackBits(0x3F);
    /// A straight along x plus a straight along y.
    pub const CROSS: TrackBits = TrackBits(0x03);

    /// Build from a raw mask; bits above 5 are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x3F)
    }

    /// The raw mask.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Set containing only `track`.
    pub fn single(track: Track) -> Self {
        Self(1 << track.index())
    }

    /// Tracks that can be entered while moving in `dir`.
    pub fn enterable(dir: DiagDirection) -> Self {
        Track::ALL
            .into_iter()
            .filter(|t| t.trackdir_entering(dir).is_some())
            .fold(Self::EMPTY, |acc, t| acc | Self::single(t))
    }

    /// Whether `track` is in the set.
    pub fn contains(self, track: Track) -> bool {
        self.0 & (1 << track.index()) != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of tracks in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether more than one track is present.
    pub fn has_several(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// Lowest-indexed track in the set.
    pub fn first(self) -> Option<Track> {
        if self.0 == 0 {
            None
        } else {
            Track::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// The set with `track` removed.
    pub fn without(self, track: Track) -> Self {
        Self(self.0 & !(1 << track.index()))
    }

    /// Iterate tracks in index order.
    pub fn iter(self) -> impl Iterator<Item = Track> {
        Track::ALL.into_iter().filter(move |t| self.contains(*t))
    }

    /// Both trackdirs of every track in the set.
    pub fn both_directions(self) -> TrackdirBits {
        TrackdirBits(self.0 as u16 | ((self.0 as u16) << 8))
    }
}

impl BitAnd for TrackBits {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for TrackBits {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Set of [`Trackdir`] codes, one bit per code.
///
/// This is the shape of a tile's track status: forward trackdirs in the low
/// byte, reversed trackdirs in the high byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TrackdirBits(u16);

impl TrackdirBits {
    /// No trackdirs.
    pub const EMPTY: TrackdirBits = TrackdirBits(0);
    /// Mask of every valid trackdir code.
    pub const VALID: TrackdirBits = TrackdirBits(0x3F3F);

    /// Build from a raw mask; invalid code bits are dropped.
    pub fn from_bits(bits: u16) -> Self {
        Self(bits & Self::VALID.0)
    }

    /// The raw mask.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Set containing only `td`.
    pub fn single(td: Trackdir) -> Self {
        Self(1 << td.code())
    }

    /// Trackdirs a vehicle may take after entering a tile moving in `dir`.
    pub fn entering(dir: DiagDirection) -> Self {
        Track::ALL
            .into_iter()
            .filter_map(|t| t.trackdir_entering(dir))
            .fold(Self::EMPTY, |acc, td| acc | Self::single(td))
    }

    /// Whether `td` is in the set.
    pub fn contains(self, td: Trackdir) -> bool {
        self.0 & (1 << td.code()) != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of trackdirs in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Fold reversed and forward codes onto their tracks.
    pub fn tracks(self) -> TrackBits {
        TrackBits::from_bits((self.0 | (self.0 >> 8)) as u8)
    }

    /// Iterate trackdirs in code order.
    pub fn iter(self) -> impl Iterator<Item = Trackdir> {
        (0u8..14).filter_map(move |c| {
            if self.0 & (1 << c) != 0 {
                Trackdir::from_code(c)
            } else {
                None
            }
        })
    }
}

impl BitAnd for TrackdirBits {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for TrackdirBits {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_masks_match_reference_values() {
        assert_eq!(
            TrackdirBits::entering(DiagDirection::NorthEast).bits(),
            0x1009
        );
        assert_eq!(
            TrackdirBits::entering(DiagDirection::SouthEast).bits(),
            0x0016
        );
        assert_eq!(
            TrackdirBits::entering(DiagDirection::SouthWest).bits(),
            0x0520
        );
        assert_eq!(
            TrackdirBits::entering(DiagDirection::NorthWest).bits(),
            0x2A00
        );
    }

    #[test]
    fn enterable_tracks_match_reference_values() {
        assert_eq!(TrackBits::enterable(DiagDirection::NorthEast).bits(), 0x19);
        assert_eq!(TrackBits::enterable(DiagDirection::SouthEast).bits(), 0x16);
        assert_eq!(TrackBits::enterable(DiagDirection::SouthWest).bits(), 0x25);
        assert_eq!(TrackBits::enterable(DiagDirection::NorthWest).bits(), 0x2A);
    }

    #[test]
    fn entering_trackdir_has_matching_entry_direction() {
        for dir in DiagDirection::ALL {
            for td in TrackdirBits::entering(dir).iter() {
                assert_eq!(td.entry_direction(), dir, "{td:?} entered moving {dir:?}");
            }
        }
    }

    #[test]
    fn straight_trackdirs_keep_heading() {
        for dir in DiagDirection::ALL {
            let td = Track::along_axis(dir).trackdir_entering(dir).unwrap();
            assert_eq!(td.exit_direction(), dir);
            assert!(td.is_diagonal());
        }
    }

    #[test]
    fn reverse_flips_only_the_direction_bit() {
        assert_eq!(Trackdir::X_NE.reverse(), Trackdir::X_SW);
        assert_eq!(Trackdir::LEFT_N.reverse(), Trackdir::LEFT_S);
        assert_eq!(Trackdir::RIGHT_N.track(), Track::Right);
        assert!(Trackdir::RIGHT_N.is_reversed());
    }

    #[test]
    fn invalid_codes_rejected() {
        assert!(Trackdir::from_code(6).is_none());
        assert!(Trackdir::from_code(7).is_none());
        assert!(Trackdir::from_code(14).is_none());
        assert_eq!(Trackdir::from_code(13), Some(Trackdir::RIGHT_N));
    }

    #[test]
    fn fold_to_tracks() {
        let status = TrackBits::CROSS.both_directions();
        assert_eq!(status.bits(), 0x0303);
        assert_eq!(status.tracks(), TrackBits::CROSS);
        let entering = status & TrackdirBits::entering(DiagDirection::SouthWest);
        assert_eq!(entering.iter().collect::<Vec<_>>(), vec![Trackdir::X_SW]);
    }

    #[test]
    fn several_and_first() {
        let bits = TrackBits::from_bits(0b10100);
        assert!(bits.has_several());
        assert_eq!(bits.first(), Some(Track::Upper));
        assert_eq!(bits.len(), 2);
        assert_eq!(bits.without(Track::Upper), TrackBits::single(Track::Left));
        assert_eq!(bits.without(Track::X), bits);
        assert!(!TrackBits::single(Track::Y).has_several());
        assert_eq!(TrackBits::EMPTY.first(), None);
    }
}
