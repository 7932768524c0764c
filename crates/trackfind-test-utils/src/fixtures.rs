//! Hand-built maps with known shortest paths.
//!
//! Every fixture starts a south-west-bound train on plain track:
//!
//! - [`straight_to_station`]: one line ending in a platform.
//! - [`tunnel_line`]: a line that dives through a tunnel.
//! - [`three_way_junction`]: one intersection with three platforms behind it.
//! - [`costed_diamond`]: two routes of different cost meeting again.
//! - [`branching_yard`]: a long line with a siding every few tiles.

use trackfind_core::{DiagDirection, Slope, TileIndex, TileQuery, Track, TrackBits, TransportKind};
use trackfind_map::{MapError, TileMap, TileMapBuilder};

/// A map together with where and which way to start searching.
#[derive(Debug)]
pub struct Fixture {
    pub map: TileMap,
    pub start: TileIndex,
    pub direction: DiagDirection,
}

impl Fixture {
    /// Tile at `(x, y)` of the fixture map.
    pub fn tile(&self, x: u32, y: u32) -> TileIndex {
        self.map.geometry().tile_xy(x, y)
    }
}

fn fixture(b: &TileMapBuilder, x: u32, y: u32) -> Fixture {
    Fixture {
        map: b.build(),
        start: b.geometry().tile_xy(x, y),
        direction: DiagDirection::SouthWest,
    }
}

/// Rail from `(2, 8)` for `count` tiles, then a platform.
pub fn straight_to_station(count: u32) -> Result<Fixture, MapError> {
    let mut b = TileMapBuilder::new(6, 5)?;
    b.rail_line(2, 8, DiagDirection::SouthWest, count)?
        .station(2 + count, 8, DiagDirection::SouthWest)?;
    Ok(fixture(&b, 2, 8))
}

/// Rail x=2..=4, tunnel portals at x=5 and x=10, rail x=11..=13 and a
/// platform at x=14, all on row 3. The platform is 12 from the start.
pub fn tunnel_line() -> Result<Fixture, MapError> {
    let mut b = TileMapBuilder::new(5, 5)?;
    b.rail_line(2, 3, DiagDirection::SouthWest, 3)?
        .tunnel(5, 3, DiagDirection::SouthWest, 5, TransportKind::Rail)?
        .rail_line(11, 3, DiagDirection::SouthWest, 3)?
        .station(14, 3, DiagDirection::SouthWest)?;
    Ok(fixture(&b, 2, 3))
}

/// Line from `(2, 8)` to a junction at `(6, 8)` that continues straight,
/// curves north-west and curves south-east. Each way ends two tiles
/// further at a platform; all three platforms are 7 from the start.
pub fn three_way_junction() -> Result<Fixture, MapError> {
    let mut b = TileMapBuilder::new(5, 5)?;
    let curves = TrackBits::single(Track::Upper) | TrackBits::single(Track::Right);
    b.rail_line(2, 8, DiagDirection::SouthWest, 5)?
        .rail(6, 8, curves)?
        .rail_line(7, 8, DiagDirection::SouthWest, 2)?
        .station(9, 8, DiagDirection::SouthWest)?
        .rail_line(6, 7, DiagDirection::NorthWest, 2)?
        .station(6, 5, DiagDirection::NorthWest)?
        .rail_line(6, 9, DiagDirection::SouthEast, 2)?
        .station(6, 11, DiagDirection::SouthEast)?;
    Ok(fixture(&b, 2, 8))
}

/// Two routes from a junction at `(10, 8)` to a merge junction at
/// `(15, 8)`.
///
/// The direct route along row 8 reaches the merge at 12. The detour dips
/// to row 9 over an uphill tile and arrives at 15 with a slope penalty
/// of 1. Behind the merge one platform is straight on at `(19, 8)` and
/// one south-east at `(15, 11)`.
pub fn costed_diamond() -> Result<Fixture, MapError> {
    let mut b = TileMapBuilder::new(5, 5)?;
    b.rail_line(3, 8, DiagDirection::SouthWest, 16)?
        .rail(10, 8, TrackBits::single(Track::Right))?
        .rail(14, 8, TrackBits::single(Track::Lower))?
        .rail(15, 8, TrackBits::single(Track::Right))?
        .station(19, 8, DiagDirection::SouthWest)?
        .rail(10, 9, TrackBits::single(Track::Left))?
        .rail_line(11, 9, DiagDirection::SouthWest, 3)?
        .slope(11, 9, Slope::SW)?
        .rail(14, 9, TrackBits::single(Track::Upper))?
        .rail_line(15, 9, DiagDirection::SouthEast, 2)?
        .station(15, 11, DiagDirection::SouthEast)?;
    Ok(fixture(&b, 3, 8))
}

/// A line along row 2 from x=2 with a south-east siding every third tile,
/// `sidings` in all. Each siding is six tiles of track and a platform.
pub fn branching_yard(sidings: u32) -> Result<Fixture, MapError> {
    let mut b = TileMapBuilder::new(7, 4)?;
    let length = 3 * sidings + 4;
    b.rail_line(2, 2, DiagDirection::SouthWest, length)?;
    for i in 0..sidings {
        let x = 4 + 3 * i;
        b.rail(x, 2, TrackBits::single(Track::Right))?
            .rail_line(x, 3, DiagDirection::SouthEast, 6)?
            .station(x, 9, DiagDirection::SouthEast)?;
    }
    b.station(2 + length, 2, DiagDirection::SouthWest)?;
    Ok(fixture(&b, 2, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackfind_core::TileKind;

    #[test]
    fn fixtures_build() {
        for f in [
            straight_to_station(10),
            tunnel_line(),
            three_way_junction(),
            costed_diamond(),
            branching_yard(8),
        ] {
            let f = f.unwrap();
            assert_eq!(f.map.tile(f.start).kind, TileKind::Railway);
        }
    }

    #[test]
    fn yard_fits_forty_sidings() {
        assert!(branching_yard(40).is_ok());
    }
}
