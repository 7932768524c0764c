//! Benchmark networks for the trackfind pathfinder.
//!
//! - [`reference_profile`]: a 480-tile ladder with 64 crossovers
//! - [`stress_profile`]: four ladders stacked on a 4096-tile-wide map
//! - [`ladder`]: the generator behind both, seeded for reproducibility

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trackfind_core::{DiagDirection, TileIndex, Track, TrackBits};
use trackfind_map::{MapError, TileMap, TileMapBuilder};

/// A map and the start of a south-west-bound search on it.
pub struct Network {
    /// The map.
    pub map: TileMap,
    /// Start tiles, one per ladder.
    pub starts: Vec<TileIndex>,
    /// Start direction.
    pub direction: DiagDirection,
}

/// One ladder of 480 tiles with 64 crossovers on a 512x16 map.
pub fn reference_profile(seed: u64) -> Result<Network, MapError> {
    let mut b = TileMapBuilder::new(9, 4)?;
    let start = ladder(&mut b, 2, 480, 64, seed)?;
    Ok(Network {
        map: b.build(),
        starts: vec![start],
        direction: DiagDirection::SouthWest,
    })
}

/// Four ladders of 4000 tiles with 1024 crossovers each on a 4096x64 map.
pub fn stress_profile(seed: u64) -> Result<Network, MapError> {
    let mut b = TileMapBuilder::new(12, 6)?;
    let mut starts = Vec::with_capacity(4);
    for i in 0..4u32 {
        let ladder_seed = seed.wrapping_add(i as u64);
        starts.push(ladder(&mut b, 4 + 12 * i, 4000, 1024, ladder_seed)?);
    }
    Ok(Network {
        map: b.build(),
        starts,
        direction: DiagDirection::SouthWest,
    })
}

/// Lay two parallel lines on rows `row` and `row + 1`, from x=2 for
/// `length` tiles, joined by `crossovers` single-track links in random
/// places and directions. Both lines end in a platform.
///
/// Returns the first tile of the upper line.
pub fn ladder(
    b: &mut TileMapBuilder,
    row: u32,
    length: u32,
    crossovers: u32,
    seed: u64,
) -> Result<TileIndex, MapError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    b.rail_line(2, row, DiagDirection::SouthWest, length)?
        .rail_line(2, row + 1, DiagDirection::SouthWest, length)?
        .station(2 + length, row, DiagDirection::SouthWest)?
        .station(2 + length, row + 1, DiagDirection::SouthWest)?;

    // Crossovers sit on even columns so no two touch.
    let mut slots: Vec<u32> = (2..length / 2).map(|k| 2 + 2 * k).collect();
    slots.shuffle(&mut rng);
    slots.truncate(crossovers as usize);
    for x in slots {
        if rng.random_bool(0.5) {
            // Upper line curves down onto the lower one.
            b.rail(x, row, TrackBits::single(Track::Right))?
                .rail(x, row + 1, TrackBits::single(Track::Left))?;
        } else {
            // Lower line curves up onto the upper one.
            b.rail(x, row + 1, TrackBits::single(Track::Upper))?
                .rail(x, row, TrackBits::single(Track::Lower))?;
        }
    }
    Ok(b.geometry().tile_xy(2, row))
}
