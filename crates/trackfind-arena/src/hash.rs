//! Spatial hashing of tiles into bucket indices.

use trackfind_core::{MapGeometry, TileIndex};

/// Maps a tile to one of a power-of-two number of buckets.
///
/// The bucket index interleaves the low bits of the tile's x and y
/// coordinates, so every tile inside an aligned window of
/// `2^x_bits * 2^y_bits` tiles lands in its own bucket. Searches touch
/// spatially local tiles, which keeps collisions rare.
///
/// With the default 1024 buckets the window is 32x32 tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileHasher {
    geometry: MapGeometry,
    x_bits: u32,
    y_bits: u32,
}

impl TileHasher {
    /// Hasher for `bucket_count` buckets over `geometry`.
    ///
    /// A count that is not a power of two is rounded up; callers are
    /// expected to pass a validated [`ArenaConfig`](crate::ArenaConfig)
    /// value.
    pub fn new(geometry: MapGeometry, bucket_count: usize) -> Self {
        let bits = bucket_count.max(1).next_power_of_two().trailing_zeros();
        let x_bits = bits.div_ceil(2);
        Self {
            geometry,
            x_bits,
            y_bits: bits - x_bits,
        }
    }

    /// Number of buckets addressed.
    pub fn bucket_count(&self) -> usize {
        1 << (self.x_bits + self.y_bits)
    }

    /// Bucket for `tile`.
    pub fn bucket(&self, tile: TileIndex) -> usize {
        let x = self.geometry.tile_x(tile) & ((1 << self.x_bits) - 1);
        let y = self.geometry.tile_y(tile) & ((1 << self.y_bits) - 1);
        (x | (y << self.x_bits)) as usize
    }
}
