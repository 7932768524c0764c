//! Map dimensions and tile index arithmetic.

use crate::error::GeometryError;
use crate::id::TileIndex;
use crate::track::DiagDirection;

/// Power-of-two map dimensions.
///
/// Tiles are laid out row-major: `index = (y << log_x) + x`. The last row
/// and column of the map are a void border, so stepping off the playable
/// area and masking back into range always lands on a tile without track.
///
/// # Examples
///
/// ```
/// use trackfind_core::{DiagDirection, MapGeometry};
///
/// let geo = MapGeometry::new(4, 4).unwrap();
/// let t = geo.tile_xy(3, 5);
/// assert_eq!(geo.tile_x(t), 3);
/// assert_eq!(geo.tile_y(t), 5);
/// assert_eq!(geo.step(t, DiagDirection::SouthWest), geo.tile_xy(4, 5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapGeometry {
    log_x: u8,
    log_y: u8,
}

impl MapGeometry {
    /// Smallest supported axis, as a power of two (4 tiles).
    pub const MIN_LOG: u8 = 2;
    /// Largest supported axis, as a power of two (4096 tiles).
    pub const MAX_LOG: u8 = 12;

    /// Create a geometry of `2^log_x * 2^log_y` tiles.
    ///
    /// Returns `Err(GeometryError::AxisOutOfRange)` if either axis is outside
    /// [`MIN_LOG`](Self::MIN_LOG)`..=`[`MAX_LOG`](Self::MAX_LOG).
    pub fn new(log_x: u8, log_y: u8) -> Result<Self, GeometryError> {
        for (name, value) in [("log_x", log_x), ("log_y", log_y)] {
            if !(Self::MIN_LOG..=Self::MAX_LOG).contains(&value) {
                return Err(GeometryError::AxisOutOfRange {
                    name,
                    value,
                    min: Self::MIN_LOG,
                    max: Self::MAX_LOG,
                });
            }
        }
        Ok(Self { log_x, log_y })
    }

    /// Log2 of the map width.
    pub fn log_x(&self) -> u8 {
        self.log_x
    }

    /// Log2 of the map height.
    pub fn log_y(&self) -> u8 {
        self.log_y
    }

    /// Width in tiles.
    pub fn size_x(&self) -> u32 {
        1 << self.log_x
    }

    /// Height in tiles.
    pub fn size_y(&self) -> u32 {
        1 << self.log_y
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        1usize << (self.log_x + self.log_y)
    }

    /// Largest x coordinate; this column is part of the void border.
    pub fn max_x(&self) -> u32 {
        self.size_x() - 1
    }

    /// Largest y coordinate; this row is part of the void border.
    pub fn max_y(&self) -> u32 {
        self.size_y() - 1
    }

    /// Tile at `(x, y)`. Coordinates are masked into the map.
    pub fn tile_xy(&self, x: u32, y: u32) -> TileIndex {
        let x = x & self.max_x();
        let y = y & self.max_y();
        TileIndex((y << self.log_x) + x)
    }

    /// X coordinate of a tile.
    pub fn tile_x(&self, tile: TileIndex) -> u32 {
        tile.0 & self.max_x()
    }

    /// Y coordinate of a tile.
    pub fn tile_y(&self, tile: TileIndex) -> u32 {
        (tile.0 >> self.log_x) & self.max_y()
    }

    /// Wrap an index that may have run past either end of the map.
    pub fn mask(&self, raw: u32) -> TileIndex {
        TileIndex(raw & (self.tile_count() as u32 - 1))
    }

    /// Whether a tile lies on the void border (last row or column).
    pub fn is_border(&self, tile: TileIndex) -> bool {
        self.tile_x(tile) == self.max_x() || self.tile_y(tile) == self.max_y()
    }

    /// Index delta for one step in `dir`.
    pub fn offset(&self, dir: DiagDirection) -> i32 {
        match dir {
            DiagDirection::NorthEast => -1,
            DiagDirection::SouthEast => self.size_x() as i32,
            DiagDirection::SouthWest => 1,
            DiagDirection::NorthWest => -(self.size_x() as i32),
        }
    }

    /// Neighbouring tile in `dir`.
    ///
    /// Stepping off the map wraps; the wrapped tile is on the void border
    /// (or the row/column next to it) and carries no track.
    pub fn step(&self, tile: TileIndex, dir: DiagDirection) -> TileIndex {
        self.mask(tile.0.wrapping_add_signed(self.offset(dir)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_axis_out_of_range() {
        assert!(matches!(
            MapGeometry::new(1, 6),
            Err(GeometryError::AxisOutOfRange { name: "log_x", .. })
        ));
        assert!(matches!(
            MapGeometry::new(6, 13),
            Err(GeometryError::AxisOutOfRange { name: "log_y", .. })
        ));
    }

    #[test]
    fn dimensions() {
        let geo = MapGeometry::new(6, 5).unwrap();
        assert_eq!(geo.size_x(), 64);
        assert_eq!(geo.size_y(), 32);
        assert_eq!(geo.tile_count(), 2048);
        assert_eq!(geo.max_x(), 63);
    }

    #[test]
    fn border_detection() {
        let geo = MapGeometry::new(4, 4).unwrap();
        assert!(geo.is_border(geo.tile_xy(15, 3)));
        assert!(geo.is_border(geo.tile_xy(3, 15)));
        assert!(!geo.is_border(geo.tile_xy(14, 14)));
    }

    #[test]
    fn step_off_the_top_wraps_into_range() {
        let geo = MapGeometry::new(4, 4).unwrap();
        let t = geo.step(geo.tile_xy(0, 0), DiagDirection::NorthEast);
        assert!((t.0 as usize) < geo.tile_count());
    }

    proptest! {
        #[test]
        fn step_then_reverse_returns(x in 1u32..14, y in 1u32..14, d in 0u8..4) {
            let geo = MapGeometry::new(4, 4).unwrap();
            let dir = DiagDirection::from_index(d).unwrap();
            let t = geo.tile_xy(x, y);
            prop_assert_eq!(geo.step(geo.step(t, dir), dir.reverse()), t);
        }
    }
}
