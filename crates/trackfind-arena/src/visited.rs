//! Best-length records for the train search.

use trackfind_core::{DiagDirection, MapGeometry, TileIndex};

use crate::config::ArenaConfig;
use crate::table::ChainedTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Record {
    direction: DiagDirection,
    length: u32,
}

/// Bounded map from `(tile, direction)` to the shortest length seen.
///
/// `direction` is the direction of travel on entering the tile. A pair keeps
/// a single length, which only ever decreases during a run.
///
/// # Examples
///
/// ```
/// use trackfind_arena::{ArenaConfig, VisitedSet};
/// use trackfind_core::{DiagDirection, MapGeometry};
///
/// let geo = MapGeometry::new(6, 6).unwrap();
/// let mut visited = VisitedSet::new(geo, &ArenaConfig::default());
/// let tile = geo.tile_xy(4, 4);
///
/// assert!(visited.try_mark(tile, DiagDirection::SouthWest, 15));
/// assert!(visited.try_mark(tile, DiagDirection::SouthWest, 12));
/// assert!(!visited.try_mark(tile, DiagDirection::SouthWest, 15));
/// assert!(!visited.confirm(tile, DiagDirection::SouthWest, 15));
/// assert!(visited.confirm(tile, DiagDirection::SouthWest, 12));
/// ```
#[derive(Debug)]
pub struct VisitedSet {
    table: ChainedTable<Record>,
    exhaustions: u64,
}

impl VisitedSet {
    /// Create an empty set sized by `config`.
    pub fn new(geometry: MapGeometry, config: &ArenaConfig) -> Self {
        Self {
            table: ChainedTable::new(geometry, config),
            exhaustions: 0,
        }
    }

    /// Record `length` for `(tile, direction)` if it is new or shorter.
    ///
    /// Returns `false` when an equal or shorter length is already stored,
    /// and also when the link pool is exhausted. Both mean "do not explore
    /// from here".
    pub fn try_mark(&mut self, tile: TileIndex, direction: DiagDirection, length: u32) -> bool {
        if let Some(record) = self.table.find_mut(tile, |r| r.direction == direction) {
            if length >= record.length {
                return false;
            }
            record.length = length;
            return true;
        }
        match self.table.insert(tile, Record { direction, length }) {
            Ok(()) => true,
            Err(e) => {
                self.exhaustions += 1;
                log::debug!("[ntp] no links left at tile {tile}: {e}");
                false
            }
        }
    }

    /// Whether `length` is still the best recorded for `(tile, direction)`.
    ///
    /// Used on resuming a queued branch: `false` means a shorter path was
    /// recorded after the branch was queued.
    ///
    /// The pair must have been recorded by [`try_mark`](Self::try_mark) with
    /// a length no greater than `length`. Violations are driver bugs: debug
    /// builds panic, release builds log and answer `false`.
    pub fn confirm(&self, tile: TileIndex, direction: DiagDirection, length: u32) -> bool {
        match self.table.find(tile, |r| r.direction == direction) {
            Some(record) => {
                debug_assert!(
                    record.length <= length,
                    "stored length {} exceeds queued length {length} at {tile}",
                    record.length
                );
                record.length == length
            }
            None => {
                log::error!("[ntp] confirm on untracked tile {tile} heading {direction:?}");
                debug_assert!(false, "confirm on untracked tile {tile}");
                false
            }
        }
    }

    /// Shortest length recorded for `(tile, direction)`.
    pub fn best_length(&self, tile: TileIndex, direction: DiagDirection) -> Option<u32> {
        self.table
            .find(tile, |r| r.direction == direction)
            .map(|r| r.length)
    }

    /// Overflow link records in use.
    pub fn links_used(&self) -> usize {
        self.table.links_used()
    }

    /// Marks refused because the link pool was empty.
    pub fn exhaustions(&self) -> u64 {
        self.exhaustions
    }

    /// Forget every record and return all links to the pool.
    pub fn reset(&mut self) {
        self.table.reset();
        self.exhaustions = 0;
    }
}
