//! Per-tile presence bitmasks for the generic follower.

use trackfind_core::{MapGeometry, TileIndex, Trackdir};

use crate::config::ArenaConfig;
use crate::table::ChainedTable;

/// Remembers which trackdirs of each tile have been entered.
///
/// Every tile owns one 16-bit mask. Bits `0..=13` are trackdir codes; bit
/// [`TUNNEL_BIT`](Self::TUNNEL_BIT) marks a tunnel or bridge end that was
/// skipped over. Only presence is stored, never a length.
///
/// When the link pool runs dry, [`mark`](Self::mark) answers `false` as if
/// the bit had already been set. The caller then abandons that branch, so
/// the search stays bounded at the cost of possibly missing tiles.
#[derive(Debug)]
pub struct PresenceSet {
    table: ChainedTable<u16>,
    exhaustions: u64,
}

impl PresenceSet {
    /// Bit recording a skipped tunnel or bridge end.
    pub const TUNNEL_BIT: u8 = 14;

    /// Create an empty set sized by `config`.
    pub fn new(geometry: MapGeometry, config: &ArenaConfig) -> Self {
        Self {
            table: ChainedTable::new(geometry, config),
            exhaustions: 0,
        }
    }

    /// Set `bit` for `tile`.
    ///
    /// Returns `true` if the bit was newly set, `false` if it was already
    /// present or no link record was left to store it.
    pub fn mark(&mut self, tile: TileIndex, bit: u8) -> bool {
        debug_assert!(bit < 16, "presence bit {bit} out of range");
        let flag = 1u16 << bit;
        if let Some(mask) = self.table.find_mut(tile, |_| true) {
            if *mask & flag != 0 {
                return false;
            }
            *mask |= flag;
            return true;
        }
        match self.table.insert(tile, flag) {
            Ok(()) => true,
            Err(e) => {
                self.exhaustions += 1;
                log::debug!("[tpf] no links left at tile {tile}: {e}");
                false
            }
        }
    }

    /// Set the bit for trackdir `td` on `tile`.
    pub fn mark_trackdir(&mut self, tile: TileIndex, td: Trackdir) -> bool {
        self.mark(tile, td.code())
    }

    /// Set the tunnel bit on `tile`.
    pub fn mark_tunnel(&mut self, tile: TileIndex) -> bool {
        self.mark(tile, Self::TUNNEL_BIT)
    }

    /// Mask recorded for `tile`; zero if the tile was never marked.
    pub fn mask(&self, tile: TileIndex) -> u16 {
        self.table.find(tile, |_| true).copied().unwrap_or(0)
    }

    /// Whether `bit` is set for `tile`.
    pub fn contains(&self, tile: TileIndex, bit: u8) -> bool {
        self.mask(tile) & (1 << bit) != 0
    }

    /// All `(tile, mask)` records, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (TileIndex, u16)> + '_ {
        self.table.iter().map(|(tile, mask)| (tile, *mask))
    }

    /// Overflow link records in use.
    pub fn links_used(&self) -> usize {
        self.table.links_used()
    }

    /// Overflow link records available in total.
    pub fn link_capacity(&self) -> usize {
        self.table.link_capacity()
    }

    /// Marks refused because the link pool was empty.
    pub fn exhaustions(&self) -> u64 {
        self.exhaustions
    }

    /// Forget every mark and return all links to the pool.
    pub fn reset(&mut self) {
        self.table.reset();
        self.exhaustions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geo() -> MapGeometry {
        MapGeometry::new(6, 6).unwrap()
    }

    #[test]
    fn second_mark_of_same_bit_is_refused() {
        let mut set = PresenceSet::new(geo(), &ArenaConfig::default());
        let tile = geo().tile_xy(5, 5);
        assert!(set.mark_trackdir(tile, Trackdir::X_NE));
        assert!(!set.mark_trackdir(tile, Trackdir::X_NE));
        assert!(set.mark_trackdir(tile, Trackdir::X_SW));
        assert_eq!(set.mask(tile), 0x0101);
    }

    #[test]
    fn tunnel_bit_is_separate() {
        let mut set = PresenceSet::new(geo(), &ArenaConfig::default());
        let tile = geo().tile_xy(2, 3);
        assert!(set.mark_tunnel(tile));
        assert!(set.contains(tile, PresenceSet::TUNNEL_BIT));
        assert!(!set.contains(tile, 0));
    }

    #[test]
    fn exhaustion_reads_as_already_visited() {
        let mut set = PresenceSet::new(geo(), &ArenaConfig::new(4, 1));
        let g = geo();
        assert!(set.mark(g.tile_xy(0, 0), 0));
        assert!(set.mark(g.tile_xy(2, 0), 0));
        assert!(!set.mark(g.tile_xy(0, 2), 0));
        assert_eq!(set.exhaustions(), 1);
        assert_eq!(set.links_used(), 1);
        // Existing tiles still accept new bits.
        assert!(set.mark(g.tile_xy(2, 0), 1));
    }

    #[test]
    fn iter_reports_each_tile_once() {
        let mut set = PresenceSet::new(geo(), &ArenaConfig::new(4, 8));
        let g = geo();
        for x in 0..4 {
            set.mark(g.tile_xy(x, 0), 1);
            set.mark(g.tile_xy(x, 0), 9);
        }
        let mut records: Vec<_> = set.iter().collect();
        records.sort();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|&(_, mask)| mask == 0x0202));
        set.reset();
        assert_eq!(set.iter().count(), 0);
    }

    proptest! {
        #[test]
        fn mark_true_exactly_once_per_bit(
            marks in proptest::collection::vec((0u32..40, 0u32..40, 0u8..15), 1..200)
        ) {
            let g = geo();
            let mut set = PresenceSet::new(g, &ArenaConfig::new(16, 1000));
            let mut model = std::collections::HashSet::new();
            for (x, y, bit) in marks {
                let tile = g.tile_xy(x, y);
                prop_assert_eq!(set.mark(tile, bit), model.insert((tile, bit)));
            }
        }
    }
}
