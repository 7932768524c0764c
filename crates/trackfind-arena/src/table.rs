//! Bucketed tile table with an inline head and arena-backed overflow.
//!
//! Each bucket keeps its first record inline. Records for further tiles
//! (or further keys of the same tile) hashing to the same bucket are chained
//! through a [`LinkArena`]. Chains only grow by prepending freshly allocated
//! links, so they are acyclic and bounded by the arena capacity.

use trackfind_core::{MapGeometry, TileIndex};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::hash::TileHasher;
use crate::link::{LinkArena, LinkIndex};

#[derive(Clone, Copy, Debug)]
enum Bucket<P> {
    Empty,
    Occupied {
        tile: TileIndex,
        payload: P,
        next: LinkIndex,
    },
}

#[derive(Debug)]
pub(crate) struct ChainedTable<P> {
    hasher: TileHasher,
    buckets: Vec<Bucket<P>>,
    links: LinkArena<P>,
}

impl<P: Copy> ChainedTable<P> {
    pub(crate) fn new(geometry: MapGeometry, config: &ArenaConfig) -> Self {
        let hasher = TileHasher::new(geometry, config.bucket_count);
        Self {
            buckets: vec![Bucket::Empty; hasher.bucket_count()],
            hasher,
            links: LinkArena::new(config.link_capacity),
        }
    }

    /// First record for `tile` whose payload satisfies `pred`.
    pub(crate) fn find(&self, tile: TileIndex, mut pred: impl FnMut(&P) -> bool) -> Option<&P> {
        match &self.buckets[self.hasher.bucket(tile)] {
            Bucket::Empty => None,
            Bucket::Occupied {
                tile: head,
                payload,
                next,
            } => {
                if *head == tile && pred(payload) {
                    return Some(payload);
                }
                self.links
                    .chain(*next)
                    .find(|(_, link)| link.tile == tile && pred(&link.payload))
                    .map(|(_, link)| &link.payload)
            }
        }
    }

    pub(crate) fn find_mut(
        &mut self,
        tile: TileIndex,
        mut pred: impl FnMut(&P) -> bool,
    ) -> Option<&mut P> {
        let bucket = self.hasher.bucket(tile);
        let mut cursor = match &mut self.buckets[bucket] {
            Bucket::Empty => return None,
            Bucket::Occupied {
                tile: head,
                payload,
                next,
            } => {
                if *head == tile && pred(payload) {
                    return Some(payload);
                }
                *next
            }
        };
        while !cursor.is_end() {
            let link = self.links.get(cursor);
            let next = link.next;
            if link.tile == tile && pred(&link.payload) {
                return Some(&mut self.links.get_mut(cursor).payload);
            }
            cursor = next;
        }
        None
    }

    /// Add a record. The caller has checked that no matching record exists.
    pub(crate) fn insert(&mut self, tile: TileIndex, payload: P) -> Result<(), ArenaError> {
        let bucket = self.hasher.bucket(tile);
        match &mut self.buckets[bucket] {
            slot @ Bucket::Empty => {
                *slot = Bucket::Occupied {
                    tile,
                    payload,
                    next: LinkIndex::END,
                };
            }
            Bucket::Occupied { next, .. } => {
                let index = self.links.alloc(tile, payload)?;
                self.links.get_mut(index).next = *next;
                *next = index;
            }
        }
        Ok(())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (TileIndex, &P)> + '_ {
        self.buckets
            .iter()
            .filter_map(|bucket| match bucket {
                Bucket::Empty => None,
                Bucket::Occupied {
                    tile,
                    payload,
                    next,
                } => Some((*tile, payload, *next)),
            })
            .flat_map(move |(tile, payload, next)| {
                std::iter::once((tile, payload)).chain(
                    self.links
                        .chain(next)
                        .map(|(_, link)| (link.tile, &link.payload)),
                )
            })
    }

    pub(crate) fn links_used(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn link_capacity(&self) -> usize {
        self.links.capacity()
    }

    pub(crate) fn reset(&mut self) {
        self.buckets.fill(Bucket::Empty);
        self.links.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(buckets: usize, links: usize) -> (MapGeometry, ChainedTable<u8>) {
        let geo = MapGeometry::new(6, 6).unwrap();
        let config = ArenaConfig::new(buckets, links);
        (geo, ChainedTable::new(geo, &config))
    }

    #[test]
    fn head_is_inline() {
        let (geo, mut t) = table(16, 4);
        t.insert(geo.tile_xy(1, 1), 7).unwrap();
        assert_eq!(t.links_used(), 0);
        assert_eq!(t.find(geo.tile_xy(1, 1), |_| true), Some(&7));
    }

    #[test]
    fn collisions_spill_into_links() {
        let (geo, mut t) = table(4, 4);
        // 2x2 window: these three share bucket 0.
        let tiles = [geo.tile_xy(0, 0), geo.tile_xy(2, 0), geo.tile_xy(0, 2)];
        for (i, &tile) in tiles.iter().enumerate() {
            t.insert(tile, i as u8).unwrap();
        }
        assert_eq!(t.links_used(), 2);
        for (i, &tile) in tiles.iter().enumerate() {
            assert_eq!(t.find(tile, |_| true), Some(&(i as u8)));
        }
        *t.find_mut(tiles[2], |_| true).unwrap() = 42;
        assert_eq!(t.find(tiles[2], |_| true), Some(&42));
        assert_eq!(t.iter().count(), 3);
    }

    #[test]
    fn predicate_distinguishes_keys_of_one_tile() {
        let (geo, mut t) = table(16, 4);
        let tile = geo.tile_xy(3, 3);
        t.insert(tile, 1).unwrap();
        t.insert(tile, 2).unwrap();
        assert_eq!(t.find(tile, |p| *p == 2), Some(&2));
        assert!(t.find(tile, |p| *p == 3).is_none());
    }

    #[test]
    fn exhaustion_leaves_table_intact() {
        let (geo, mut t) = table(4, 1);
        t.insert(geo.tile_xy(0, 0), 1).unwrap();
        t.insert(geo.tile_xy(2, 0), 2).unwrap();
        assert!(t.insert(geo.tile_xy(0, 2), 3).is_err());
        assert_eq!(t.iter().count(), 2);
        t.reset();
        assert_eq!(t.iter().count(), 0);
        assert_eq!(t.links_used(), 0);
    }
}
