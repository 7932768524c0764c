//! Fixed-capacity pool of chained link records.
//!
//! A [`LinkArena`] hands out records by index, bump-style. Records are never
//! freed individually; the whole pool is reset at the start of a run. Chains
//! are formed through each record's `next` index, terminated by
//! [`LinkIndex::END`].

use trackfind_core::TileIndex;

use crate::error::ArenaError;

/// Index of a record inside a [`LinkArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkIndex(u16);

impl LinkIndex {
    /// End-of-chain sentinel.
    pub const END: LinkIndex = LinkIndex(u16::MAX);

    /// Whether this is the end-of-chain sentinel.
    pub fn is_end(self) -> bool {
        self == Self::END
    }

    /// Position in the pool.
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// One chained record: a tile, what was recorded for it, and the next link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link<P> {
    /// Tile this record describes.
    pub tile: TileIndex,
    /// Per-tile data recorded by the owning table.
    pub payload: P,
    /// Next record in the same bucket, or [`LinkIndex::END`].
    pub next: LinkIndex,
}

/// Bump-allocated pool of [`Link`] records with a hard capacity.
///
/// The backing `Vec` is reserved at full capacity up front and never grows
/// past it.
#[derive(Debug)]
pub struct LinkArena<P> {
    links: Vec<Link<P>>,
    capacity: usize,
}

impl<P: Copy> LinkArena<P> {
    /// Create an empty pool holding at most `capacity` records.
    ///
    /// `capacity` is clamped below `u16::MAX` so every index is
    /// distinguishable from the sentinel.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(u16::MAX as usize - 1);
        Self {
            links: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Allocate a fresh end-of-chain record.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Exhausted`] once `capacity` records have been
    /// handed out since the last [`reset`](Self::reset).
    pub fn alloc(&mut self, tile: TileIndex, payload: P) -> Result<LinkIndex, ArenaError> {
        if self.links.len() >= self.capacity {
            return Err(ArenaError::Exhausted {
                capacity: self.capacity,
            });
        }
        let index = LinkIndex(self.links.len() as u16);
        self.links.push(Link {
            tile,
            payload,
            next: LinkIndex::END,
        });
        Ok(index)
    }

    /// Record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not returned by [`alloc`](Self::alloc) since the
    /// last reset.
    pub fn get(&self, index: LinkIndex) -> &Link<P> {
        &self.links[index.get()]
    }

    /// Mutable record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not returned by [`alloc`](Self::alloc) since the
    /// last reset.
    pub fn get_mut(&mut self, index: LinkIndex) -> &mut Link<P> {
        &mut self.links[index.get()]
    }

    /// Iterate the chain starting at `head`.
    pub fn chain(&self, head: LinkIndex) -> Chain<'_, P> {
        Chain {
            arena: self,
            cursor: head,
        }
    }

    /// Number of records handed out.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no record has been handed out.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Maximum number of records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records still available.
    pub fn remaining(&self) -> usize {
        self.capacity - self.links.len()
    }

    /// Forget every record, keeping the reserved storage.
    pub fn reset(&mut self) {
        self.links.clear();
    }
}

/// Iterator over `(index, record)` pairs of one chain.
pub struct Chain<'a, P> {
    arena: &'a LinkArena<P>,
    cursor: LinkIndex,
}

impl<'a, P: Copy> Iterator for Chain<'a, P> {
    type Item = (LinkIndex, &'a Link<P>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_end() {
            return None;
        }
        let index = self.cursor;
        let link = self.arena.get(index);
        self.cursor = link.next;
        Some((index, link))
    }
}
