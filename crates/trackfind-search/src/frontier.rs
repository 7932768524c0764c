//! Fixed-capacity binary min-heap of pending branches.

use trackfind_core::{TileIndex, Trackdir};

use crate::callback::BranchState;

/// A branch waiting at an intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackedItem {
    /// Intersection tile.
    pub tile: TileIndex,
    /// Cumulative cost on reaching the intersection.
    pub length: u32,
    /// Alternative to take across the intersection.
    pub track: Trackdir,
    /// Branch depth including this intersection.
    pub depth: u8,
    /// Branch state on reaching the intersection.
    pub state: BranchState,
    /// Alternative taken at the first intersection of the search.
    pub first_track: Option<Trackdir>,
}

/// Result of [`Frontier::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// Stored; nothing was lost.
    Queued,
    /// Stored by evicting the given, more expensive item.
    Evicted(StackedItem),
    /// Not stored: the frontier was full of items no more expensive.
    Dropped,
}

/// Min-heap on [`StackedItem::length`] that never grows past its capacity.
///
/// On overflow the most expensive item (the new one included) is lost.
/// Equal lengths keep insertion order only as far as the heap shape allows.
#[derive(Debug)]
pub struct Frontier {
    items: Vec<StackedItem>,
    capacity: usize,
    high_water: usize,
    overflows: u64,
}

impl Frontier {
    /// Empty frontier holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            high_water: 0,
            overflows: 0,
        }
    }

    /// Queue `item`, evicting the most expensive item if full.
    pub fn push(&mut self, item: StackedItem) -> PushOutcome {
        if self.items.len() < self.capacity {
            self.items.push(item);
            self.sift_up(self.items.len() - 1);
            self.high_water = self.high_water.max(self.items.len());
            return PushOutcome::Queued;
        }
        self.overflows += 1;
        // The maximum of a min-heap is one of its leaves.
        let first_leaf = self.items.len() / 2;
        let worst = (first_leaf..self.items.len()).max_by_key(|&i| self.items[i].length);
        match worst {
            Some(i) if self.items[i].length > item.length => {
                let evicted = std::mem::replace(&mut self.items[i], item);
                self.sift_up(i);
                PushOutcome::Evicted(evicted)
            }
            _ => PushOutcome::Dropped,
        }
    }

    /// Remove and return the cheapest item.
    pub fn pop(&mut self) -> Option<StackedItem> {
        if self.items.is_empty() {
            return None;
        }
        let top = self.items.swap_remove(0);
        self.sift_down(0);
        Some(top)
    }

    /// Cheapest item without removing it.
    pub fn peek(&self) -> Option<&StackedItem> {
        self.items.first()
    }

    /// Items currently queued.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most items held at once since the last clear.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Pushes that found the frontier full since the last clear.
    pub fn overflows(&self) -> u64 {
        self.overflows
    }

    /// Drop every item and reset the counters.
    pub fn clear(&mut self) {
        self.items.clear();
        self.high_water = 0;
        self.overflows = 0;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.items[i].length >= self.items[parent].length {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.items.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.items[right].length < self.items[left].length {
                right
            } else {
                left
            };
            if self.items[i].length <= self.items[child].length {
                break;
            }
            self.items.swap(i, child);
            i = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(length: u32) -> StackedItem {
        StackedItem {
            tile: TileIndex(length),
            length,
            track: Trackdir::X_NE,
            depth: 1,
            state: BranchState::default(),
            first_track: None,
        }
    }

    #[test]
    fn pops_in_length_order() {
        let mut f = Frontier::new(8);
        for len in [7, 3, 9, 1, 4] {
            assert_eq!(f.push(item(len)), PushOutcome::Queued);
        }
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).map(|i| i.length).collect();
        assert_eq!(order, vec![1, 3, 4, 7, 9]);
        assert_eq!(f.high_water(), 5);
    }

    #[test]
    fn overflow_evicts_most_expensive() {
        let mut f = Frontier::new(3);
        f.push(item(5));
        f.push(item(8));
        f.push(item(6));
        assert_eq!(f.push(item(2)), PushOutcome::Evicted(item(8)));
        assert_eq!(f.push(item(10)), PushOutcome::Dropped);
        assert_eq!(f.overflows(), 2);
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).map(|i| i.length).collect();
        assert_eq!(order, vec![2, 5, 6]);
    }

    #[test]
    fn equal_length_overflow_is_dropped() {
        let mut f = Frontier::new(1);
        f.push(item(4));
        assert_eq!(f.push(item(4)), PushOutcome::Dropped);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn clear_resets_counters() {
        let mut f = Frontier::new(1);
        f.push(item(1));
        f.push(item(2));
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.high_water(), 0);
        assert_eq!(f.overflows(), 0);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Push(u32),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![(0u32..100).prop_map(Op::Push), Just(Op::Pop)]
    }

    proptest! {
        #[test]
        fn pop_order_is_non_decreasing_between_pushes(ops in proptest::collection::vec(op(), 1..200)) {
            let mut f = Frontier::new(64);
            let mut last: Option<u32> = None;
            for op in ops {
                match op {
                    Op::Push(len) => {
                        f.push(item(len));
                        last = None;
                    }
                    Op::Pop => {
                        if let Some(popped) = f.pop() {
                            if let Some(prev) = last {
                                prop_assert!(popped.length >= prev);
                            }
                            last = Some(popped.length);
                        }
                    }
                }
                prop_assert!(f.len() <= f.capacity());
            }
        }

        #[test]
        fn popped_minimum_matches_model(lengths in proptest::collection::vec(0u32..1000, 1..100)) {
            let mut f = Frontier::new(lengths.len());
            for &len in &lengths {
                f.push(item(len));
            }
            let mut sorted = lengths.clone();
            sorted.sort_unstable();
            let popped: Vec<_> = std::iter::from_fn(|| f.pop()).map(|i| i.length).collect();
            prop_assert_eq!(popped, sorted);
        }
    }
}
