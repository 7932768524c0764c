//! The caller side of a search: what a visit looks like and how the caller
//! steers the search in return.

use trackfind_arena::PresenceSet;
use trackfind_core::{TileIndex, Trackdir};

use crate::metrics::FollowStats;

/// What the enumerator tells the driver after a visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep exploring this branch.
    Continue,
    /// Abandon this branch; other pending branches still run.
    StopBranch,
    /// End the whole search now.
    Halt,
}

/// State carried along one branch and handed to the enumerator by
/// reference.
///
/// A branch point hands a copy to every alternative, so changes made while
/// exploring one alternative never leak into its siblings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchState {
    /// A green signal facing the train was passed on this branch.
    pub saw_green: bool,
    /// Red-signal penalties already charged on this branch.
    pub red_penalties: u8,
    /// Free for the caller.
    pub user: u8,
}

/// One tile/trackdir reached by a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    /// Tile reached.
    pub tile: TileIndex,
    /// Trackdir the vehicle takes across `tile`.
    pub trackdir: Trackdir,
    /// Cumulative cost, including penalties, from the start.
    pub length: u32,
    /// Branch points passed so far on this branch.
    pub depth: u8,
    /// Alternative taken at the first intersection of the search; `None`
    /// before it and in the generic follower.
    pub first_track: Option<Trackdir>,
}

/// Read-only view of a finished generic-follower run.
pub struct FollowContext<'a> {
    pub(crate) presence: &'a PresenceSet,
    pub(crate) stats: &'a FollowStats,
}

impl<'a> FollowContext<'a> {
    /// Presence records of the run. Empty when deduplication was off.
    pub fn presence(&self) -> &'a PresenceSet {
        self.presence
    }

    /// Counters of the run.
    pub fn stats(&self) -> &'a FollowStats {
        self.stats
    }
}

/// Receives every visit of a search and decides how it proceeds.
///
/// Closures of the shape `FnMut(&Visit, &mut BranchState) -> Flow`
/// implement this trait directly.
pub trait Enumerator {
    /// Called once with the start tile, before the walk, in single-tile
    /// mode only.
    fn origin(&mut self, _tile: TileIndex) {}

    /// Called for each visited tile/trackdir.
    fn visit(&mut self, visit: &Visit, state: &mut BranchState) -> Flow;

    /// Called once when a generic-follower run is complete.
    fn after(&mut self, _context: &FollowContext<'_>) {}
}

impl<F> Enumerator for F
where
    F: FnMut(&Visit, &mut BranchState) -> Flow,
{
    fn visit(&mut self, visit: &Visit, state: &mut BranchState) -> Flow {
        self(visit, state)
    }
}
