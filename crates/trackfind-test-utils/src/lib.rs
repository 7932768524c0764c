//! Test utilities for trackfind development.
//!
//! Provides recording [`Enumerator`] implementations and, in [`fixtures`],
//! small hand-built maps with known shortest paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use trackfind_core::{TileIndex, TileKind, TileQuery, Trackdir};
use trackfind_search::{BranchState, Enumerator, Flow, FollowContext, Visit};

/// Records every visit and answers [`Flow::Continue`].
///
/// Set [`halt_after`](Recorder::halt_after) to end the search after a
/// number of callbacks.
#[derive(Debug, Default)]
pub struct Recorder {
    pub visits: Vec<Visit>,
    pub origins: Vec<TileIndex>,
    pub presence_tiles: Option<usize>,
    pub halt_after: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lengths recorded at `tile`, in visit order.
    pub fn lengths_at(&self, tile: TileIndex) -> Vec<u32> {
        self.visits
            .iter()
            .filter(|v| v.tile == tile)
            .map(|v| v.length)
            .collect()
    }

    /// Whether `tile` was visited heading `td`.
    pub fn saw(&self, tile: TileIndex, td: Trackdir) -> bool {
        self.visits.iter().any(|v| v.tile == tile && v.trackdir == td)
    }
}

impl Enumerator for Recorder {
    fn origin(&mut self, tile: TileIndex) {
        self.origins.push(tile);
    }

    fn visit(&mut self, visit: &Visit, _state: &mut BranchState) -> Flow {
        self.visits.push(*visit);
        match self.halt_after {
            Some(n) if self.visits.len() >= n => Flow::Halt,
            _ => Flow::Continue,
        }
    }

    fn after(&mut self, ctx: &FollowContext<'_>) {
        self.presence_tiles = Some(ctx.presence().iter().count());
    }
}

/// Records visits and stops each branch on reaching a station.
///
/// The cheapest station arrival is kept in [`best`](StationFinder::best).
pub struct StationFinder<'m, Q> {
    map: &'m Q,
    pub visits: Vec<Visit>,
    pub best: Option<Visit>,
}

impl<'m, Q: TileQuery> StationFinder<'m, Q> {
    pub fn new(map: &'m Q) -> Self {
        Self {
            map,
            visits: Vec::new(),
            best: None,
        }
    }

    /// Every station arrival, in visit order.
    pub fn arrivals(&self) -> impl Iterator<Item = &Visit> {
        self.visits
            .iter()
            .filter(|v| self.map.tile_kind(v.tile) == TileKind::Station)
    }
}

impl<Q: TileQuery> Enumerator for StationFinder<'_, Q> {
    fn visit(&mut self, visit: &Visit, _state: &mut BranchState) -> Flow {
        self.visits.push(*visit);
        if self.map.tile_kind(visit.tile) != TileKind::Station {
            return Flow::Continue;
        }
        if self.best.is_none_or(|b| visit.length < b.length) {
            self.best = Some(*visit);
        }
        Flow::StopBranch
    }
}
