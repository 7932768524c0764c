//! Cost-ordered rail search with signal and slope penalties.
//!
//! A branch is followed iteratively for as long as each tile offers a single
//! track. At an intersection every alternative is queued on the
//! [`Frontier`]; the cheapest queued alternative is resumed next, after
//! checking that no shorter path to the intersection turned up meanwhile.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use trackfind_arena::VisitedSet;
use trackfind_core::{
    DiagDirection, SignalState, TileIndex, TileKind, TileQuery, TrackBits, Trackdir,
    TrackdirBits, TransportKind,
};

use crate::callback::{BranchState, Enumerator, Flow, Visit};
use crate::config::{ConfigError, SearchConfig};
use crate::frontier::{Frontier, PushOutcome, StackedItem};
use crate::metrics::SearchStats;
use crate::tunnel::TunnelProbe;

/// Rail pathfinder ordering branches by cumulative cost.
///
/// The enumerator is called:
/// - on every tile carrying signals, after the signal rules are applied;
/// - on every tile that is not plain railway (stations, depots, portals),
///   when it offers a single onward track;
/// - on resuming a queued alternative, with the intersection tile.
///
/// Returning [`Flow::StopBranch`] abandons the branch; the search then
/// resumes the cheapest queued alternative. The search ends when nothing is
/// queued or the enumerator returns [`Flow::Halt`].
///
/// The visited set and frontier are allocated once in [`new`](Self::new)
/// and reset by each search.
pub struct TrainSearch<Q> {
    query: Q,
    config: SearchConfig,
    visited: VisitedSet,
    frontier: Frontier,
}

impl<Q: TileQuery> TrainSearch<Q> {
    /// Create a search over `query`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] found by [`SearchConfig::validate`].
    pub fn new(query: Q, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let visited = VisitedSet::new(query.geometry(), &config.arena);
        let frontier = Frontier::new(config.frontier_capacity);
        Ok(Self {
            query,
            config,
            visited,
            frontier,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search from `start` heading `direction`, breaking the first
    /// intersection's ties with an RNG seeded from
    /// [`SearchConfig::seed`].
    pub fn search<E: Enumerator + ?Sized>(
        &mut self,
        start: TileIndex,
        direction: DiagDirection,
        enumerator: &mut E,
    ) -> SearchStats {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.search_with_rng(start, direction, enumerator, &mut rng)
    }

    /// Search from `start` heading `direction`, drawing tie-breaks from
    /// `rng`.
    pub fn search_with_rng<E, R>(
        &mut self,
        start: TileIndex,
        direction: DiagDirection,
        enumerator: &mut E,
        rng: &mut R,
    ) -> SearchStats
    where
        E: Enumerator + ?Sized,
        R: Rng + ?Sized,
    {
        self.visited.reset();
        self.frontier.clear();
        let mut run = Run {
            query: &self.query,
            config: &self.config,
            visited: &mut self.visited,
            frontier: &mut self.frontier,
            enumerator,
            rng,
            stats: SearchStats::default(),
        };
        run.execute(Cursor {
            tile: start,
            dir: direction,
            length: 0,
            depth: 0,
            state: BranchState::default(),
            first_track: None,
        });
        let mut stats = run.stats;
        stats.links_used = self.visited.links_used();
        stats.link_exhaustions = self.visited.exhaustions();
        stats.frontier_high_water = self.frontier.high_water();
        stats.frontier_overflows = self.frontier.overflows();
        log::debug!(
            "[ntp] search from {start} done: {} tiles, {} intersections, {} stale",
            stats.tiles_stepped,
            stats.intersections,
            stats.stale_pops
        );
        stats
    }
}

/// Position and bookkeeping of the branch being followed.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    tile: TileIndex,
    dir: DiagDirection,
    length: u32,
    depth: u8,
    state: BranchState,
    first_track: Option<Trackdir>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BranchEnd {
    /// Resume from the frontier.
    Done,
    /// End the search.
    Halt,
}

struct Run<'r, Q, E: ?Sized, R: ?Sized> {
    query: &'r Q,
    config: &'r SearchConfig,
    visited: &'r mut VisitedSet,
    frontier: &'r mut Frontier,
    enumerator: &'r mut E,
    rng: &'r mut R,
    stats: SearchStats,
}

impl<Q, E, R> Run<'_, Q, E, R>
where
    Q: TileQuery,
    E: Enumerator + ?Sized,
    R: Rng + ?Sized,
{
    fn execute(&mut self, mut cur: Cursor) {
        loop {
            if self.branch(&mut cur) == BranchEnd::Halt {
                self.stats.halted = true;
                return;
            }
            match self.resume() {
                Some(next) => cur = next,
                None => return,
            }
        }
    }

    /// Pop until an alternative is still the best way through its
    /// intersection and the enumerator agrees to take it.
    fn resume(&mut self) -> Option<Cursor> {
        while let Some(item) = self.frontier.pop() {
            if !self
                .visited
                .confirm(item.tile, item.track.entry_direction(), item.length)
            {
                self.stats.stale_pops += 1;
                continue;
            }
            let mut state = item.state;
            let visit = Visit {
                tile: item.tile,
                trackdir: item.track,
                length: item.length,
                depth: item.depth,
                first_track: item.first_track,
            };
            match self.call(&visit, &mut state) {
                Flow::Continue => {
                    self.stats.branches_resumed += 1;
                    return Some(Cursor {
                        tile: item.tile,
                        dir: item.track.exit_direction(),
                        length: item.length,
                        depth: item.depth,
                        state,
                        first_track: item.first_track,
                    });
                }
                Flow::StopBranch => continue,
                Flow::Halt => {
                    self.stats.halted = true;
                    return None;
                }
            }
        }
        None
    }

    /// Follow one branch until it ends or reaches an intersection.
    fn branch(&mut self, cur: &mut Cursor) -> BranchEnd {
        let geo = self.query.geometry();
        loop {
            if !self.cross_structure(cur) {
                return BranchEnd::Done;
            }
            let origin = cur.tile;

            let bits = loop {
                cur.tile = geo.step(cur.tile, cur.dir);
                cur.length += 1;
                self.stats.tiles_stepped += 1;
                if cur.length >= self.config.max_length {
                    log::debug!("[ntp] length {} reached at {}", cur.length, cur.tile);
                    self.stats.length_cap_stops += 1;
                    return BranchEnd::Done;
                }

                let reachable = self.reachable(cur.tile, cur.dir);
                if reachable.is_empty() {
                    return BranchEnd::Done;
                }
                if self.query.tile_kind(cur.tile) != TileKind::Railway || reachable.has_several() {
                    break reachable;
                }

                let Some(td) = reachable.first().and_then(|t| t.trackdir_entering(cur.dir)) else {
                    return BranchEnd::Done;
                };
                if self.query.slope(cur.tile).is_uphill(td) {
                    cur.length += self.config.slope_penalty;
                }
                if let Some(signals) = self.query.signal_state(cur.tile) {
                    if !self.pass_signal(&signals, td, cur) {
                        self.stats.signal_stops += 1;
                        return BranchEnd::Done;
                    }
                    match self.visit_at(cur, td) {
                        Flow::Continue => {}
                        Flow::StopBranch => return BranchEnd::Done,
                        Flow::Halt => return BranchEnd::Halt,
                    }
                }
                cur.dir = td.exit_direction();
                if cur.tile == origin {
                    return BranchEnd::Done;
                }
            };

            if !bits.has_several() {
                let Some(td) = bits.first().and_then(|t| t.trackdir_entering(cur.dir)) else {
                    return BranchEnd::Done;
                };
                match self.visit_at(cur, td) {
                    Flow::Continue => {}
                    Flow::StopBranch => return BranchEnd::Done,
                    Flow::Halt => return BranchEnd::Halt,
                }
                cur.dir = td.exit_direction();
                continue;
            }

            if cur.depth >= self.config.max_branch_depth {
                log::debug!("[ntp] branch depth {} reached at {}", cur.depth, cur.tile);
                self.stats.depth_cap_stops += 1;
                return BranchEnd::Done;
            }
            cur.depth += 1;
            self.stats.intersections += 1;
            if self.visited.try_mark(cur.tile, cur.dir, cur.length) {
                self.enqueue(cur, bits);
            }
            return BranchEnd::Done;
        }
    }

    /// Handle a tunnel or bridge portal under the cursor.
    ///
    /// Returns `false` if the branch cannot continue from here.
    fn cross_structure(&mut self, cur: &mut Cursor) -> bool {
        let Some((_, inward, carries)) = self
            .query
            .tunnel_bridge_meta(cur.tile)
            .and_then(|m| m.portal())
        else {
            return true;
        };
        if inward == cur.dir.reverse() {
            return true;
        }
        if inward != cur.dir || carries != TransportKind::Rail {
            return false;
        }
        match TunnelProbe::new(self.query).probe(cur.tile, cur.dir) {
            Ok(found) => {
                cur.length += found.length;
                cur.tile = found.exit_tile;
                self.stats.tiles_stepped += 1;
                self.stats.tunnels_skipped += 1;
                true
            }
            Err(e) => {
                log::error!("[ntp] {e}");
                debug_assert!(false, "tunnel probe failed: {e}");
                false
            }
        }
    }

    /// Apply the signal rules for travelling `td`. Returns `false` if the
    /// branch must stop.
    fn pass_signal(&self, signals: &SignalState, td: Trackdir, cur: &mut Cursor) -> bool {
        if !signals.along(td) {
            // A one-way signal facing the other way cannot be passed.
            return !signals.against(td);
        }
        if signals.green_along(td) {
            cur.state.saw_green = true;
            return true;
        }
        // Red. A two-way red ahead of any green usually guards an occupied
        // platform.
        if signals.against(td) && !cur.state.saw_green {
            return false;
        }
        if cur.state.red_penalties < self.config.max_red_penalties {
            cur.length += self.config.red_signal_penalty;
            cur.state.red_penalties += 1;
        }
        true
    }

    fn enqueue(&mut self, cur: &Cursor, bits: TrackBits) {
        let mut alternatives: SmallVec<[Trackdir; 3]> = bits
            .iter()
            .filter_map(|t| t.trackdir_entering(cur.dir))
            .collect();
        let first_intersection = cur.depth == 1;
        if first_intersection {
            alternatives.shuffle(&mut *self.rng);
        }
        for track in alternatives {
            let item = StackedItem {
                tile: cur.tile,
                length: cur.length,
                track,
                depth: cur.depth,
                state: cur.state,
                first_track: if first_intersection {
                    Some(track)
                } else {
                    cur.first_track
                },
            };
            self.stats.frontier_pushes += 1;
            match self.frontier.push(item) {
                PushOutcome::Queued => {}
                PushOutcome::Evicted(lost) => {
                    log::debug!("[ntp] frontier full, evicted {} at {}", lost.track, lost.tile);
                }
                PushOutcome::Dropped => {
                    log::debug!("[ntp] frontier full, dropped {track} at {}", cur.tile);
                }
            }
        }
    }

    fn reachable(&self, tile: TileIndex, dir: DiagDirection) -> TrackBits {
        (self.query.track_status(tile, TransportKind::Rail) & TrackdirBits::entering(dir)).tracks()
    }

    fn visit_at(&mut self, cur: &mut Cursor, td: Trackdir) -> Flow {
        let visit = Visit {
            tile: cur.tile,
            trackdir: td,
            length: cur.length,
            depth: cur.depth,
            first_track: cur.first_track,
        };
        self.call(&visit, &mut cur.state)
    }

    fn call(&mut self, visit: &Visit, state: &mut BranchState) -> Flow {
        self.stats.callbacks += 1;
        self.enumerator.visit(visit, state)
    }
}
