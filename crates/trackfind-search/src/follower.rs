//! Depth-first track walker for any transport kind.
//!
//! The follower visits every tile/trackdir reachable from a start tile and
//! reports each one to an [`Enumerator`]. It keeps no costs and no queue.
//! Pending branches live on a heap stack rather than the call stack, and
//! the walk is bounded by the presence set or by the caps in
//! [`FollowConfig`].

use trackfind_arena::PresenceSet;
use trackfind_core::{
    DiagDirection, TileIndex, TileQuery, TrackBits, Trackdir, TrackdirBits, TransportKind,
};

use crate::callback::{BranchState, Enumerator, Flow, FollowContext, Visit};
use crate::config::{ConfigError, FollowConfig, FollowMode};
use crate::metrics::FollowStats;
use crate::tunnel::TunnelProbe;

/// Walks a track network depth-first from a start tile.
///
/// The presence set is allocated once in [`new`](Self::new) and reset at
/// the start of every [`follow`](Self::follow), so one follower can serve
/// many runs over the same map.
///
/// # Examples
///
/// ```
/// use trackfind_core::{DiagDirection, TileQuery, TransportKind};
/// use trackfind_map::TileMapBuilder;
/// use trackfind_search::{BranchState, Flow, FollowConfig, GenericFollower, Visit};
///
/// let mut builder = TileMapBuilder::new(5, 5).unwrap();
/// builder.rail_line(2, 2, DiagDirection::SouthWest, 6).unwrap();
/// let map = builder.build();
/// let geo = map.geometry();
///
/// let config = FollowConfig::full(TransportKind::Rail).forward_only();
/// let mut follower = GenericFollower::new(&map, config).unwrap();
/// let mut seen = Vec::new();
/// follower.follow(geo.tile_xy(2, 2), DiagDirection::SouthWest, &mut |v: &Visit, _: &mut BranchState| {
///     seen.push(v.length);
///     Flow::Continue
/// });
/// assert_eq!(seen, vec![1, 2, 3, 4, 5]);
/// ```
pub struct GenericFollower<Q> {
    query: Q,
    config: FollowConfig,
    presence: PresenceSet,
}

impl<Q: TileQuery> GenericFollower<Q> {
    /// Create a follower over `query`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] found by [`FollowConfig::validate`].
    pub fn new(query: Q, config: FollowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let presence = PresenceSet::new(query.geometry(), &config.arena);
        Ok(Self {
            query,
            config,
            presence,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    /// Explore from `start` heading `direction`, reporting to `enumerator`.
    ///
    /// `start` itself is not visited (single-tile mode announces it through
    /// [`Enumerator::origin`]). When the walk is done,
    /// [`Enumerator::after`] receives the finished context.
    pub fn follow<E: Enumerator + ?Sized>(
        &mut self,
        start: TileIndex,
        direction: DiagDirection,
        enumerator: &mut E,
    ) -> FollowStats {
        self.presence.reset();
        let mut walk = Walk {
            query: &self.query,
            config: &self.config,
            presence: &mut self.presence,
            enumerator: &mut *enumerator,
            jobs: Vec::new(),
            stats: FollowStats::default(),
        };
        if self.config.mode == FollowMode::SingleTile {
            walk.enumerator.origin(start);
        }
        walk.run(start, direction);
        let mut stats = walk.stats;
        stats.links_used = self.presence.links_used();
        stats.link_exhaustions = self.presence.exhaustions();
        log::debug!(
            "[tpf] follow from {start} done: {} tiles, {} callbacks",
            stats.tiles_stepped,
            stats.callbacks
        );
        enumerator.after(&FollowContext {
            presence: &self.presence,
            stats: &stats,
        });
        stats
    }
}

/// Per-branch bookkeeping, copied into every child.
#[derive(Clone, Copy, Debug, Default)]
struct Remember {
    length: u32,
    depth: u8,
    /// Track index chosen at the previous branch point (single-tile mode).
    last_track: Option<u8>,
    state: BranchState,
}

/// Pending work, popped in the order a depth-first recursion would run it.
enum Job {
    /// Leave `tile` heading `dir`.
    Step {
        tile: TileIndex,
        dir: DiagDirection,
        rd: Remember,
    },
    /// Enter `tile` moving `dir`, on each of `tracks` in index order.
    Enter {
        tile: TileIndex,
        dir: DiagDirection,
        tracks: TrackBits,
        branch: bool,
        rd: Remember,
    },
}

struct Walk<'r, Q, E: ?Sized> {
    query: &'r Q,
    config: &'r FollowConfig,
    presence: &'r mut PresenceSet,
    enumerator: &'r mut E,
    jobs: Vec<Job>,
    stats: FollowStats,
}

impl<Q: TileQuery, E: Enumerator + ?Sized> Walk<'_, Q, E> {
    fn run(&mut self, start: TileIndex, dir: DiagDirection) {
        self.jobs.push(Job::Step {
            tile: start,
            dir,
            rd: Remember::default(),
        });
        while let Some(job) = self.jobs.pop() {
            if self.stats.halted {
                break;
            }
            match job {
                Job::Step { tile, dir, rd } => match self.config.mode {
                    FollowMode::Full => self.full(tile, dir, rd),
                    FollowMode::SingleTile => self.single_tile(tile, dir, rd),
                },
                Job::Enter {
                    tile,
                    dir,
                    tracks,
                    branch,
                    rd,
                } => self.enter(tile, dir, tracks, branch, rd),
            }
        }
        self.jobs.clear();
    }

    fn push_enter(
        &mut self,
        tile: TileIndex,
        dir: DiagDirection,
        tracks: TrackBits,
        branch: bool,
        rd: Remember,
    ) {
        if !tracks.is_empty() {
            self.jobs.push(Job::Enter {
                tile,
                dir,
                tracks,
                branch,
                rd,
            });
        }
    }

    fn full(&mut self, origin: TileIndex, dir: DiagDirection, mut rd: Remember) {
        let transport = self.config.transport;
        let mut tile = origin;

        let portal = self.query.tunnel_bridge_meta(tile).and_then(|m| m.portal());
        if let Some((_, inward, carries)) = portal {
            if inward == dir && carries == transport {
                let Some((exit, length)) = self.skip_structure(tile, dir) else {
                    return;
                };
                rd.length += length;
                tile = exit;
            } else if inward != dir.reverse() || carries != transport {
                return;
            }
        }

        let next = self.query.geometry().step(tile, dir);
        if self.owner_blocks(tile, next) {
            self.stats.ownership_stops += 1;
            return;
        }
        rd.length += 1;
        self.stats.tiles_stepped += 1;

        let status = self.query.track_status(next, transport);
        let bits = (status & TrackdirBits::entering(dir)).tracks();
        let forward = !bits.is_empty() && self.within_caps(bits, &mut rd);

        // Turning around on the origin runs after the whole forward walk, so
        // it sits below it on the stack. Taking every track there covers a
        // whole signal block even where two lines merge.
        if self.config.bidirectional {
            let back = dir.reverse();
            let tracks = self.query.track_status(origin, transport).tracks();
            self.push_enter(origin, back, tracks & TrackBits::enterable(back), false, rd);
        }
        if forward {
            self.push_enter(next, dir, bits, false, rd);
        }
    }

    /// Enter `tile` on the first of `tracks`, leaving the rest queued.
    fn enter(
        &mut self,
        tile: TileIndex,
        dir: DiagDirection,
        tracks: TrackBits,
        branch: bool,
        rd: Remember,
    ) {
        let Some(track) = tracks.first() else {
            return;
        };
        let mut child = rd;
        if branch && rd.last_track != Some(track.index()) {
            child.depth = child.depth.saturating_add(1);
            if self.config.max_branch_depth.is_some_and(|max| child.depth > max) {
                // Drops the remaining siblings too.
                self.stats.depth_cap_stops += 1;
                return;
            }
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(child.depth);
            child.last_track = Some(track.index());
        }
        self.push_enter(tile, dir, tracks.without(track), branch, rd);

        let Some(td) = track.trackdir_entering(dir) else {
            return;
        };
        let deduplicating = self.config.dedup && self.config.mode == FollowMode::Full;
        if deduplicating && !self.presence.mark_trackdir(tile, td) {
            return;
        }
        if self.visit(tile, td, &mut child) == Flow::Continue {
            self.jobs.push(Job::Step {
                tile,
                dir: td.exit_direction(),
                rd: child,
            });
        }
    }

    /// Length and branch-point caps for a tile offering `bits`.
    fn within_caps(&mut self, bits: TrackBits, rd: &mut Remember) -> bool {
        if self.config.max_length.is_some_and(|max| rd.length > max) {
            self.stats.length_cap_stops += 1;
            return false;
        }
        if bits.has_several() {
            self.stats.branch_points += 1;
            rd.depth = rd.depth.saturating_add(1);
            if self.config.max_branch_depth.is_some_and(|max| rd.depth > max) {
                log::debug!("[tpf] branch depth {} exceeded", rd.depth);
                self.stats.depth_cap_stops += 1;
                return false;
            }
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(rd.depth);
        }
        true
    }

    fn single_tile(&mut self, tile: TileIndex, dir: DiagDirection, mut rd: Remember) {
        let transport = self.config.transport;
        let owner = if self.rail_owned(tile) {
            self.query.owner(tile)
        } else {
            None
        };
        let next = self.query.geometry().step(tile, dir);
        if owner.is_some() && self.rail_owned(next) && self.query.owner(next) != owner {
            self.stats.ownership_stops += 1;
            return;
        }

        rd.length += 1;
        self.stats.tiles_stepped += 1;
        if self.config.max_length.is_some_and(|max| rd.length > max) {
            self.stats.length_cap_stops += 1;
            return;
        }

        let bits = self.query.track_status(next, transport).tracks() & TrackBits::enterable(dir);
        let branch = bits.has_several();
        if branch {
            self.stats.branch_points += 1;
        }
        self.push_enter(next, dir, bits, branch, rd);
    }

    fn visit(&mut self, tile: TileIndex, td: Trackdir, rd: &mut Remember) -> Flow {
        self.stats.callbacks += 1;
        let visit = Visit {
            tile,
            trackdir: td,
            length: rd.length,
            depth: rd.depth,
            first_track: None,
        };
        let flow = self.enumerator.visit(&visit, &mut rd.state);
        if flow == Flow::Halt {
            self.stats.halted = true;
        }
        flow
    }

    /// Jump from an entry portal to its exit, marking both ends.
    fn skip_structure(&mut self, entry: TileIndex, dir: DiagDirection) -> Option<(TileIndex, u32)> {
        if self.config.dedup {
            self.presence.mark_tunnel(entry);
        }
        match TunnelProbe::new(self.query).probe(entry, dir) {
            Ok(found) => {
                if self.config.dedup {
                    self.presence.mark_tunnel(found.exit_tile);
                }
                self.stats.tiles_stepped += 1;
                self.stats.tunnels_skipped += 1;
                Some((found.exit_tile, found.length))
            }
            Err(e) => {
                log::error!("[tpf] {e}");
                debug_assert!(false, "tunnel probe failed: {e}");
                None
            }
        }
    }

    /// Rail infrastructure with an owner; bridge middles have none.
    fn rail_owned(&self, tile: TileIndex) -> bool {
        self.config.transport == TransportKind::Rail
            && self.query.tile_kind(tile).is_rail_infrastructure()
            && !self
                .query
                .tunnel_bridge_meta(tile)
                .is_some_and(|m| m.is_bridge_middle())
    }

    fn owner_blocks(&self, from: TileIndex, to: TileIndex) -> bool {
        self.rail_owned(from)
            && self.rail_owned(to)
            && self.query.owner(from) != self.query.owner(to)
    }
}
