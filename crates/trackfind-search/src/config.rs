//! Search configuration, validation, and error types.
//!
//! [`FollowConfig`] drives the [`GenericFollower`](crate::GenericFollower);
//! [`SearchConfig`] drives the [`TrainSearch`](crate::TrainSearch). Both
//! embed an [`ArenaConfig`] sizing their visited tables and are checked by
//! `validate()` when a driver is constructed.

use std::error::Error;
use std::fmt;

use trackfind_arena::{ArenaConfig, ArenaError};
use trackfind_core::TransportKind;

// ── FollowMode ─────────────────────────────────────────────────────

/// Walking strategy of the generic follower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowMode {
    /// Step tile by tile without remembering visited tiles, counting
    /// direction changes at branch points. Used for ships.
    SingleTile,
    /// Explore every reachable track, optionally deduplicated through a
    /// presence set and optionally reversing at every tile.
    Full,
}

// ── FollowConfig ───────────────────────────────────────────────────

/// Configuration for one [`GenericFollower`](crate::GenericFollower).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowConfig {
    /// Network to follow.
    pub transport: TransportKind,
    /// Walking strategy.
    pub mode: FollowMode,
    /// Skip trackdirs already entered during this run.
    pub dedup: bool,
    /// After exploring forward from a tile, also explore every track of that
    /// tile in the reversed direction. Needed to cover a whole signal block
    /// when two lines merge.
    pub bidirectional: bool,
    /// Stop a branch once its length exceeds this many tiles.
    pub max_length: Option<u32>,
    /// Stop a branch after this many branch points (full mode) or direction
    /// changes (single-tile mode).
    pub max_branch_depth: Option<u8>,
    /// Presence-set sizing.
    pub arena: ArenaConfig,
}

impl FollowConfig {
    /// Length cap of single-tile mode.
    pub const SINGLE_TILE_MAX_LENGTH: u32 = 50;
    /// Direction-change cap of single-tile mode.
    pub const SINGLE_TILE_MAX_TURNS: u8 = 4;
    /// Length cap of full mode without deduplication.
    pub const UNDEDUPED_MAX_LENGTH: u32 = 64;
    /// Branch-point cap of full mode without deduplication.
    pub const UNDEDUPED_MAX_BRANCHES: u8 = 7;

    /// Single-tile mode with its fixed caps. No deduplication.
    pub fn single_tile(transport: TransportKind) -> Self {
        Self {
            transport,
            mode: FollowMode::SingleTile,
            dedup: false,
            bidirectional: false,
            max_length: Some(Self::SINGLE_TILE_MAX_LENGTH),
            max_branch_depth: Some(Self::SINGLE_TILE_MAX_TURNS),
            arena: ArenaConfig::default(),
        }
    }

    /// Full mode with deduplication and reverse exploration, uncapped.
    pub fn full(transport: TransportKind) -> Self {
        Self {
            transport,
            mode: FollowMode::Full,
            dedup: true,
            bidirectional: true,
            max_length: None,
            max_branch_depth: None,
            arena: ArenaConfig::default(),
        }
    }

    /// Full mode without deduplication, forward only, with length and
    /// branch-point caps standing in for the presence set.
    pub fn full_without_dedup(transport: TransportKind) -> Self {
        Self {
            dedup: false,
            bidirectional: false,
            max_length: Some(Self::UNDEDUPED_MAX_LENGTH),
            max_branch_depth: Some(Self::UNDEDUPED_MAX_BRANCHES),
            ..Self::full(transport)
        }
    }

    /// Same configuration, exploring forward only.
    pub fn forward_only(mut self) -> Self {
        self.bidirectional = false;
        self
    }

    /// Check structural invariants.
    ///
    /// A run without deduplication must be capped in both length and
    /// branch depth, otherwise a loop in the network never terminates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        if self.max_length == Some(0) {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.max_branch_depth == Some(0) {
            return Err(ConfigError::ZeroBranchDepth);
        }
        let deduplicating = self.dedup && self.mode == FollowMode::Full;
        if !deduplicating && (self.max_length.is_none() || self.max_branch_depth.is_none()) {
            return Err(ConfigError::Unbounded);
        }
        Ok(())
    }
}

// ── SearchConfig ───────────────────────────────────────────────────

/// Configuration for one [`TrainSearch`](crate::TrainSearch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// A branch stops when its length reaches this value. Default: 512.
    pub max_length: u32,
    /// Intersections a single branch may pass. Default: 16.
    pub max_branch_depth: u8,
    /// Pending branches held at once. Default: 256.
    pub frontier_capacity: usize,
    /// Visited-table sizing.
    pub arena: ArenaConfig,
    /// Seed for tie-breaking at the first intersection. Default: 0.
    pub seed: u64,
    /// Added when a straight track climbs a slope. Default: 2.
    pub slope_penalty: u32,
    /// Added when passing a red signal. Default: 10.
    pub red_signal_penalty: u32,
    /// Red-signal penalties charged per branch at most. Default: 2.
    pub max_red_penalties: u8,
}

impl SearchConfig {
    /// Default branch length cap.
    pub const DEFAULT_MAX_LENGTH: u32 = 512;
    /// Default intersection cap.
    pub const DEFAULT_MAX_BRANCH_DEPTH: u8 = 16;
    /// Default frontier capacity.
    pub const DEFAULT_FRONTIER_CAPACITY: usize = 256;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.max_branch_depth == 0 {
            return Err(ConfigError::ZeroBranchDepth);
        }
        if self.frontier_capacity == 0 {
            return Err(ConfigError::ZeroFrontierCapacity);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            max_branch_depth: Self::DEFAULT_MAX_BRANCH_DEPTH,
            frontier_capacity: Self::DEFAULT_FRONTIER_CAPACITY,
            arena: ArenaConfig::default(),
            seed: 0,
            slope_penalty: 2,
            red_signal_penalty: 10,
            max_red_penalties: 2,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`FollowConfig::validate`] and
/// [`SearchConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Arena sizing is invalid.
    Arena(ArenaError),
    /// A length cap of zero would stop before the first step.
    ZeroMaxLength,
    /// A branch-depth cap of zero would refuse every intersection.
    ZeroBranchDepth,
    /// The frontier must hold at least one item.
    ZeroFrontierCapacity,
    /// Deduplication is off and the run is not capped in both length and
    /// branch depth.
    Unbounded,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::ZeroMaxLength => write!(f, "max_length must be at least 1"),
            Self::ZeroBranchDepth => write!(f, "max_branch_depth must be at least 1"),
            Self::ZeroFrontierCapacity => write!(f, "frontier_capacity must be at least 1"),
            Self::Unbounded => write!(
                f,
                "a run without deduplication needs both max_length and max_branch_depth"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for transport in TransportKind::ALL {
            assert!(FollowConfig::single_tile(transport).validate().is_ok());
            assert!(FollowConfig::full(transport).validate().is_ok());
            let capped = FollowConfig::full_without_dedup(transport);
            assert!(capped.validate().is_ok());
        }
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn search_defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.max_length, 512);
        assert_eq!(c.max_branch_depth, 16);
        assert_eq!(c.frontier_capacity, 256);
        assert_eq!(c.slope_penalty, 2);
        assert_eq!(c.red_signal_penalty, 10);
        assert_eq!(c.max_red_penalties, 2);
    }

    #[test]
    fn uncapped_run_without_dedup_rejected() {
        let mut c = FollowConfig::full(TransportKind::Rail);
        c.dedup = false;
        assert_eq!(c.validate(), Err(ConfigError::Unbounded));

        let mut c = FollowConfig::single_tile(TransportKind::Water);
        c.max_branch_depth = None;
        assert_eq!(c.validate(), Err(ConfigError::Unbounded));
    }

    #[test]
    fn zero_caps_rejected() {
        let c = SearchConfig {
            frontier_capacity: 0,
            ..SearchConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroFrontierCapacity));
        let c = SearchConfig {
            max_length: 0,
            ..SearchConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroMaxLength));
        let mut f = FollowConfig::full(TransportKind::Rail);
        f.max_branch_depth = Some(0);
        assert_eq!(f.validate(), Err(ConfigError::ZeroBranchDepth));
    }

    #[test]
    fn arena_error_wrapped() {
        let c = SearchConfig {
            arena: ArenaConfig::new(3, 10),
            ..SearchConfig::default()
        };
        let err = c.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Arena(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn forward_only_clears_reverse_flag() {
        let c = FollowConfig::full(TransportKind::Rail).forward_only();
        assert!(!c.bidirectional);
        assert!(c.dedup);
    }
}
