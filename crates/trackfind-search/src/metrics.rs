//! Per-run counters for the search drivers.
//!
//! Resource exhaustion never fails a run; these counters are where it shows
//! up instead.

/// Counters collected during one [`GenericFollower`](crate::GenericFollower)
/// run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FollowStats {
    /// Tiles stepped onto, including tunnel exits.
    pub tiles_stepped: u64,
    /// Enumerator visits.
    pub callbacks: u64,
    /// Tiles offering more than one track.
    pub branch_points: u64,
    /// Deepest branch depth (or direction-change count) reached.
    pub max_depth_reached: u8,
    /// Branches cut by the length cap.
    pub length_cap_stops: u64,
    /// Branches cut by the branch-depth cap.
    pub depth_cap_stops: u64,
    /// Branches refused at an ownership boundary.
    pub ownership_stops: u64,
    /// Tunnels and bridges skipped in one step.
    pub tunnels_skipped: u64,
    /// Presence-set link records in use at the end of the run.
    pub links_used: usize,
    /// Marks refused because the link pool was empty.
    pub link_exhaustions: u64,
    /// The enumerator halted the run.
    pub halted: bool,
}

/// Counters collected during one [`TrainSearch`](crate::TrainSearch) run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tiles stepped onto, including tunnel exits.
    pub tiles_stepped: u64,
    /// Enumerator visits.
    pub callbacks: u64,
    /// Intersections reached within the depth cap.
    pub intersections: u64,
    /// Alternatives offered to the frontier.
    pub frontier_pushes: u64,
    /// Pushes that found the frontier full.
    pub frontier_overflows: u64,
    /// Most items held by the frontier at once.
    pub frontier_high_water: usize,
    /// Frontier items resumed after passing the staleness check.
    pub branches_resumed: u64,
    /// Frontier items discarded because a shorter path had been found.
    pub stale_pops: u64,
    /// Visited-set link records in use at the end of the run.
    pub links_used: usize,
    /// Intersections treated as visited because the link pool was empty.
    pub link_exhaustions: u64,
    /// Branches cut by `max_length`.
    pub length_cap_stops: u64,
    /// Branches cut by `max_branch_depth`.
    pub depth_cap_stops: u64,
    /// Branches stopped by a signal.
    pub signal_stops: u64,
    /// Tunnels and bridges skipped in one step.
    pub tunnels_skipped: u64,
    /// The enumerator halted the run.
    pub halted: bool,
}
