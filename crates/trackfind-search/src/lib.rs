//! Track searches over a [`TileQuery`](trackfind_core::TileQuery) map.
//!
//! Two drivers share the [`Enumerator`] callback contract:
//!
//! - [`GenericFollower`] walks every reachable trackdir depth-first, for
//!   rail, road or water, marking what it has seen in a
//!   [`PresenceSet`](trackfind_arena::PresenceSet).
//! - [`TrainSearch`] follows rail branch by branch, queuing the
//!   alternatives of each intersection on a cost-ordered [`Frontier`] and
//!   charging for slopes and red signals.
//!
//! Both skip the inside of tunnels and bridges in one step using
//! [`TunnelProbe`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod callback;
pub mod config;
pub mod follower;
pub mod frontier;
pub mod metrics;
pub mod train;
pub mod tunnel;

pub use callback::{BranchState, Enumerator, Flow, FollowContext, Visit};
pub use config::{ConfigError, FollowConfig, FollowMode, SearchConfig};
pub use follower::GenericFollower;
pub use frontier::{Frontier, PushOutcome, StackedItem};
pub use metrics::{FollowStats, SearchStats};
pub use train::TrainSearch;
pub use tunnel::{ProbeError, TunnelProbe, TunnelProbeResult};
