//! trackfind: track following and rail pathfinding over tile maps.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all trackfind sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use trackfind::prelude::*;
//!
//! // A line with a junction: straight on to one platform, or curve
//! // south-east to another that is one tile closer.
//! let mut builder = TileMapBuilder::new(5, 5).unwrap();
//! builder
//!     .rail_line(2, 4, DiagDirection::SouthWest, 6).unwrap()
//!     .rail(5, 4, TrackBits::single(Track::Right)).unwrap()
//!     .station(8, 4, DiagDirection::SouthWest).unwrap()
//!     .rail(5, 5, TrackBits::single(Track::Y)).unwrap()
//!     .station(5, 6, DiagDirection::SouthEast).unwrap();
//! let map = builder.build();
//! let geo = map.geometry();
//!
//! let mut search = TrainSearch::new(&map, SearchConfig::default()).unwrap();
//! let mut best: Option<Visit> = None;
//! search.search(geo.tile_xy(2, 4), DiagDirection::SouthWest, &mut |v: &Visit, _: &mut BranchState| {
//!     if map.tile(v.tile).kind != TileKind::Station {
//!         return Flow::Continue;
//!     }
//!     if best.is_none_or(|b| v.length < b.length) {
//!         best = Some(*v);
//!     }
//!     Flow::StopBranch
//! });
//!
//! let best = best.unwrap();
//! assert_eq!(best.tile, geo.tile_xy(5, 6));
//! assert_eq!(best.length, 5);
//! assert_eq!(best.first_track, Some(Trackdir::RIGHT_S));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `trackfind-core` | Tiles, directions, track tables, `TileQuery` |
//! | [`arena`] | `trackfind-arena` | Fixed-size visited-tile tables |
//! | [`map`] | `trackfind-map` | In-memory tile map and builder |
//! | [`search`] | `trackfind-search` | Generic follower and train search |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, track tables and the [`types::TileQuery`] trait
/// (`trackfind-core`).
pub use trackfind_core as types;

/// Fixed-capacity visited-tile tables (`trackfind-arena`).
///
/// Searches allocate these themselves; use this module to size them
/// through [`arena::ArenaConfig`].
pub use trackfind_arena as arena;

/// In-memory tile map (`trackfind-map`).
///
/// [`map::TileMapBuilder`] lays track, structures and signals;
/// [`map::TileMap`] answers the searches' tile queries.
pub use trackfind_map as map;

/// Searches (`trackfind-search`).
///
/// [`search::GenericFollower`] for exhaustive walks of any network,
/// [`search::TrainSearch`] for cost-ordered rail routing.
pub use trackfind_search as search;

/// Common imports for typical trackfind usage.
///
/// ```rust
/// use trackfind::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use trackfind_core::{
        DiagDirection, MapGeometry, Owner, TileIndex, TileKind, TileQuery, Track, TrackBits,
        Trackdir, TrackdirBits, TransportKind,
    };

    // Map
    pub use trackfind_map::{Aspect, SignalKind, TileMap, TileMapBuilder};

    // Arena sizing
    pub use trackfind_arena::ArenaConfig;

    // Searches
    pub use trackfind_search::{
        BranchState, Enumerator, Flow, FollowConfig, FollowMode, GenericFollower, SearchConfig,
        TrainSearch, Visit,
    };
}
