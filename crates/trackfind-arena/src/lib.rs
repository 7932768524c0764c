//! Bounded visited-tile tables for trackfind searches.
//!
//! Everything here is allocated once per search run at a fixed size and
//! never grows:
//!
//! ```text
//! TileHasher   tile -> bucket (low x/y bits interleaved)
//! ChainedTable bucket heads inline, collisions chained through a LinkArena
//! ├── PresenceSet  tile -> 16-bit trackdir mask  (generic follower)
//! └── VisitedSet   (tile, direction) -> length   (train search)
//! ```
//!
//! Running out of link records is not an error for callers: both sets
//! answer "already visited", which prunes the branch.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod hash;
pub mod link;
pub mod presence;
mod table;
pub mod visited;

pub use config::ArenaConfig;
pub use error::ArenaError;
pub use hash::TileHasher;
pub use link::{Link, LinkArena, LinkIndex};
pub use presence::PresenceSet;
pub use visited::VisitedSet;
