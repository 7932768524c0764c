//! Core types and traits for the trackfind pathfinding engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the arena, map, and search crates: tile ids, map
//! geometry, direction and track codes with their transition tables, tile
//! metadata, and the [`TileQuery`] trait through which searches read a map.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod query;
pub mod tile;
pub mod track;

pub use error::GeometryError;
pub use geometry::MapGeometry;
pub use id::{Owner, TileIndex};
pub use query::TileQuery;
pub use tile::{PortalKind, SignalState, Slope, TileKind, TransportKind, TunnelBridgeMeta};
pub use track::{DiagDirection, Track, TrackBits, Trackdir, TrackdirBits};
