//! Reference tile map for trackfind searches.
//!
//! The search engine only sees a map through
//! [`TileQuery`](trackfind_core::TileQuery). This crate provides a plain
//! in-memory implementation, [`TileMap`], and a [`TileMapBuilder`] for
//! laying out rails, stations, depots, signals, roads, water, slopes,
//! tunnels and bridges. It is what the tests, benchmarks and small tools
//! use; a game embeds the engine against its own map storage instead.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod map;
pub mod tile;

#[cfg(test)]
pub(crate) mod compliance;

pub use builder::{Aspect, SignalKind, TileMapBuilder};
pub use error::MapError;
pub use map::TileMap;
pub use tile::TileData;
