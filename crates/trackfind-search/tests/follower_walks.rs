//! Integration tests: generic follower over fixture maps and other
//! networks.

use proptest::prelude::*;
use std::collections::HashSet;
use trackfind_arena::ArenaConfig;
use trackfind_core::{DiagDirection, TileKind, TileQuery, Track, TrackBits, Trackdir, TransportKind};
use trackfind_map::TileMapBuilder;
use trackfind_search::{FollowConfig, GenericFollower};
use trackfind_test_utils::fixtures::{branching_yard, three_way_junction};
use trackfind_test_utils::Recorder;

#[test]
fn dedup_visits_each_trackdir_once() {
    let f = branching_yard(5).unwrap();
    let config = FollowConfig::full(TransportKind::Rail).forward_only();
    let mut follower = GenericFollower::new(&f.map, config).unwrap();
    let mut rec = Recorder::new();
    let stats = follower.follow(f.start, f.direction, &mut rec);

    let pairs: HashSet<_> = rec.visits.iter().map(|v| (v.tile, v.trackdir)).collect();
    assert_eq!(pairs.len(), rec.visits.len());
    assert_eq!(stats.branch_points, 5);
    let stations = rec
        .visits
        .iter()
        .filter(|v| f.map.tile(v.tile).kind == TileKind::Station)
        .count();
    assert_eq!(stations, 6);
    let tiles: HashSet<_> = rec.visits.iter().map(|v| v.tile).collect();
    assert_eq!(rec.presence_tiles, Some(tiles.len()));
}

#[test]
fn bidirectional_from_mid_line_reaches_both_ends() {
    let f = three_way_junction().unwrap();
    let config = FollowConfig::full(TransportKind::Rail);
    let mut follower = GenericFollower::new(&f.map, config).unwrap();
    let mut rec = Recorder::new();
    follower.follow(f.tile(4, 8), DiagDirection::SouthWest, &mut rec);

    // Behind the start, back to the first tile of the line.
    assert!(rec.saw(f.tile(2, 8), Trackdir::X_NE));
    // Reverse walks turning inside the junction can reach a platform first
    // by a longer way; the direct arrival is still the shortest recorded.
    let platforms = [
        (f.tile(9, 8), Trackdir::X_SW),
        (f.tile(6, 5), Trackdir::Y_NW),
        (f.tile(6, 11), Trackdir::Y_SE),
    ];
    for (platform, outward) in platforms {
        assert!(rec.saw(platform, outward));
        assert_eq!(rec.lengths_at(platform).into_iter().min(), Some(5));
    }
}

#[test]
fn long_line_full_mode_keeps_a_flat_stack() {
    let mut b = TileMapBuilder::new(12, 4).unwrap();
    b.rail_line(2, 3, DiagDirection::SouthWest, 4000).unwrap();
    let map = b.build();
    let geo = map.geometry();
    let config = FollowConfig {
        arena: ArenaConfig::new(1 << 16, 60000),
        ..FollowConfig::full(TransportKind::Rail)
    };
    let mut follower = GenericFollower::new(&map, config).unwrap();
    let mut rec = Recorder::new();
    let stats = follower.follow(geo.tile_xy(2, 3), DiagDirection::SouthWest, &mut rec);

    // Both trackdirs of every line tile, each exactly once.
    let pairs: HashSet<_> = rec.visits.iter().map(|v| (v.tile, v.trackdir)).collect();
    assert_eq!(pairs.len(), rec.visits.len());
    assert_eq!(rec.visits.len(), 2 * 4000);
    assert!(rec.saw(geo.tile_xy(4001, 3), Trackdir::X_SW));
    assert!(rec.saw(geo.tile_xy(2, 3), Trackdir::X_NE));
    assert_eq!(stats.link_exhaustions, 0);
    assert!(!stats.halted);
}

#[test]
fn road_network_is_followed() {
    let mut b = TileMapBuilder::new(4, 4).unwrap();
    for x in 2..8 {
        b.road(x, 3, TrackBits::single(Track::X)).unwrap();
    }
    let map = b.build();
    let geo = map.geometry();
    let config = FollowConfig::full(TransportKind::Road).forward_only();
    let mut follower = GenericFollower::new(&map, config).unwrap();
    let mut rec = Recorder::new();
    follower.follow(geo.tile_xy(2, 3), DiagDirection::SouthWest, &mut rec);
    assert_eq!(rec.visits.len(), 5);
    assert_eq!(rec.visits.last().map(|v| v.length), Some(5));
}

#[test]
fn open_water_terminates_inside_the_lake() {
    let mut b = TileMapBuilder::new(4, 4).unwrap();
    for x in 2..5 {
        for y in 2..5 {
            b.water(x, y).unwrap();
        }
    }
    let map = b.build();
    let geo = map.geometry();
    let config = FollowConfig::full(TransportKind::Water);
    let mut follower = GenericFollower::new(&map, config).unwrap();
    let mut rec = Recorder::new();
    follower.follow(geo.tile_xy(2, 2), DiagDirection::SouthWest, &mut rec);

    assert!(!rec.visits.is_empty());
    for v in &rec.visits {
        assert_eq!(map.tile(v.tile).kind, TileKind::Water);
    }
    let pairs: HashSet<_> = rec.visits.iter().map(|v| (v.tile, v.trackdir)).collect();
    assert_eq!(pairs.len(), rec.visits.len());
}

proptest! {
    #[test]
    fn caps_bound_every_visit(
        sidings in 1u32..10,
        max_depth in 1u8..=FollowConfig::UNDEDUPED_MAX_BRANCHES,
        max_length in 4u32..=FollowConfig::UNDEDUPED_MAX_LENGTH,
    ) {
        let f = branching_yard(sidings).unwrap();
        let config = FollowConfig {
            max_length: Some(max_length),
            max_branch_depth: Some(max_depth),
            ..FollowConfig::full_without_dedup(TransportKind::Rail)
        };
        let mut follower = GenericFollower::new(&f.map, config).unwrap();
        let mut rec = Recorder::new();
        let stats = follower.follow(f.start, f.direction, &mut rec);

        prop_assert!(stats.max_depth_reached <= max_depth);
        for v in &rec.visits {
            prop_assert!(v.depth <= max_depth);
            prop_assert!(v.length <= max_length);
        }
    }
}
