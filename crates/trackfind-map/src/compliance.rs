//! TileQuery contract checks.
//!
//! Shared by the builder tests: any map a builder produces must pass all of
//! these.

use trackfind_core::{TileIndex, TileKind, TileQuery, TrackdirBits, TransportKind};

fn tiles(map: &dyn TileQuery) -> impl Iterator<Item = TileIndex> {
    (0..map.geometry().tile_count() as u32).map(TileIndex)
}

/// Border tiles are void and carry nothing.
pub fn assert_border_is_void(map: &dyn TileQuery) {
    let geo = map.geometry();
    for tile in tiles(map).filter(|&t| geo.is_border(t)) {
        assert_eq!(map.tile_kind(tile), TileKind::Void, "border tile {tile}");
        for transport in TransportKind::ALL {
            assert!(
                map.track_status(tile, transport).is_empty(),
                "border tile {tile} has {transport:?} track"
            );
        }
    }
}

/// Track status only uses valid trackdir bits and is direction-symmetric.
pub fn assert_track_status_well_formed(map: &dyn TileQuery) {
    for tile in tiles(map) {
        for transport in TransportKind::ALL {
            let status = map.track_status(tile, transport);
            assert_eq!(
                status.bits() & !TrackdirBits::VALID.bits(),
                0,
                "tile {tile} reports invalid bits {:#06x}",
                status.bits()
            );
            for td in status.iter() {
                assert!(
                    status.contains(td.reverse()),
                    "tile {tile}: {td} is one-way"
                );
            }
        }
    }
}

/// Every portal has a partner of the same kind facing back at it, at the
/// same centre height, somewhere along its heading.
pub fn assert_portals_paired(map: &dyn TileQuery) {
    let geo = map.geometry();
    for tile in tiles(map) {
        let Some((kind, dir, _)) = map.tunnel_bridge_meta(tile).and_then(|m| m.portal()) else {
            continue;
        };
        let z = map.center_height(tile);
        let mut cursor = tile;
        let found = (0..geo.size_x().max(geo.size_y())).any(|_| {
            cursor = geo.step(cursor, dir);
            map.tunnel_bridge_meta(cursor)
                .and_then(|m| m.portal())
                .is_some_and(|(k, d, _)| k == kind && d == dir.reverse())
                && map.center_height(cursor) == z
        });
        assert!(found, "portal {tile} heading {dir:?} has no partner");
    }
}

/// Run every check.
pub fn run_full_compliance(map: &dyn TileQuery) {
    assert_border_is_void(map);
    assert_track_status_well_formed(map);
    assert_portals_paired(map);
}
