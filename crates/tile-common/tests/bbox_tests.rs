//! Tests for BoundingBox handling and tile covering.

use tile_common::tile::{tile_bounds, tiles_per_axis};
use tile_common::{BoundingBox, TileCoord, TileCover, TileError, TileRange, MAX_LATITUDE};

// ============================================================================
// Parsing and validation
// ============================================================================

#[test]
fn test_parse_bbox_with_whitespace() {
    let bbox: BoundingBox = " -8, 55 , 0,60 ".parse().unwrap();
    assert_eq!(bbox, BoundingBox::new(-8.0, 55.0, 0.0, 60.0));
}

#[test]
fn test_parse_bbox_wrong_arity() {
    let err = "1,2,3".parse::<BoundingBox>().unwrap_err();
    assert!(matches!(err, TileError::InvalidFormat(_)));
}

#[test]
fn test_parse_bbox_bad_number() {
    let err = "1,2,three,4".parse::<BoundingBox>().unwrap_err();
    assert_eq!(err, TileError::InvalidNumber("three".to_string()));
}

#[test]
fn test_validate_rejects_inverted_latitudes() {
    let bbox = BoundingBox::new(0.0, 10.0, 5.0, 5.0);
    assert!(bbox.validate().is_err());
}

#[test]
fn test_validate_rejects_nan() {
    let bbox = BoundingBox::new(f64::NAN, 0.0, 5.0, 5.0);
    assert!(bbox.validate().is_err());
}

#[test]
fn test_validate_accepts_antimeridian_box() {
    let bbox = BoundingBox::new(160.0, -50.0, -140.0, 50.0);
    assert!(bbox.validate().is_ok());
    assert!(bbox.crosses_antimeridian());
}

#[test]
fn test_serde_as_array() {
    let bbox = BoundingBox::new(-23.5, 29.5, 45.0, 70.5);
    let json = serde_json::to_string(&bbox).unwrap();
    assert_eq!(json, "[-23.5,29.5,45.0,70.5]");

    let back: BoundingBox = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bbox);
}

#[test]
fn test_contains_point_across_antimeridian() {
    let bbox = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
    assert!(bbox.contains_point(175.0, 0.0));
    assert!(bbox.contains_point(-175.0, 0.0));
    assert!(!bbox.contains_point(0.0, 0.0));
}

// ============================================================================
// Tile covering
// ============================================================================

#[test]
fn test_global_box_covers_full_grid() {
    let global = BoundingBox::global();
    for z in 0..=6 {
        let cover = TileCover::for_zoom(Some(&global), z);
        assert_eq!(cover.len(), 4u64.pow(z), "zoom {}", z);
        assert_eq!(cover.ranges, vec![TileRange::full(z)]);
    }
}

#[test]
fn test_absent_box_covers_full_grid() {
    for z in 0..=5 {
        let cover = TileCover::for_zoom(None, z);
        assert_eq!(cover.len(), 4u64.pow(z));
        assert_eq!(cover.iter().count() as u64, 4u64.pow(z));
    }
}

#[test]
fn test_point_box_yields_one_tile() {
    let point = BoundingBox::point(0.0, 0.0);
    for z in 0..=12 {
        let cover = TileCover::for_zoom(Some(&point), z);
        assert_eq!(cover.len(), 1, "zoom {}", z);
    }
}

#[test]
fn test_point_box_off_boundary() {
    let point = BoundingBox::point(13.4, 52.5);
    for z in 0..=12 {
        let tiles: Vec<TileCoord> = TileCover::for_zoom(Some(&point), z).iter().collect();
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0].bounds().contains_point(13.4, 52.5));
    }
}

#[test]
fn test_polar_box_is_clamped_not_wrapped() {
    let arctic = BoundingBox::new(-10.0, 88.0, 10.0, 90.0);
    let cover = TileCover::for_zoom(Some(&arctic), 4);
    assert!(cover.len() >= 1);
    for tile in cover.iter() {
        assert_eq!(tile.y, 0);
        assert!(tile.x < tiles_per_axis(4));
    }
}

#[test]
fn test_regional_box_is_partial() {
    // ICON-EU domain
    let europe = BoundingBox::new(-23.5, 29.5, 45.0, 70.5);
    let cover = TileCover::for_zoom(Some(&europe), 5);
    assert!(cover.len() > 0);
    assert!(cover.len() < 4u64.pow(5));

    for tile in cover.iter() {
        let b = tile_bounds(&tile);
        assert!(b.east > europe.west && b.west < europe.east);
        assert!(b.north > europe.south && b.south < europe.north);
    }
}

#[test]
fn test_antimeridian_box_splits_in_two() {
    let pacific = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
    let cover = TileCover::for_zoom(Some(&pacific), 3);
    assert_eq!(cover.ranges.len(), 2);

    let xs: Vec<u32> = cover.iter().map(|t| t.x).collect();
    assert!(xs.contains(&7));
    assert!(xs.contains(&0));
    assert!(!xs.contains(&4));
}

#[test]
fn test_east_edge_at_minus_180_stays_east_of_antimeridian() {
    let bbox = BoundingBox::new(170.0, -10.0, -180.0, 10.0);
    assert!(!bbox.crosses_antimeridian());
    assert!((bbox.width() - 10.0).abs() < 1e-9);

    let cover = TileCover::for_zoom(Some(&bbox), 2);
    assert_eq!(cover.ranges.len(), 1);
    let xs: Vec<u32> = cover.iter().map(|t| t.x).collect();
    assert_eq!(xs, vec![3, 3]);
}

#[test]
fn test_west_edge_at_180_stays_west_of_antimeridian() {
    let bbox = BoundingBox::new(180.0, -10.0, -170.0, 10.0);
    assert!(!bbox.crosses_antimeridian());

    let cover = TileCover::for_zoom(Some(&bbox), 2);
    assert_eq!(cover.ranges.len(), 1);
    assert!(cover.iter().all(|t| t.x == 0));
    assert_eq!(cover.len(), 2);
}

#[test]
fn test_cover_enumeration_is_deterministic() {
    let bbox = BoundingBox::new(-8.0, 55.0, 0.0, 60.0);
    let a: Vec<TileCoord> = TileCover::for_zoom(Some(&bbox), 8).iter().collect();
    let b: Vec<TileCoord> = TileCover::for_zoom(Some(&bbox), 8).iter().collect();
    assert_eq!(a, b);
}

#[test]
fn test_max_latitude_constant_matches_tile_edge() {
    let top = TileCoord::new(0, 0, 0).bounds();
    assert!((top.north - MAX_LATITUDE).abs() < 1e-9);
}
