// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end checks: raster in, rooms named, resized and committed.

use approx::assert_abs_diff_eq;
use floorplan_rooms::{
    centroid, commit, extract, propose_resize, scale, select_rooms, Axis, Choice,
    ExtractionConfig, Polygon, RoomError, RoomMetadata, RoomRegistry,
};
use image::{GrayImage, Luma};

fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Polygon {
    Polygon::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

/// 300x200 plan with three rooms along the top and one large room below
fn three_room_plan() -> GrayImage {
    let mut img = GrayImage::from_pixel(300, 200, Luma([255]));
    let mut wall = |x0: u32, y0: u32, x1: u32, y1: u32| {
        for x in x0..x1 {
            for y in y0..y1 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
    };
    // Outline
    wall(10, 10, 290, 14);
    wall(10, 186, 290, 190);
    wall(10, 10, 14, 190);
    wall(286, 10, 290, 190);
    // Partitions
    wall(10, 90, 290, 94);
    wall(100, 10, 104, 94);
    wall(200, 10, 204, 94);
    img
}

#[test]
fn square_room_width_doubled() {
    let mut registry = RoomRegistry::build(
        vec![rect(0, 0, 100, 80)],
        vec![RoomMetadata::new("lounge", 4.0, 3.0)],
    )
    .unwrap();

    let candidate = propose_resize(&registry, "lounge", Axis::X, 8.0).unwrap();
    assert_abs_diff_eq!(candidate.factor, 2.0);
    assert_eq!(candidate.candidate_a, rect(-100, 0, 100, 80));
    assert_eq!(candidate.candidate_b, rect(0, 0, 200, 80));

    let room = commit(&mut registry, "lounge", Choice::A, candidate)
        .unwrap()
        .unwrap();
    assert_eq!(room.polygon(), &rect(-100, 0, 100, 80));
    assert_eq!(room.real_width, 8.0);
    assert_eq!(room.real_height, 3.0);
}

#[test]
fn extraction_skips_border_and_outline_in_detection_order() {
    let border = rect(0, 0, 399, 299);
    let outline = rect(20, 20, 380, 280);
    let first = rect(30, 30, 150, 140);
    let second = rect(200, 30, 370, 270);

    let extraction = select_rooms(
        vec![border, outline.clone(), first.clone(), second.clone()],
        400,
        300,
        0.0,
    );
    assert_eq!(extraction.rooms, vec![first, second]);
    assert_eq!(extraction.floor_outline, Some(outline));
}

#[test]
fn rasterized_plan_to_registry() {
    let extraction = extract(&three_room_plan(), &ExtractionConfig::default());
    assert_eq!(extraction.rooms.len(), 4);

    let xs: Vec<i32> = extraction.rooms.iter().map(|r| r.bounding_box().x).collect();
    assert_eq!(xs, vec![14, 104, 204, 14]);

    let names = ["bed", "bath", "study", "living"];
    let metadata = names
        .iter()
        .map(|n| RoomMetadata::new(*n, 3.0, 2.5))
        .collect();
    let mut registry = RoomRegistry::build(extraction.rooms, metadata).unwrap();
    assert_eq!(registry.len(), 4);

    // Shrink the living room's height while keeping its top wall
    let living_before = registry.get("living").unwrap().bounding_box();
    let candidate = propose_resize(&registry, "LIVING", Axis::Y, 1.25).unwrap();
    let room = commit(&mut registry, "living", Choice::B, candidate)
        .unwrap()
        .unwrap();

    let after = room.bounding_box();
    assert_eq!(after.y, living_before.y);
    assert_eq!(after.x, living_before.x);
    assert_eq!(after.width, living_before.width);
    assert!(after.height < living_before.height);
    assert_eq!(room.real_height, 1.25);
    assert_eq!(registry.len(), 4);
}

#[test]
fn rejected_edit_changes_nothing() {
    let registry_rooms = vec![rect(0, 0, 40, 40), rect(50, 0, 90, 40)];
    let mut registry = RoomRegistry::build(
        registry_rooms,
        vec![RoomMetadata::new("a", 2.0, 2.0), RoomMetadata::new("b", 2.0, 2.0)],
    )
    .unwrap();
    let snapshot = serde_json::to_string(&registry).unwrap();

    let candidate = propose_resize(&registry, "b", Axis::Y, 5.0).unwrap();
    assert!(commit(&mut registry, "b", Choice::None, candidate)
        .unwrap()
        .is_none());

    assert_eq!(serde_json::to_string(&registry).unwrap(), snapshot);
}

#[test]
fn unknown_room_and_degenerate_geometry() {
    let mut registry = RoomRegistry::build(
        vec![Polygon::from(vec![(0, 0), (5, 5), (10, 10)])],
        vec![RoomMetadata::new("sliver", 1.0, 1.0)],
    )
    .unwrap();

    assert_eq!(
        propose_resize(&registry, "attic", Axis::X, 2.0).unwrap_err(),
        RoomError::UnknownRoom("ATTIC".into())
    );
    assert!(matches!(
        propose_resize(&registry, "sliver", Axis::X, 2.0),
        Err(RoomError::DegenerateGeometry { .. })
    ));

    let good = RoomRegistry::build(vec![rect(0, 0, 4, 4)], vec![RoomMetadata::new("x", 1.0, 1.0)])
        .unwrap();
    let candidate = propose_resize(&good, "x", Axis::X, 2.0).unwrap();
    assert_eq!(
        commit(&mut registry, "attic", Choice::A, candidate).unwrap_err(),
        RoomError::UnknownRoom("ATTIC".into())
    );
}

#[test]
fn unit_scale_keeps_centroid() {
    let shape = Polygon::from(vec![(3, 2), (47, 9), (41, 38), (12, 33)]);
    let before = centroid(&shape).unwrap();

    for axis in [Axis::X, Axis::Y] {
        let (a, b) = scale(&shape, 1.0, axis).unwrap();
        assert_eq!(a, shape);
        assert_eq!(b, shape);

        let after = centroid(&a).unwrap();
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1.0);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1.0);
    }
}
