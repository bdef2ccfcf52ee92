// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay drawing for room previews
//!
//! Only callers that show geometry to a person use this module; the room
//! model itself never touches pixels.

use crate::image_ops::draw_thick_line;
use crate::registry::RoomRegistry;
use crate::types::Polygon;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

pub const HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);
pub const WALL: Rgb<u8> = Rgb([0, 0, 0]);
pub const FLOOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Stroke width used for room outlines
pub const OUTLINE_THICKNESS: u32 = 3;

pub fn to_rgb(gray: &GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(gray.clone()).to_rgb8()
}

/// Copy of `base` with one room outlined, used to ask the user which room it is
pub fn highlight_room(base: &RgbImage, polygon: &Polygon) -> RgbImage {
    let mut canvas = base.clone();
    outline_polygon(&mut canvas, polygon, HIGHLIGHT, OUTLINE_THICKNESS);
    canvas
}

/// Copy of `base` with a resize candidate painted over it
pub fn render_candidate(base: &RgbImage, polygon: &Polygon) -> RgbImage {
    let mut canvas = base.clone();
    fill_polygon(&mut canvas, polygon, FLOOR);
    outline_polygon(&mut canvas, polygon, WALL, OUTLINE_THICKNESS);
    canvas
}

/// Copy of `base` with every room of the registry redrawn
pub fn render_registry(base: &RgbImage, registry: &RoomRegistry) -> RgbImage {
    let mut canvas = base.clone();
    for room in registry.iter() {
        fill_polygon(&mut canvas, room.polygon(), FLOOR);
    }
    for room in registry.iter() {
        outline_polygon(&mut canvas, room.polygon(), WALL, OUTLINE_THICKNESS);
    }
    canvas
}

/// Paint the interior of a polygon
pub fn fill_polygon(canvas: &mut RgbImage, polygon: &Polygon, color: Rgb<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(polygon.len());
    for v in polygon.vertices() {
        let p = Point::new(v.x, v.y);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    // The drawing routine rejects an explicitly closed ring
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &points, color);
}

/// Stroke the closed outline of a polygon
pub fn outline_polygon(canvas: &mut RgbImage, polygon: &Polygon, color: Rgb<u8>, thickness: u32) {
    let vertices = polygon.vertices();
    let n = vertices.len();
    let radius = (thickness / 2) as i32;

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        draw_thick_line(canvas, (a.x, a.y), (b.x, b.y), radius, color);
    }
}
