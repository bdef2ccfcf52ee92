// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room detection via contour finding
//!
//! Every closed boundary in the binarized plan is traced, nested or not.
//! Two of those curves are structural rather than rooms: the image border
//! and the outer boundary of the whole floor. Both are removed before the
//! remaining curves are handed out in detection order.

use crate::config::{BoundaryPolarity, ExtractionConfig};
use crate::types::{PixelPoint, Polygon};
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, Contour};
use serde::{Deserialize, Serialize};

/// Result of region extraction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// Room curves in detection order
    pub rooms: Vec<Polygon>,
    /// Outer boundary of the floor, when one could be identified
    pub floor_outline: Option<Polygon>,
    /// Number of curves discarded as the image border
    pub border_count: usize,
}

/// Extract room polygons from a line-closed grayscale plan
pub fn extract(image: &GrayImage, config: &ExtractionConfig) -> Extraction {
    let binary = binarize(image, config);
    let curves = trace_curves(&binary);

    let extraction = select_rooms(curves, binary.width(), binary.height(), config.min_room_area);
    tracing::info!(
        rooms = extraction.rooms.len(),
        floor_outline = extraction.floor_outline.is_some(),
        border_curves = extraction.border_count,
        "Extracted room regions"
    );
    extraction
}

/// Convert a grayscale plan into a mask where room interiors are non-zero
pub fn binarize(image: &GrayImage, config: &ExtractionConfig) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let light = pixel.0[0] > config.threshold;
        let interior = match config.polarity {
            BoundaryPolarity::DarkOnLight => light,
            BoundaryPolarity::LightOnDark => !light,
        };
        result.put_pixel(x, y, Luma([if interior { 255 } else { 0 }]));
    }

    result
}

/// Trace every outer and hole border of a binary mask, in scan order
pub fn trace_curves(binary: &GrayImage) -> Vec<Polygon> {
    let contours: Vec<Contour<i32>> = find_contours(binary);

    contours
        .into_iter()
        .filter_map(|contour| {
            let points: Vec<PixelPoint> = contour
                .points
                .iter()
                .map(|p| PixelPoint::new(p.x, p.y))
                .collect();
            let chain = compress_chain(&points);
            (chain.len() >= 3).then(|| Polygon::new(chain))
        })
        .collect()
}

/// Drop the image border and the floor outline from a set of traced curves
pub fn select_rooms(
    curves: Vec<Polygon>,
    image_width: u32,
    image_height: u32,
    min_room_area: f64,
) -> Extraction {
    let total = curves.len();
    let mut remaining: Vec<Polygon> = curves
        .into_iter()
        .filter(|curve| {
            let bbox = curve.bounding_box();
            !(bbox.width as u32 == image_width && bbox.height as u32 == image_height)
        })
        .collect();
    let border_count = total - remaining.len();

    let floor_outline = match remaining.len() {
        0 => None,
        1 => {
            tracing::warn!("Only one closed curve besides the border; keeping it as a room");
            None
        }
        _ => {
            // First curve wins on equal areas
            let mut largest = 0;
            for (i, curve) in remaining.iter().enumerate().skip(1) {
                if curve.bounding_box().area() > remaining[largest].bounding_box().area() {
                    largest = i;
                }
            }
            Some(remaining.remove(largest))
        }
    };

    if min_room_area > 0.0 {
        remaining.retain(|room| room.area() >= min_room_area);
    }

    Extraction {
        rooms: remaining,
        floor_outline,
        border_count,
    }
}

/// Keep only the end points of straight runs in a closed pixel chain
fn compress_chain(points: &[PixelPoint]) -> Vec<PixelPoint> {
    let mut chain: Vec<PixelPoint> = Vec::with_capacity(points.len());
    for p in points {
        if chain.last() != Some(p) {
            chain.push(*p);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }

    let n = chain.len();
    if n < 3 {
        return chain;
    }

    let step = |a: &PixelPoint, b: &PixelPoint| ((b.x - a.x).signum(), (b.y - a.y).signum());

    (0..n)
        .filter(|&i| {
            let prev = &chain[(i + n - 1) % n];
            let next = &chain[(i + 1) % n];
            step(prev, &chain[i]) != step(&chain[i], next)
        })
        .map(|i| chain[i])
        .collect()
}
