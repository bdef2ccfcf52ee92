// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-axis contour scaling with wall anchoring
//!
//! A room polygon is stretched about its area centroid along one axis.
//! Stretching about the centroid moves both walls on that axis, which is
//! rarely what a resize means, so the stretched polygon is shifted back in
//! two ways:
//!
//! - candidate A keeps the far (maximum) wall where it was,
//! - candidate B keeps the near (minimum) wall where it was.
//!
//! All arithmetic happens in `f64` and is snapped to the pixel grid once,
//! at the very end.

use crate::error::{Result, RoomError};
use crate::types::{Axis, PixelPoint, Polygon};
use nalgebra::{Point2, Vector2};

/// Area centroid of a polygon from its zeroth and first moments
pub fn centroid(polygon: &Polygon) -> Result<Point2<f64>> {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;
    for i in 0..n {
        let a = vertices[i].to_nalgebra();
        let b = vertices[(i + 1) % n].to_nalgebra();
        let cross = a.x * b.y - b.x * a.y;
        m00 += cross;
        m10 += (a.x + b.x) * cross;
        m01 += (a.y + b.y) * cross;
    }
    m00 /= 2.0;
    m10 /= 6.0;
    m01 /= 6.0;

    if m00.abs() < f64::EPSILON {
        return Err(RoomError::DegenerateGeometry { vertices: n });
    }

    Ok(Point2::new(m10 / m00, m01 / m00))
}

/// Scale `polygon` by `factor` along `axis`, returning the far-wall-anchored
/// and near-wall-anchored candidates
pub fn scale(polygon: &Polygon, factor: f64, axis: Axis) -> Result<(Polygon, Polygon)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(RoomError::InvalidScaleFactor(format!(
            "factor must be positive, got {factor}"
        )));
    }

    let center = centroid(polygon)?;
    let offset = center.coords;

    let scaled: Vec<Point2<f64>> = polygon
        .vertices()
        .iter()
        .map(|v| {
            let mut p = v.to_nalgebra() - offset;
            *axis.component_mut(&mut p) *= factor;
            p + offset
        })
        .collect();

    // Centroid succeeded, so there are at least three vertices
    let Some((pre_min, pre_max)) = polygon.extent(axis) else {
        return Err(RoomError::DegenerateGeometry { vertices: 0 });
    };
    let (post_min, post_max) = scaled.iter().map(|p| axis.component(p)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), c| (lo.min(c), hi.max(c)),
    );

    if post_max - post_min >= i32::MAX as f64 {
        return Err(RoomError::InvalidScaleFactor(format!(
            "factor {factor} stretches the room beyond the pixel range"
        )));
    }

    let shift_a = pre_max as f64 - post_max;
    let shift_b = pre_min as f64 - post_min;

    tracing::debug!(
        %axis,
        factor,
        cx = center.x,
        cy = center.y,
        shift_a,
        shift_b,
        "Scaled contour"
    );

    Ok((
        shifted(&scaled, axis, shift_a)?,
        shifted(&scaled, axis, shift_b)?,
    ))
}

fn shifted(points: &[Point2<f64>], axis: Axis, amount: f64) -> Result<Polygon> {
    let delta = match axis {
        Axis::X => Vector2::new(amount, 0.0),
        Axis::Y => Vector2::new(0.0, amount),
    };
    points
        .iter()
        .map(|p| {
            let moved = *p + delta;
            PixelPoint::try_from_nalgebra(&moved).ok_or_else(|| {
                RoomError::InvalidScaleFactor(format!(
                    "scaled vertex ({:.0}, {:.0}) is outside the pixel range",
                    moved.x, moved.y
                ))
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Polygon::new)
}
