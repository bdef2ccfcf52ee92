// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core geometric types for the room model

use crate::error::{Result, RoomError};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A vertex on the pixel grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }

    /// Snap a real-valued point back onto the pixel grid.
    ///
    /// Returns `None` when either coordinate does not fit in `i32`.
    pub fn try_from_nalgebra(p: &Point2<f64>) -> Option<Self> {
        Some(Self {
            x: snap(p.x)?,
            y: snap(p.y)?,
        })
    }
}

fn snap(value: f64) -> Option<i32> {
    let rounded = value.round();
    (rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64).then_some(rounded as i32)
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned envelope of a polygon.
///
/// Extents are pixel-inclusive: a polygon spanning columns `0..=99`
/// has a width of 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

/// Closed curve described by its vertices in winding order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<PixelPoint>,
}

impl Polygon {
    pub fn new(vertices: Vec<PixelPoint>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[PixelPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let Some(first) = self.vertices.first() else {
            return BoundingBox::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.vertices[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        BoundingBox {
            x: min_x,
            y: min_y,
            width: inclusive_span(min_x, max_x),
            height: inclusive_span(min_y, max_y),
        }
    }

    /// Enclosed area using the shoelace formula
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b) = (&self.vertices[i], &self.vertices[j]);
            area += a.x as f64 * b.y as f64;
            area -= b.x as f64 * a.y as f64;
        }

        (area / 2.0).abs()
    }

    /// Largest and smallest vertex coordinate along `axis`
    pub fn extent(&self, axis: Axis) -> Option<(i32, i32)> {
        let mut coords = self.vertices.iter().map(|p| axis.coordinate(p));
        let first = coords.next()?;
        Some(coords.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c))))
    }
}

/// `max - min + 1` widened to `i64`, saturating at `i32::MAX`
fn inclusive_span(min: i32, max: i32) -> i32 {
    i32::try_from(max as i64 - min as i64 + 1).unwrap_or(i32::MAX)
}

impl From<Vec<(i32, i32)>> for Polygon {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self::new(points.into_iter().map(PixelPoint::from).collect())
    }
}

/// Resize direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal, the room's width
    X,
    /// Vertical, the room's height (length)
    Y,
}

impl Axis {
    /// Parse a user answer such as `x`, `Y`, `width` or `height`
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "X" | "WIDTH" => Ok(Axis::X),
            "Y" | "HEIGHT" => Ok(Axis::Y),
            _ => Err(RoomError::InvalidAxis(value.trim().to_string())),
        }
    }

    pub fn coordinate(&self, p: &PixelPoint) -> i32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    pub(crate) fn component(&self, p: &Point2<f64>) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    pub(crate) fn component_mut<'a>(&self, p: &'a mut Point2<f64>) -> &'a mut f64 {
        match self {
            Axis::X => &mut p.x,
            Axis::Y => &mut p.y,
        }
    }
}

impl FromStr for Axis {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self> {
        Axis::parse(s)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_is_pixel_inclusive() {
        let poly = Polygon::from(vec![(10, 20), (59, 20), (59, 49), (10, 49)]);
        let bbox = poly.bounding_box();

        assert_eq!(bbox, BoundingBox { x: 10, y: 20, width: 50, height: 30 });
        assert_eq!(bbox.area(), 1500);
    }

    #[test]
    fn test_bounding_box_of_extreme_coordinates() {
        let poly = Polygon::from(vec![(i32::MIN, 0), (i32::MAX, 0), (i32::MAX, 9), (i32::MIN, 9)]);
        let bbox = poly.bounding_box();

        assert_eq!(bbox.x, i32::MIN);
        assert_eq!(bbox.width, i32::MAX);
        assert_eq!(bbox.height, 10);
    }

    #[test]
    fn test_snap_rejects_out_of_range() {
        assert_eq!(
            PixelPoint::try_from_nalgebra(&Point2::new(2.5, -3.4)),
            Some(PixelPoint::new(3, -3))
        );
        assert_eq!(PixelPoint::try_from_nalgebra(&Point2::new(3.0e9, 0.0)), None);
        assert_eq!(PixelPoint::try_from_nalgebra(&Point2::new(0.0, -3.0e9)), None);
    }

    #[test]
    fn test_empty_polygon_box() {
        assert_eq!(Polygon::default().bounding_box(), BoundingBox::default());
        assert_eq!(Polygon::default().extent(Axis::X), None);
    }

    #[test]
    fn test_area_ignores_winding() {
        let ccw = Polygon::from(vec![(0, 0), (10, 0), (10, 10), (0, 10)]);
        let cw = Polygon::from(vec![(0, 0), (0, 10), (10, 10), (10, 0)]);

        assert!((ccw.area() - 100.0).abs() < 1e-9);
        assert!((cw.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!(Axis::parse("x").unwrap(), Axis::X);
        assert_eq!(" Height ".parse::<Axis>().unwrap(), Axis::Y);
        assert_eq!(Axis::parse("z"), Err(RoomError::InvalidAxis("z".into())));
    }

    #[test]
    fn test_extent() {
        let poly = Polygon::from(vec![(3, 7), (-2, 9), (8, 1)]);
        assert_eq!(poly.extent(Axis::X), Some((-2, 8)));
        assert_eq!(poly.extent(Axis::Y), Some((1, 9)));
    }
}
