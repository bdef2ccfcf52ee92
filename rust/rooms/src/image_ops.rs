// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster cleanup that turns a scanned plan into a line-closed binary image
//!
//! Region extraction needs closed boundaries. These helpers produce them:
//! black/white conversion, boundary thinning and thickening to drop text
//! and fixtures, then line closing, which redraws every long straight
//! segment found by a Hough transform so that door gaps are bridged.

use crate::config::{BoundaryPolarity, PreprocessConfig};
use crate::line_ops::detect_segments;
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;

/// Run the full preprocessing pipeline
pub fn preprocess(grayscale: &GrayImage, config: &PreprocessConfig) -> GrayImage {
    let mut binary = threshold(grayscale, config.threshold);

    for _ in 0..config.thinning_passes {
        binary = thin_boundaries(&binary, config.polarity, config.filter_radius);
    }
    for _ in 0..config.thickening_passes {
        binary = thicken_boundaries(&binary, config.polarity, config.filter_radius);
    }

    let edges = canny_edges(&binary, config.canny_low, config.canny_high);
    let segments = detect_segments(
        &edges,
        config.hough_threshold,
        config.min_line_length,
        config.max_line_gap,
    );

    let radius = (config.closing_line_thickness / 2) as i32;
    let value = config.polarity.boundary_value();
    for segment in &segments {
        draw_thick_line(
            &mut binary,
            (segment.start.x, segment.start.y),
            (segment.end.x, segment.end.y),
            radius,
            Luma([value]),
        );
    }

    tracing::info!(
        width = binary.width(),
        height = binary.height(),
        closing_segments = segments.len(),
        "Preprocessed floor plan"
    );
    binary
}

/// Pixels strictly above `threshold_value` become white, the rest black
pub fn threshold(image: &GrayImage, threshold_value: u8) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel.0[0] > threshold_value { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

/// Shrink boundary strokes by `radius` pixels on each side
pub fn thin_boundaries(image: &GrayImage, polarity: BoundaryPolarity, radius: u8) -> GrayImage {
    match polarity {
        // Dark strokes shrink when light grows: max filter
        BoundaryPolarity::DarkOnLight => imageproc::morphology::dilate(image, Norm::LInf, radius),
        BoundaryPolarity::LightOnDark => imageproc::morphology::erode(image, Norm::LInf, radius),
    }
}

/// Grow boundary strokes by `radius` pixels on each side
pub fn thicken_boundaries(image: &GrayImage, polarity: BoundaryPolarity, radius: u8) -> GrayImage {
    match polarity {
        BoundaryPolarity::DarkOnLight => imageproc::morphology::erode(image, Norm::LInf, radius),
        BoundaryPolarity::LightOnDark => imageproc::morphology::dilate(image, Norm::LInf, radius),
    }
}

/// Apply Canny edge detection
pub fn canny_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    imageproc::edges::canny(image, low_threshold, high_threshold)
}

/// Draw a line of discs with the given radius, clipped to the image
pub fn draw_thick_line<I>(
    img: &mut I,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    radius: i32,
    color: I::Pixel,
) where
    I: image::GenericImage,
{
    let (width, height) = (img.width() as i32, img.height() as i32);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        for oy in -radius..=radius {
            for ox in -radius..=radius {
                if ox * ox + oy * oy <= radius * radius {
                    let px = x + ox;
                    let py = y + oy;
                    if px >= 0 && px < width && py >= 0 && py < height {
                        img.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Horizontal wall 6 px thick with a door gap between x = 90 and 110
    fn wall_with_gap() -> GrayImage {
        let mut img = GrayImage::from_pixel(200, 100, Luma([255]));
        for y in 45..51 {
            for x in (20..90).chain(110..180) {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        img
    }

    #[test]
    fn test_threshold() {
        let mut img = GrayImage::new(10, 10);
        for x in 0..10 {
            for y in 0..10 {
                let value = if x < 5 { 100 } else { 200 };
                img.put_pixel(x, y, Luma([value]));
            }
        }

        let result = threshold(&img, 150);

        assert_eq!(result.get_pixel(0, 0).0[0], 0);
        assert_eq!(result.get_pixel(9, 0).0[0], 255);
    }

    #[test]
    fn test_thinning_removes_hairlines() {
        let mut img = GrayImage::from_pixel(20, 20, Luma([255]));
        for x in 2..18 {
            img.put_pixel(x, 10, Luma([0]));
        }

        let thinned = thin_boundaries(&img, BoundaryPolarity::DarkOnLight, 1);
        assert!(thinned.pixels().all(|p| p.0[0] == 255));

        let mut light = GrayImage::new(20, 20);
        for x in 2..18 {
            light.put_pixel(x, 10, Luma([255]));
        }
        let thinned = thin_boundaries(&light, BoundaryPolarity::LightOnDark, 1);
        assert!(thinned.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_thickening_grows_walls() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([255]));
        img.put_pixel(4, 4, Luma([0]));

        let thick = thicken_boundaries(&img, BoundaryPolarity::DarkOnLight, 1);
        assert_eq!(thick.get_pixel(3, 3).0[0], 0);
        assert_eq!(thick.get_pixel(5, 5).0[0], 0);
        assert_eq!(thick.get_pixel(2, 2).0[0], 255);
    }

    #[test]
    fn test_draw_thick_line_clips() {
        let mut img = GrayImage::from_pixel(10, 10, Luma([255]));
        draw_thick_line(&mut img, (-5, 5), (15, 5), 1, Luma([0]));

        assert_eq!(img.get_pixel(0, 5).0[0], 0);
        assert_eq!(img.get_pixel(9, 4).0[0], 0);
        assert_eq!(img.get_pixel(5, 2).0[0], 255);
    }

    #[test]
    fn test_preprocess_bridges_door_gap() {
        let closed = preprocess(&wall_with_gap(), &PreprocessConfig::default());

        assert!((40..57).any(|y| closed.get_pixel(100, y).0[0] == 0));
        // Open floor away from the wall stays empty
        assert_eq!(closed.get_pixel(100, 10).0[0], 255);
    }
}
