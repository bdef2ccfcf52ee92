// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editable room geometry from segmented floor plan images
//!
//! This crate provides:
//! 1. Raster cleanup that closes gaps in room boundaries
//! 2. Room detection as closed contours, minus the image border and floor outline
//! 3. A registry of named rooms with their real-world dimensions
//! 4. Single-axis room resizing that offers two wall-anchored candidates
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan_rooms::{
//!     commit, extract, preprocess, propose_resize, Axis, Choice, ExtractionConfig,
//!     PreprocessConfig, RoomMetadata, RoomRegistry,
//! };
//!
//! let closed = preprocess(&grayscale, &PreprocessConfig::default());
//! let extraction = extract(&closed, &ExtractionConfig::default());
//!
//! let metadata = vec![RoomMetadata::new("kitchen", 4.0, 3.0)];
//! let mut registry = RoomRegistry::build(extraction.rooms, metadata)?;
//!
//! let candidate = propose_resize(&registry, "kitchen", Axis::X, 5.0)?;
//! commit(&mut registry, "kitchen", Choice::A, candidate)?;
//! ```

pub mod config;
pub mod contour_scaler;
pub mod edit_session;
pub mod error;
pub mod image_ops;
pub mod line_ops;
pub mod region_extractor;
pub mod registry;
pub mod render;
pub mod types;

pub use config::{BoundaryPolarity, ExtractionConfig, PreprocessConfig};
pub use contour_scaler::{centroid, scale};
pub use edit_session::{commit, propose_resize, Choice, EditCandidate};
pub use error::{Result, RoomError};
pub use image_ops::preprocess;
pub use region_extractor::{extract, select_rooms, Extraction};
pub use registry::{Room, RoomMetadata, RoomRegistry};
pub use types::{Axis, BoundingBox, PixelPoint, Polygon};

use image::GrayImage;

/// Preprocess a grayscale plan and extract its rooms in one call
///
/// The extraction uses the polarity and threshold of `config`.
pub fn detect_rooms(
    grayscale: &GrayImage,
    config: &PreprocessConfig,
    min_room_area: f64,
) -> Extraction {
    let closed = preprocess(grayscale, config);
    let extraction_config = ExtractionConfig {
        min_room_area,
        ..config.extraction_config()
    };
    extract(&closed, &extraction_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn create_simple_floor_plan_image() -> GrayImage {
        let mut img = GrayImage::from_pixel(200, 200, Luma([255]));

        let mut fill = |xs: std::ops::Range<u32>, ys: std::ops::Range<u32>| {
            for x in xs {
                for y in ys.clone() {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        };
        // Outer walls
        fill(20..180, 20..28);
        fill(20..180, 172..180);
        fill(20..28, 20..180);
        fill(172..180, 20..180);
        // Interior wall
        fill(96..104, 20..180);

        img
    }

    #[test]
    fn test_full_pipeline() {
        let img = create_simple_floor_plan_image();
        let extraction = detect_rooms(&img, &PreprocessConfig::default(), 1000.0);

        assert_eq!(extraction.rooms.len(), 2, "Should detect both rooms");
        assert!(extraction.floor_outline.is_some());
        assert!(extraction.rooms[0].bounding_box().x < extraction.rooms[1].bounding_box().x);
    }
}
