// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for preprocessing and region extraction

use serde::{Deserialize, Serialize};

/// Intensity of the room boundaries in the input raster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BoundaryPolarity {
    /// Dark walls drawn on a light background
    #[default]
    DarkOnLight,
    /// Light walls drawn on a dark background
    LightOnDark,
}

impl BoundaryPolarity {
    /// Pixel value used when drawing boundaries in a binary image
    pub fn boundary_value(&self) -> u8 {
        match self {
            BoundaryPolarity::DarkOnLight => 0,
            BoundaryPolarity::LightOnDark => 255,
        }
    }

    /// Pixel value of the space between boundaries
    pub fn background_value(&self) -> u8 {
        255 - self.boundary_value()
    }
}

/// Configuration for the region extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Boundary intensity of the input
    pub polarity: BoundaryPolarity,
    /// Gray level separating boundary from interior
    pub threshold: u8,
    /// Minimum room area in square pixels (0 keeps every curve)
    pub min_room_area: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            polarity: BoundaryPolarity::DarkOnLight,
            threshold: 127,
            min_room_area: 0.0,
        }
    }
}

/// Configuration for the raster cleanup that precedes extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Boundary intensity of the input
    pub polarity: BoundaryPolarity,
    /// Gray level for the initial black/white conversion
    pub threshold: u8,
    /// Radius of the min/max filter window (1 = 3x3)
    pub filter_radius: u8,
    /// Passes that thin boundaries, removing text and fixtures
    pub thinning_passes: u32,
    /// Passes that thicken the surviving boundaries again
    pub thickening_passes: u32,
    /// Canny edge detection low threshold
    pub canny_low: f32,
    /// Canny edge detection high threshold
    pub canny_high: f32,
    /// Hough line detection vote threshold
    pub hough_threshold: u32,
    /// Minimum segment length in pixels (0 keeps every run)
    pub min_line_length: f64,
    /// Maximum gap between collinear edge points of one segment
    pub max_line_gap: f64,
    /// Thickness used to draw closing segments
    pub closing_line_thickness: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            polarity: BoundaryPolarity::DarkOnLight,
            threshold: 127,
            filter_radius: 1,
            thinning_passes: 2,
            thickening_passes: 1,
            canny_low: 75.0,
            canny_high: 150.0,
            hough_threshold: 50,
            min_line_length: 0.0,
            max_line_gap: 300.0,
            closing_line_thickness: 5,
        }
    }
}

impl PreprocessConfig {
    /// Extraction settings that agree with this preprocessing
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            polarity: self.polarity,
            threshold: self.threshold,
            ..Default::default()
        }
    }
}
