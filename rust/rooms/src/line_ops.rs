// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight segment detection used to close gaps in room boundaries

use crate::types::PixelPoint;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Maximum number of accumulator peaks turned into segments
const MAX_PEAKS: usize = 500;

/// A detected straight segment in pixel coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

impl Segment {
    pub fn length(&self) -> f64 {
        let dx = (self.end.x - self.start.x) as f64;
        let dy = (self.end.y - self.start.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Detect segments in an edge image with a probabilistic Hough transform.
///
/// Edge points voting for the same (rho, theta) cell are ordered along the
/// line and split wherever two neighbours are more than `max_line_gap`
/// apart. Runs shorter than `min_line_length` are dropped. Every edge point
/// contributes to at most one segment.
pub fn detect_segments(
    edges: &GrayImage,
    threshold: u32,
    min_line_length: f64,
    max_line_gap: f64,
) -> Vec<Segment> {
    let width = edges.width() as i32;
    let height = edges.height() as i32;

    let num_thetas = 180;
    let theta_step = PI / num_thetas as f64;
    let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..num_thetas)
        .map(|i| {
            let theta = i as f64 * theta_step;
            (theta.cos(), theta.sin())
        })
        .unzip();

    let max_rho = ((width * width + height * height) as f64).sqrt();
    let num_rhos = (2.0 * max_rho) as usize + 1;

    let edge_points: Vec<(i32, i32)> = edges
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] > 128)
        .map(|(x, y, _)| (x as i32, y as i32))
        .collect();

    let mut accumulator = vec![0u32; num_thetas * num_rhos];
    for &(x, y) in &edge_points {
        for t in 0..num_thetas {
            let rho = x as f64 * cos_table[t] + y as f64 * sin_table[t];
            let r = (rho + max_rho) as usize;
            if r < num_rhos {
                accumulator[t * num_rhos + r] += 1;
            }
        }
    }

    let mut peaks: Vec<(usize, usize, u32)> = accumulator
        .iter()
        .enumerate()
        .filter(|(_, &votes)| votes >= threshold)
        .map(|(i, &votes)| (i / num_rhos, i % num_rhos, votes))
        .collect();
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    let mut used = vec![false; edge_points.len()];
    let mut segments = Vec::new();

    for &(t, r, _) in peaks.iter().take(MAX_PEAKS) {
        let rho = r as f64 - max_rho;
        let (cos_t, sin_t) = (cos_table[t], sin_table[t]);

        let mut on_line: Vec<usize> = (0..edge_points.len())
            .filter(|&i| {
                let (x, y) = edge_points[i];
                !used[i] && (x as f64 * cos_t + y as f64 * sin_t - rho).abs() < 2.0
            })
            .collect();
        if on_line.len() < 2 {
            continue;
        }

        let along = |i: usize| {
            let (x, y) = edge_points[i];
            -(x as f64) * sin_t + y as f64 * cos_t
        };
        on_line.sort_by(|&a, &b| along(a).total_cmp(&along(b)));

        let mut run_start = 0;
        for k in 1..=on_line.len() {
            let split = k == on_line.len() || {
                let (x0, y0) = edge_points[on_line[k - 1]];
                let (x1, y1) = edge_points[on_line[k]];
                let (dx, dy) = ((x1 - x0) as f64, (y1 - y0) as f64);
                (dx * dx + dy * dy).sqrt() > max_line_gap
            };
            if !split {
                continue;
            }

            let run = &on_line[run_start..k];
            if run.len() >= 2 {
                let (sx, sy) = edge_points[run[0]];
                let (ex, ey) = edge_points[run[run.len() - 1]];
                let segment = Segment {
                    start: PixelPoint::new(sx, sy),
                    end: PixelPoint::new(ex, ey),
                };
                if segment.length() >= min_line_length {
                    for &i in run {
                        used[i] = true;
                    }
                    segments.push(segment);
                }
            }
            run_start = k;
        }
    }

    tracing::debug!(
        edge_points = edge_points.len(),
        segments = segments.len(),
        "Detected closing segments"
    );
    segments
}
