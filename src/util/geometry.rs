// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for converting screen-space pointer deltas
//! into canvas percentages, and for clipping mask outlines to rectangles.

/// A 2D point in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    pub fn delta_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Pixel dimensions of the element a sticker is positioned in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Convert a pixel delta into percent of the canvas dimensions.
///
/// Returns `None` for an empty canvas.
pub fn delta_to_percent(dx: f64, dy: f64, canvas: CanvasSize) -> Option<(f64, f64)> {
    if canvas.is_empty() {
        return None;
    }
    Some((dx / canvas.width * 100.0, dy / canvas.height * 100.0))
}

/// Clip a polygon against an axis-aligned rectangle (Sutherland-Hodgman).
///
/// Points are `[x, y]`; `min`/`max` are the rectangle corners.
pub fn clip_polygon_to_rect(points: &[[f32; 2]], min: [f32; 2], max: [f32; 2]) -> Vec<[f32; 2]> {
    let mut output = points.to_vec();
    // (axis, bound, keep when coordinate >= bound)
    let edges = [(0, min[0], true), (0, max[0], false), (1, min[1], true), (1, max[1], false)];

    for (axis, bound, keep_greater) in edges {
        let input = std::mem::take(&mut output);
        if input.is_empty() {
            break;
        }
        let inside = |p: &[f32; 2]| {
            if keep_greater {
                p[axis] >= bound
            } else {
                p[axis] <= bound
            }
        };
        let intersect = |a: &[f32; 2], b: &[f32; 2]| {
            let t = (bound - a[axis]) / (b[axis] - a[axis]);
            let mut p = [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t];
            p[axis] = bound;
            p
        };

        for i in 0..input.len() {
            let current = &input[i];
            let previous = &input[(i + input.len() - 1) % input.len()];
            match (inside(previous), inside(current)) {
                (true, true) => output.push(*current),
                (true, false) => output.push(intersect(previous, current)),
                (false, true) => {
                    output.push(intersect(previous, current));
                    output.push(*current);
                }
                (false, false) => {}
            }
        }
    }
    output
}

/// Arithmetic mean of the points, used as a triangle-fan hub.
pub fn centroid(points: &[[f32; 2]]) -> Option<[f32; 2]> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    Some([sx / n, sy / n])
}
