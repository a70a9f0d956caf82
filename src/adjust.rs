// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image adjustment pipeline.
//!
//! Maps a slot's raw [`ImageFilters`] to the four filter-primitive amounts
//! (brightness, contrast, saturate, grayscale). Black and white points are
//! folded into brightness and contrast:
//!
//! ```text
//! brightness = raw_brightness - black/100 * 50 + white/100 * 50
//! contrast   = raw_contrast   + black/100 * 50 + white/100 * 50
//! ```
//!
//! This is an approximation of a levels remap, kept numerically exact so the
//! same sliders always give the same picture. [`apply_to_image`] evaluates
//! the expression on RGBA pixels with the usual filter-effects semantics.

use crate::models::filters::ImageFilters;
use image::RgbaImage;
use std::fmt;

/// Resolved filter primitive amounts, all in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterExpression {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub grayscale: f64,
}

impl FilterExpression {
    pub fn from_filters(filters: &ImageFilters) -> Self {
        let black = filters.black_point as f64 / 100.0;
        let white = filters.white_point as f64 / 100.0;
        Self {
            brightness: filters.brightness as f64 - black * 50.0 + white * 50.0,
            contrast: filters.contrast as f64 + black * 50.0 + white * 50.0,
            saturation: filters.saturation as f64,
            grayscale: filters.grayscale as f64,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.brightness == 100.0
            && self.contrast == 100.0
            && self.saturation == 100.0
            && self.grayscale == 0.0
    }
}

impl From<&ImageFilters> for FilterExpression {
    fn from(filters: &ImageFilters) -> Self {
        Self::from_filters(filters)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brightness({}%) contrast({}%) saturate({}%) grayscale({}%)",
            self.brightness, self.contrast, self.saturation, self.grayscale
        )
    }
}

// Rec. 709 luma weights used by the saturate matrix
const SAT_R: f32 = 0.213;
const SAT_G: f32 = 0.715;
const SAT_B: f32 = 0.072;

// Luma weights used by the grayscale matrix
const GRAY_R: f32 = 0.2126;
const GRAY_G: f32 = 0.7152;
const GRAY_B: f32 = 0.0722;

type Matrix = [[f32; 3]; 3];

fn saturate_matrix(s: f32) -> Matrix {
    [
        [SAT_R + (1.0 - SAT_R) * s, SAT_G - SAT_G * s, SAT_B - SAT_B * s],
        [SAT_R - SAT_R * s, SAT_G + (1.0 - SAT_G) * s, SAT_B - SAT_B * s],
        [SAT_R - SAT_R * s, SAT_G - SAT_G * s, SAT_B + (1.0 - SAT_B) * s],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let a = 1.0 - amount.clamp(0.0, 1.0);
    [
        [GRAY_R + (1.0 - GRAY_R) * a, GRAY_G - GRAY_G * a, GRAY_B - GRAY_B * a],
        [GRAY_R - GRAY_R * a, GRAY_G + (1.0 - GRAY_G) * a, GRAY_B - GRAY_B * a],
        [GRAY_R - GRAY_R * a, GRAY_G - GRAY_G * a, GRAY_B + (1.0 - GRAY_B) * a],
    ]
}

fn apply_matrix(m: &Matrix, c: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (row, value) in m.iter().zip(out.iter_mut()) {
        *value = (row[0] * c[0] + row[1] * c[1] + row[2] * c[2]).clamp(0.0, 1.0);
    }
    out
}

/// Apply the expression to one linear-in-sRGB color, channels in [0, 1].
pub fn apply_to_rgb(expr: &FilterExpression, rgb: [f32; 3]) -> [f32; 3] {
    let brightness = (expr.brightness / 100.0).max(0.0) as f32;
    let contrast = (expr.contrast / 100.0).max(0.0) as f32;

    let mut c = rgb.map(|v| (v * brightness).clamp(0.0, 1.0));
    c = c.map(|v| ((v - 0.5) * contrast + 0.5).clamp(0.0, 1.0));
    c = apply_matrix(&saturate_matrix((expr.saturation / 100.0).max(0.0) as f32), c);
    apply_matrix(&grayscale_matrix((expr.grayscale / 100.0) as f32), c)
}

/// Render the expression into a new image. Alpha is preserved.
pub fn apply_to_image(expr: &FilterExpression, source: &RgbaImage) -> RgbaImage {
    let mut out = source.clone();
    if expr.is_identity() {
        return out;
    }
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let rgb = [r, g, b].map(|v| v as f32 / 255.0);
        let [r, g, b] = apply_to_rgb(expr, rgb).map(|v| (v * 255.0).round() as u8);
        pixel.0 = [r, g, b, a];
    }
    out
}
