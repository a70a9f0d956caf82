// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-slot image adjustment parameters.
//!
//! All values are integer percentages. Each field has its own slider range;
//! values are clamped into that range when merged into a slot.

/// Raw adjustment values for one photo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageFilters {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub grayscale: i32,
    pub black_point: i32,
    pub white_point: i32,
}

impl Default for ImageFilters {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 100,
            saturation: 100,
            grayscale: 0,
            black_point: 0,
            white_point: 0,
        }
    }
}

/// One adjustable field of [`ImageFilters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Brightness,
    Contrast,
    BlackPoint,
    WhitePoint,
    Saturation,
    Grayscale,
}

impl FilterField {
    /// Fields in side-panel order.
    pub const ALL: [FilterField; 6] = [
        FilterField::Brightness,
        FilterField::Contrast,
        FilterField::BlackPoint,
        FilterField::WhitePoint,
        FilterField::Saturation,
        FilterField::Grayscale,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Brightness => "Brightness",
            FilterField::Contrast => "Contrast",
            FilterField::BlackPoint => "Black Point",
            FilterField::WhitePoint => "White Point",
            FilterField::Saturation => "Saturation",
            FilterField::Grayscale => "Grayscale",
        }
    }

    /// Inclusive slider range for this field.
    pub fn range(self) -> (i32, i32) {
        match self {
            FilterField::Brightness | FilterField::Contrast | FilterField::Saturation => (0, 200),
            FilterField::BlackPoint | FilterField::WhitePoint | FilterField::Grayscale => (0, 100),
        }
    }
}

impl ImageFilters {
    pub fn get(&self, field: FilterField) -> i32 {
        match field {
            FilterField::Brightness => self.brightness,
            FilterField::Contrast => self.contrast,
            FilterField::BlackPoint => self.black_point,
            FilterField::WhitePoint => self.white_point,
            FilterField::Saturation => self.saturation,
            FilterField::Grayscale => self.grayscale,
        }
    }

    /// Return a copy with `field` set to `value`.
    pub fn with(mut self, field: FilterField, value: i32) -> Self {
        let slot = match field {
            FilterField::Brightness => &mut self.brightness,
            FilterField::Contrast => &mut self.contrast,
            FilterField::BlackPoint => &mut self.black_point,
            FilterField::WhitePoint => &mut self.white_point,
            FilterField::Saturation => &mut self.saturation,
            FilterField::Grayscale => &mut self.grayscale,
        };
        *slot = value;
        self
    }

    /// Clamp every field into its slider range.
    pub fn clamped(self) -> Self {
        FilterField::ALL.iter().fold(self, |acc, &field| {
            let (min, max) = field.range();
            acc.with(field, acc.get(field).clamp(min, max))
        })
    }
}
