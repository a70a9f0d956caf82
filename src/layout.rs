// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo layout engine.
//!
//! Declares, for each [`LayoutType`], which slot sits in which grid region
//! and which mask clips it. Nothing here knows about pixels: regions are
//! expressed in grid cells or canvas fractions and the canvas turns them into
//! rectangles.
//!
//! Mask resolution is a two-level lookup done only here: the slot's own
//! override if set, otherwise the month's default.

use crate::models::month::{LayoutType, MaskShape, MonthSettings};

/// Where a region sits inside its layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A span of grid cells. `height` is the fraction of the spanned height
    /// actually used, measured from the top.
    Cell {
        col: u8,
        row: u8,
        col_span: u8,
        row_span: u8,
        height: f32,
    },
    /// Pinned to the bottom-right corner of the whole area, drawn above the
    /// grid, sized as fractions of the area.
    OverlayBottomRight { width: f32, height: f32 },
}

const fn cell(col: u8, row: u8, col_span: u8, row_span: u8) -> Placement {
    Placement::Cell {
        col,
        row,
        col_span,
        row_span,
        height: 1.0,
    }
}

/// A slot bound to a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub slot: usize,
    pub placement: Placement,
}

/// Grid dimensions plus the regions laid on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGrid {
    pub columns: u8,
    pub rows: u8,
    pub regions: &'static [Region],
}

static SINGLE: [Region; 1] = [Region { slot: 0, placement: cell(0, 0, 1, 1) }];

static GRID_2: [Region; 2] = [
    Region { slot: 0, placement: cell(0, 0, 1, 1) },
    Region { slot: 1, placement: cell(1, 0, 1, 1) },
];

static GRID_3: [Region; 3] = [
    Region { slot: 0, placement: cell(0, 0, 1, 2) },
    Region { slot: 1, placement: cell(1, 0, 1, 1) },
    Region { slot: 2, placement: cell(1, 1, 1, 1) },
];

static GRID_4: [Region; 4] = [
    Region { slot: 0, placement: cell(0, 0, 1, 1) },
    Region { slot: 1, placement: cell(1, 0, 1, 1) },
    Region { slot: 2, placement: cell(0, 1, 1, 1) },
    Region { slot: 3, placement: cell(1, 1, 1, 1) },
];

static MASONRY_3: [Region; 3] = [
    Region { slot: 0, placement: cell(0, 0, 2, 1) },
    Region {
        slot: 1,
        placement: Placement::Cell {
            col: 2,
            row: 0,
            col_span: 1,
            row_span: 1,
            height: 0.5,
        },
    },
    Region {
        slot: 2,
        placement: Placement::OverlayBottomRight {
            width: 1.0 / 3.0,
            height: 0.5,
        },
    },
];

static MASONRY_4: [Region; 4] = [
    Region { slot: 0, placement: cell(0, 0, 2, 2) },
    Region { slot: 1, placement: cell(2, 0, 2, 1) },
    Region { slot: 2, placement: cell(2, 1, 1, 1) },
    Region { slot: 3, placement: cell(3, 1, 1, 1) },
];

impl LayoutType {
    pub fn grid(self) -> LayoutGrid {
        match self {
            LayoutType::Single => LayoutGrid { columns: 1, rows: 1, regions: &SINGLE },
            LayoutType::Grid2 => LayoutGrid { columns: 2, rows: 1, regions: &GRID_2 },
            LayoutType::Grid3 => LayoutGrid { columns: 2, rows: 2, regions: &GRID_3 },
            LayoutType::Grid4 => LayoutGrid { columns: 2, rows: 2, regions: &GRID_4 },
            LayoutType::Masonry3 => LayoutGrid { columns: 3, rows: 1, regions: &MASONRY_3 },
            LayoutType::Masonry4 => LayoutGrid { columns: 4, rows: 2, regions: &MASONRY_4 },
        }
    }

    /// Number of slots this layout shows.
    pub fn slot_count(self) -> usize {
        self.grid().regions.len()
    }
}

/// How a mask clips its region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskClip {
    Square,
    Ellipse,
    /// Corner radius in logical pixels.
    RoundedPx(f32),
    /// Corner radius as a fraction of each side.
    RoundedFraction(f32),
    /// Outline in percent of the region, clockwise from the top-left.
    Polygon(&'static [[f32; 2]]),
}

static TORN_1: [[f32; 2]; 16] = [
    [0.0, 0.0], [15.0, 4.0], [25.0, 1.0], [40.0, 6.0], [55.0, 2.0], [70.0, 8.0], [85.0, 3.0],
    [100.0, 5.0], [100.0, 100.0], [85.0, 94.0], [75.0, 98.0], [60.0, 92.0], [45.0, 97.0],
    [30.0, 93.0], [15.0, 99.0], [0.0, 95.0],
];

static TORN_2: [[f32; 2]; 6] = [
    [4.0, 0.0], [96.0, 2.0], [100.0, 94.0], [92.0, 100.0], [8.0, 98.0], [0.0, 6.0],
];

static TORN_3: [[f32; 2]; 8] = [
    [0.0, 12.0], [18.0, 0.0], [82.0, 4.0], [100.0, 16.0], [95.0, 88.0], [78.0, 100.0],
    [22.0, 96.0], [5.0, 82.0],
];

static TORN_4: [[f32; 2]; 6] = [
    [12.0, 0.0], [88.0, 0.0], [100.0, 40.0], [85.0, 100.0], [15.0, 100.0], [0.0, 40.0],
];

impl MaskShape {
    pub fn clip(self) -> MaskClip {
        match self {
            MaskShape::None => MaskClip::Square,
            MaskShape::Circle => MaskClip::Ellipse,
            MaskShape::Rounded => MaskClip::RoundedPx(24.0),
            MaskShape::Squircle => MaskClip::RoundedFraction(0.35),
            MaskShape::Torn1 => MaskClip::Polygon(&TORN_1),
            MaskShape::Torn2 => MaskClip::Polygon(&TORN_2),
            MaskShape::Torn3 => MaskClip::Polygon(&TORN_3),
            MaskShape::Torn4 => MaskClip::Polygon(&TORN_4),
        }
    }
}

/// A region with its slot's effective mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRegion {
    pub slot: usize,
    pub placement: Placement,
    pub mask: MaskShape,
}

/// The slot's override if set, else the month default.
pub fn effective_mask(month: &MonthSettings, slot: usize) -> MaskShape {
    month
        .slots
        .get(slot)
        .and_then(|s| s.mask_override)
        .unwrap_or(month.mask)
}

/// Regions of the month's layout, in paint order, with masks resolved.
pub fn resolve(month: &MonthSettings) -> Vec<ResolvedRegion> {
    month
        .layout
        .grid()
        .regions
        .iter()
        .filter(|region| region.slot < month.slots.len())
        .map(|region| ResolvedRegion {
            slot: region.slot,
            placement: region.placement,
            mask: effective_mask(month, region.slot),
        })
        .collect()
}
