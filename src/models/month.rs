// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-month design state.
//!
//! A month owns a fixed row of photo slots, a layout choice, a background
//! color, sparse day markers, a default mask and an ordered list of stickers.
//! Partial updates are expressed with [`MonthUpdate`] and [`SlotUpdate`].

use super::filters::ImageFilters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Number of photo slots every month carries, whatever its layout.
pub const MAX_SLOTS: usize = 4;

/// Smallest allowed photo zoom, in percent.
pub const MIN_ZOOM: f64 = 10.0;

/// Smallest allowed sticker scale.
pub const MIN_STICKER_SCALE: f64 = 0.1;

/// Photo arrangement for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    Single,
    #[serde(rename = "grid-2")]
    Grid2,
    #[serde(rename = "grid-3")]
    Grid3,
    #[serde(rename = "grid-4")]
    Grid4,
    #[serde(rename = "masonry-3")]
    Masonry3,
    #[serde(rename = "masonry-4")]
    Masonry4,
}

impl LayoutType {
    pub const ALL: [LayoutType; 6] = [
        LayoutType::Single,
        LayoutType::Grid2,
        LayoutType::Grid3,
        LayoutType::Grid4,
        LayoutType::Masonry3,
        LayoutType::Masonry4,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LayoutType::Single => "single",
            LayoutType::Grid2 => "grid 2",
            LayoutType::Grid3 => "grid 3",
            LayoutType::Grid4 => "grid 4",
            LayoutType::Masonry3 => "masonry 3",
            LayoutType::Masonry4 => "masonry 4",
        }
    }
}

/// Clip shape applied to a photo region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskShape {
    None,
    Circle,
    Rounded,
    Squircle,
    #[serde(rename = "torn-1")]
    Torn1,
    #[serde(rename = "torn-2")]
    Torn2,
    #[serde(rename = "torn-3")]
    Torn3,
    #[serde(rename = "torn-4")]
    Torn4,
}

impl MaskShape {
    /// Choices offered as a month's default mask.
    pub const MONTH_DEFAULTS: [MaskShape; 5] = [
        MaskShape::None,
        MaskShape::Circle,
        MaskShape::Rounded,
        MaskShape::Squircle,
        MaskShape::Torn1,
    ];

    /// Choices offered as a per-slot override.
    pub const OVERRIDES: [MaskShape; 6] = [
        MaskShape::None,
        MaskShape::Torn1,
        MaskShape::Torn2,
        MaskShape::Torn3,
        MaskShape::Torn4,
        MaskShape::Circle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaskShape::None => "none",
            MaskShape::Circle => "circle",
            MaskShape::Rounded => "rounded",
            MaskShape::Squircle => "squircle",
            MaskShape::Torn1 => "rip 1",
            MaskShape::Torn2 => "rip 2",
            MaskShape::Torn3 => "rip 3",
            MaskShape::Torn4 => "rip 4",
        }
    }
}

/// A decoded image attached to a slot.
///
/// Pixels are shared by reference: history snapshots hold the same buffer
/// as the live document, and a source is never mutated once created.
#[derive(Debug, Clone)]
pub struct ImageSource {
    id: Uuid,
    name: String,
    pixels: Arc<image::RgbaImage>,
}

impl ImageSource {
    pub fn new(name: impl Into<String>, pixels: image::RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pixels: Arc::new(pixels),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixels(&self) -> &Arc<image::RgbaImage> {
        &self.pixels
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Aspect ratio (width / height), 1.0 for degenerate images.
    pub fn aspect(&self) -> f64 {
        let (w, h) = self.size();
        if w == 0 || h == 0 {
            1.0
        } else {
            w as f64 / h as f64
        }
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// One photo position within a month's layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSlot {
    pub image: Option<ImageSource>,
    /// Zoom in percent, never below [`MIN_ZOOM`].
    pub zoom: f64,
    /// Horizontal offset in percent of the region width.
    pub offset_x: f64,
    /// Vertical offset in percent of the region height.
    pub offset_y: f64,
    pub filters: ImageFilters,
    pub mask_override: Option<MaskShape>,
}

impl Default for PhotoSlot {
    fn default() -> Self {
        Self {
            image: None,
            zoom: 100.0,
            offset_x: 0.0,
            offset_y: 0.0,
            filters: ImageFilters::default(),
            mask_override: None,
        }
    }
}

/// Stable identity of a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickerId(Uuid);

impl StickerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A decorative icon placed on the photo area.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    pub id: StickerId,
    pub icon: String,
    /// Position in percent of the photo area; may leave [0, 100] when dragged.
    pub x: f64,
    pub y: f64,
    /// Scale factor, never below [`MIN_STICKER_SCALE`].
    pub scale: f64,
}

impl Sticker {
    /// A new sticker centred on the canvas at natural size.
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            id: StickerId::generate(),
            icon: icon.into(),
            x: 50.0,
            y: 50.0,
            scale: 1.0,
        }
    }
}

/// A note attached to a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Text(String),
    Icon(String),
}

/// Complete design state of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSettings {
    pub slots: Vec<PhotoSlot>,
    pub layout: LayoutType,
    pub bg_color: String,
    /// Markers keyed by day of month (1..=31).
    pub markers: BTreeMap<u32, Marker>,
    pub mask: MaskShape,
    pub stickers: Vec<Sticker>,
}

impl Default for MonthSettings {
    fn default() -> Self {
        Self {
            slots: vec![PhotoSlot::default(); MAX_SLOTS],
            layout: LayoutType::Single,
            bg_color: "#FFFFFF".to_string(),
            markers: BTreeMap::new(),
            mask: MaskShape::Torn1,
            stickers: Vec::new(),
        }
    }
}

impl MonthSettings {
    /// A blank month with the given layout, background and default mask.
    pub fn with_defaults(layout: LayoutType, bg_color: impl Into<String>, mask: MaskShape) -> Self {
        Self {
            layout,
            bg_color: bg_color.into(),
            mask,
            ..Self::default()
        }
    }

    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }
}

/// Partial replacement of a month's fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthUpdate {
    pub slots: Option<Vec<PhotoSlot>>,
    pub layout: Option<LayoutType>,
    pub bg_color: Option<String>,
    pub markers: Option<BTreeMap<u32, Marker>>,
    pub mask: Option<MaskShape>,
    pub stickers: Option<Vec<Sticker>>,
}

impl MonthUpdate {
    pub fn slots(slots: Vec<PhotoSlot>) -> Self {
        Self { slots: Some(slots), ..Self::default() }
    }

    pub fn layout(layout: LayoutType) -> Self {
        Self { layout: Some(layout), ..Self::default() }
    }

    pub fn bg_color(color: impl Into<String>) -> Self {
        Self { bg_color: Some(color.into()), ..Self::default() }
    }

    pub fn markers(markers: BTreeMap<u32, Marker>) -> Self {
        Self { markers: Some(markers), ..Self::default() }
    }

    pub fn mask(mask: MaskShape) -> Self {
        Self { mask: Some(mask), ..Self::default() }
    }

    pub fn stickers(stickers: Vec<Sticker>) -> Self {
        Self { stickers: Some(stickers), ..Self::default() }
    }

    pub fn apply(self, month: &mut MonthSettings) {
        if let Some(slots) = self.slots {
            month.slots = slots;
        }
        if let Some(layout) = self.layout {
            month.layout = layout;
        }
        if let Some(bg_color) = self.bg_color {
            month.bg_color = bg_color;
        }
        if let Some(markers) = self.markers {
            month.markers = markers;
        }
        if let Some(mask) = self.mask {
            month.mask = mask;
        }
        if let Some(stickers) = self.stickers {
            month.stickers = stickers;
        }
    }
}

/// Partial replacement of a slot's fields; `None` leaves a field untouched.
///
/// `image` and `mask_override` are doubly optional: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotUpdate {
    pub image: Option<Option<ImageSource>>,
    pub zoom: Option<f64>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub filters: Option<ImageFilters>,
    pub mask_override: Option<Option<MaskShape>>,
}

impl SlotUpdate {
    pub fn image(image: Option<ImageSource>) -> Self {
        Self { image: Some(image), ..Self::default() }
    }

    pub fn offset(x: f64, y: f64) -> Self {
        Self {
            offset_x: Some(x),
            offset_y: Some(y),
            ..Self::default()
        }
    }

    pub fn zoom(zoom: f64) -> Self {
        Self { zoom: Some(zoom), ..Self::default() }
    }

    pub fn filters(filters: ImageFilters) -> Self {
        Self { filters: Some(filters), ..Self::default() }
    }

    pub fn mask_override(mask: Option<MaskShape>) -> Self {
        Self { mask_override: Some(mask), ..Self::default() }
    }

    /// Merge into `slot`, returning the new slot. Zoom and filters are clamped.
    pub fn merge(self, slot: &PhotoSlot) -> PhotoSlot {
        let mut next = slot.clone();
        if let Some(image) = self.image {
            next.image = image;
        }
        if let Some(zoom) = self.zoom {
            next.zoom = zoom.max(MIN_ZOOM);
        }
        if let Some(x) = self.offset_x {
            next.offset_x = x;
        }
        if let Some(y) = self.offset_y {
            next.offset_y = y;
        }
        if let Some(filters) = self.filters {
            next.filters = filters.clamped();
        }
        if let Some(mask) = self.mask_override {
            next.mask_override = mask;
        }
        next
    }
}
