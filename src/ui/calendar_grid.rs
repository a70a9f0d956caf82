// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Day grid drawn under the photo collage.
//!
//! Monday-first weekday header, one cell per grid entry, markers rendered
//! under the day number. Clicking a day reports it so the marker editor can
//! open.

use super::icons::IconResolver;
use crate::models::month::Marker;
use crate::util::calendar::WEEK_DAYS;
use egui::{Align2, Color32, FontFamily, FontId, Rect, Sense, Stroke};
use std::collections::BTreeMap;

/// Visual parameters shared with the rest of the page.
pub struct GridStyle {
    pub font: FontFamily,
    pub ink: Color32,
    /// Page scale relative to the reference width
    pub scale: f32,
}

/// Draw the grid inside `rect`. Returns the day clicked this frame, if any.
pub fn show(
    ui: &mut egui::Ui,
    rect: Rect,
    grid: &[Option<u32>],
    markers: &BTreeMap<u32, Marker>,
    style: &GridStyle,
    icons: &dyn IconResolver,
) -> Option<u32> {
    let painter = ui.painter_at(rect);
    let s = style.scale;
    let mut clicked = None;

    // Weekday header
    let header_height = 24.0 * s;
    let column_width = rect.width() / 7.0;
    for (i, name) in WEEK_DAYS.iter().enumerate() {
        let center = egui::pos2(
            rect.min.x + column_width * (i as f32 + 0.5),
            rect.min.y + header_height / 2.0,
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            name.to_uppercase(),
            FontId::new(12.0 * s, style.font.clone()),
            style.ink.gamma_multiply(0.3),
        );
    }

    let body_top = rect.min.y + header_height * 2.0;
    let rows = (grid.len().div_ceil(7)).max(6);
    let row_height = (rect.max.y - body_top) / rows as f32;
    if row_height <= 0.0 {
        return None;
    }

    for (idx, cell) in grid.iter().enumerate() {
        let Some(day) = *cell else {
            continue;
        };
        let col = (idx % 7) as f32;
        let row = (idx / 7) as f32;
        let cell_rect = Rect::from_min_size(
            egui::pos2(rect.min.x + col * column_width, body_top + row * row_height),
            egui::vec2(column_width, row_height),
        );

        let response = ui.interact(cell_rect, ui.id().with(("day", day)), Sense::click());
        if response.hovered() {
            painter.rect_filled(cell_rect, 0.0, style.ink.gamma_multiply(0.04));
        }
        painter.rect_stroke(cell_rect, 0.0, Stroke::new(1.0, style.ink.gamma_multiply(0.05)));

        let number_size = (row_height * 0.5).min(48.0 * s);
        let number_pos = egui::pos2(cell_rect.center().x, cell_rect.min.y + 4.0 * s);
        painter.text(
            number_pos,
            Align2::CENTER_TOP,
            day.to_string(),
            FontId::new(number_size, style.font.clone()),
            style.ink,
        );

        if let Some(marker) = markers.get(&day) {
            let marker_pos = egui::pos2(cell_rect.center().x, number_pos.y + number_size + 2.0 * s);
            paint_marker(&ui.painter_at(cell_rect), marker, marker_pos, style, icons);
        }

        if response.clicked() {
            clicked = Some(day);
        }
    }

    clicked
}

fn paint_marker(
    painter: &egui::Painter,
    marker: &Marker,
    pos: egui::Pos2,
    style: &GridStyle,
    icons: &dyn IconResolver,
) {
    let s = style.scale;
    match marker {
        Marker::Text(value) => {
            let galley = painter.layout_no_wrap(
                value.to_uppercase(),
                FontId::new(12.0 * s, style.font.clone()),
                style.ink.gamma_multiply(0.9),
            );
            let rect = Align2::CENTER_TOP.anchor_size(pos, galley.size()).expand(2.0 * s);
            painter.rect_filled(rect, 2.0 * s, style.ink.gamma_multiply(0.1));
            painter.galley(rect.min + egui::vec2(2.0 * s, 2.0 * s), galley, style.ink);
        }
        Marker::Icon(icon) => {
            if let Some(glyph) = icons.glyph(icon) {
                painter.text(
                    pos,
                    Align2::CENTER_TOP,
                    glyph,
                    FontId::proportional(24.0 * s),
                    style.ink.gamma_multiply(0.9),
                );
            }
        }
    }
}
