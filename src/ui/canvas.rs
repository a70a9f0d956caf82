// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The printable page: photo collage on top, day grid below.
//!
//! This module turns the layout engine's declarative regions into screen
//! rectangles, draws each photo clipped to its mask, draws stickers, and
//! reports pointer presses as [`CanvasAction`]s. Pointer moves and releases
//! are read globally by the app, not here.

use super::calendar_grid::{self, GridStyle};
use super::icons::IconResolver;
use super::textures::TextureCache;
use super::{ink_for_background, parse_hex_color};
use crate::interaction::drag::{DragMode, DragTarget};
use crate::layout::{self, LayoutGrid, MaskClip, Placement, ResolvedRegion};
use crate::models::month::{MonthSettings, PhotoSlot, Sticker, StickerId};
use crate::util::calendar::MONTH_NAMES;
use crate::util::geometry::{centroid, clip_polygon_to_rect, Point};
use egui::{Align2, Color32, FontFamily, FontId, Pos2, Rect, Sense, Stroke, Vec2};

/// Page width over height (A-series portrait).
pub const PAGE_ASPECT: f32 = 297.0 / 420.0;

/// Page width all pixel sizes below are specified against.
const REFERENCE_WIDTH: f32 = 900.0;
const PHOTO_AREA_FRACTION: f32 = 0.65;
const SLOT_PADDING: f32 = 8.0;
const SLOT_GAP: f32 = 8.0;
const SLOT_FILL: Color32 = Color32::from_rgb(0xE5, 0xE5, 0xE5);
const STICKER_SIZE: f32 = 128.0;
const TRANSITION_SECS: f32 = 0.4;
const ELLIPSE_SEGMENTS: usize = 48;
const CORNER_SEGMENTS: usize = 8;

/// (fill, glyph) colors of the hover buttons
const DARK_BUTTON: (Color32, Color32) = (Color32::BLACK, Color32::WHITE);
const LIGHT_BUTTON: (Color32, Color32) = (Color32::WHITE, Color32::BLACK);

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    None,
    Press {
        target: DragTarget,
        mode: DragMode,
        pos: Point,
    },
    SelectSlot(usize),
    Upload(usize),
    ClearImage(usize),
    RemoveSticker(StickerId),
    EditDay(u32),
}

/// Everything the canvas needs to draw one month.
pub struct CanvasView<'a> {
    pub month_index: usize,
    pub month: &'a MonthSettings,
    pub grid: &'a [Option<u32>],
    pub year: i32,
    pub selected_slot: usize,
    pub animate: bool,
    pub font: FontFamily,
}

pub struct CanvasResponse {
    pub action: CanvasAction,
    /// Screen rectangle of the photo area; stickers are positioned in it
    pub photo_area: Rect,
}

/// Display the page and handle pointer presses on it.
pub fn show(
    ui: &mut egui::Ui,
    view: &CanvasView<'_>,
    textures: &mut TextureCache,
    icons: &dyn IconResolver,
) -> CanvasResponse {
    let mut action = CanvasAction::None;
    let available = ui.available_size();
    let (full_rect, _) = ui.allocate_exact_size(available, Sense::hover());

    // Fit the page inside the available space
    let available_aspect = available.x / available.y.max(1.0);
    let (page_width, page_height) = if PAGE_ASPECT > available_aspect {
        (available.x, available.x / PAGE_ASPECT)
    } else {
        (available.y * PAGE_ASPECT, available.y)
    };
    let page = Rect::from_center_size(full_rect.center(), egui::vec2(page_width, page_height));
    let s = page.width() / REFERENCE_WIDTH;

    let bg = parse_hex_color(&view.month.bg_color).unwrap_or(Color32::WHITE);
    let ink = ink_for_background(&view.month.bg_color);
    let painter = ui.painter_at(page);
    painter.rect_filled(page, 0.0, bg);

    let photo_area = Rect::from_min_size(page.min, egui::vec2(page.width(), page.height() * PHOTO_AREA_FRACTION));
    let calendar_area = Rect::from_min_max(egui::pos2(page.min.x, photo_area.max.y), page.max);

    // Photos
    let layout_grid = view.month.layout.grid();
    let photo_painter = ui.painter_at(photo_area);
    for region in layout::resolve(view.month) {
        let rect = region_rect(photo_area, &layout_grid, region.placement, s);
        if let Some(slot_action) = show_slot(ui, &photo_painter, rect, &region, view, textures, s) {
            action = slot_action;
        }
    }

    // Stickers above photos
    for sticker in &view.month.stickers {
        if let Some(sticker_action) = show_sticker(ui, &photo_painter, photo_area, sticker, ink, icons, s) {
            action = sticker_action;
        }
    }

    painter.line_segment(
        [
            egui::pos2(page.min.x, photo_area.max.y),
            egui::pos2(page.max.x, photo_area.max.y),
        ],
        Stroke::new(8.0 * s, ink),
    );

    if let Some(day) = show_calendar(ui, calendar_area, view, ink, icons, s) {
        action = CanvasAction::EditDay(day);
    }

    CanvasResponse { action, photo_area }
}

/// Screen rectangle of a layout region inside `area`.
fn region_rect(area: Rect, layout_grid: &LayoutGrid, placement: Placement, s: f32) -> Rect {
    match placement {
        Placement::Cell {
            col,
            row,
            col_span,
            row_span,
            height,
        } => {
            let inner = area.shrink(SLOT_PADDING * s);
            let gap = SLOT_GAP * s;
            let columns = layout_grid.columns as f32;
            let rows = layout_grid.rows as f32;
            let cell_w = (inner.width() - gap * (columns - 1.0)) / columns;
            let cell_h = (inner.height() - gap * (rows - 1.0)) / rows;
            let min = inner.min + egui::vec2(col as f32 * (cell_w + gap), row as f32 * (cell_h + gap));
            let size = egui::vec2(
                col_span as f32 * cell_w + (col_span as f32 - 1.0) * gap,
                (row_span as f32 * cell_h + (row_span as f32 - 1.0) * gap) * height,
            );
            Rect::from_min_size(min, size)
        }
        Placement::OverlayBottomRight { width, height } => {
            let size = egui::vec2(area.width() * width, area.height() * height);
            Rect::from_min_size(area.max - size, size)
        }
    }
}

/// Mask outline of `rect` in screen space, clockwise.
fn mask_outline(clip: MaskClip, rect: Rect, s: f32) -> Vec<Pos2> {
    match clip {
        MaskClip::Square => vec![
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ],
        MaskClip::Ellipse => {
            let radius = rect.size() / 2.0;
            (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                    rect.center() + egui::vec2(t.cos() * radius.x, t.sin() * radius.y)
                })
                .collect()
        }
        MaskClip::RoundedPx(radius) => rounded_outline(rect, radius * s, radius * s),
        MaskClip::RoundedFraction(fraction) => {
            rounded_outline(rect, rect.width() * fraction, rect.height() * fraction)
        }
        MaskClip::Polygon(points) => points
            .iter()
            .map(|p| rect.min + egui::vec2(p[0] / 100.0 * rect.width(), p[1] / 100.0 * rect.height()))
            .collect(),
    }
}

fn rounded_outline(rect: Rect, rx: f32, ry: f32) -> Vec<Pos2> {
    let rx = rx.min(rect.width() / 2.0).max(0.0);
    let ry = ry.min(rect.height() / 2.0).max(0.0);
    // (corner centre, start angle) clockwise from top-left, y pointing down
    let corners = [
        (egui::pos2(rect.min.x + rx, rect.min.y + ry), 180.0_f32),
        (egui::pos2(rect.max.x - rx, rect.min.y + ry), 270.0),
        (egui::pos2(rect.max.x - rx, rect.max.y - ry), 0.0),
        (egui::pos2(rect.min.x + rx, rect.max.y - ry), 90.0),
    ];
    corners
        .iter()
        .flat_map(|&(center, start)| {
            (0..=CORNER_SEGMENTS).map(move |i| {
                let angle = (start + 90.0 * i as f32 / CORNER_SEGMENTS as f32).to_radians();
                center + egui::vec2(angle.cos() * rx, angle.sin() * ry)
            })
        })
        .collect()
}

/// Triangle-fan mesh over `points`. With a texture, UVs map `uv_rect` to [0, 1].
fn fan_mesh(points: &[[f32; 2]], color: Color32, texture: Option<(egui::TextureId, Rect)>) -> Option<egui::Mesh> {
    if points.len() < 3 {
        return None;
    }
    let hub = centroid(points)?;
    let mut mesh = match texture {
        Some((id, _)) => egui::Mesh::with_texture(id),
        None => egui::Mesh::default(),
    };
    let uv_of = |p: [f32; 2]| match texture {
        Some((_, r)) => egui::pos2((p[0] - r.min.x) / r.width(), (p[1] - r.min.y) / r.height()),
        None => egui::epaint::WHITE_UV,
    };

    for p in std::iter::once(hub).chain(points.iter().copied()) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: egui::pos2(p[0], p[1]),
            uv: uv_of(p),
            color,
        });
    }
    let n = points.len() as u32;
    for i in 1..n {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh.add_triangle(0, n, 1);
    Some(mesh)
}

fn to_points(outline: &[Pos2]) -> Vec<[f32; 2]> {
    outline.iter().map(|p| [p.x, p.y]).collect()
}

/// Where the photo lands: cover-fit in `region`, shifted by the offsets
/// (percent of the region), then scaled about the region centre.
fn photo_rect(region: Rect, aspect: f32, zoom: f32, offset_x: f32, offset_y: f32) -> Rect {
    let (w, h) = (region.width(), region.height());
    let cover = if aspect > w / h {
        egui::vec2(h * aspect, h)
    } else {
        egui::vec2(w, w / aspect)
    };
    let scale = zoom / 100.0;
    let shift = egui::vec2(offset_x / 100.0 * w, offset_y / 100.0 * h) * scale;
    Rect::from_center_size(region.center() + shift, cover * scale)
}

fn press_position(ui: &egui::Ui, response: &egui::Response) -> Option<Point> {
    ui.input(|i| i.pointer.press_origin())
        .or_else(|| response.interact_pointer_pos())
        .map(|p| Point::new(p.x as f64, p.y as f64))
}

fn round_button(
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    id: egui::Id,
    center: Pos2,
    radius: f32,
    glyph: &str,
    (fill, ink): (Color32, Color32),
) -> egui::Response {
    let rect = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
    let response = ui.interact(rect, id, Sense::click_and_drag());
    let fill = if response.hovered() { fill.gamma_multiply(0.8) } else { fill };
    painter.circle_filled(center, radius, fill);
    painter.text(center, Align2::CENTER_CENTER, glyph, FontId::proportional(radius), ink);
    response
}

fn show_slot(
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    rect: Rect,
    region: &ResolvedRegion,
    view: &CanvasView<'_>,
    textures: &mut TextureCache,
    s: f32,
) -> Option<CanvasAction> {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let slot: &PhotoSlot = view.month.slots.get(region.slot)?;
    let id = ui.id().with(("slot", view.month_index, region.slot));
    let outline = mask_outline(region.mask.clip(), rect, s);
    let points = to_points(&outline);
    let response = ui.interact(rect, id, Sense::click_and_drag());
    let hovered = ui.rect_contains_pointer(rect);
    let mut action = None;

    let fill = if hovered && slot.image.is_none() {
        SLOT_FILL.gamma_multiply(0.9)
    } else {
        SLOT_FILL
    };
    if let Some(mesh) = fan_mesh(&points, fill, None) {
        painter.add(egui::Shape::mesh(mesh));
    }

    match &slot.image {
        None => {
            painter.text(
                rect.center(),
                Align2::CENTER_BOTTOM,
                "+",
                FontId::proportional(60.0 * s),
                Color32::BLACK.gamma_multiply(0.2),
            );
            painter.text(
                rect.center(),
                Align2::CENTER_TOP,
                format!("SLOT_{}", region.slot + 1),
                FontId::proportional(10.0 * s),
                Color32::BLACK.gamma_multiply(0.2),
            );
            if response.clicked() {
                action = Some(CanvasAction::Upload(region.slot));
            }
        }
        Some(image) => {
            let duration = if view.animate { TRANSITION_SECS } else { 0.0 };
            let ctx = ui.ctx().clone();
            let zoom = ctx.animate_value_with_time(id.with("zoom"), slot.zoom as f32, duration);
            let offset_x = ctx.animate_value_with_time(id.with("x"), slot.offset_x as f32, duration);
            let offset_y = ctx.animate_value_with_time(id.with("y"), slot.offset_y as f32, duration);

            let image_rect = photo_rect(rect, image.aspect() as f32, zoom, offset_x, offset_y);
            let texture = textures.get(&ctx, image, &slot.filters);
            let visible = clip_polygon_to_rect(
                &points,
                [image_rect.min.x, image_rect.min.y],
                [image_rect.max.x, image_rect.max.y],
            );
            if let Some(mesh) = fan_mesh(&visible, Color32::WHITE, Some((texture.id(), image_rect))) {
                painter.add(egui::Shape::mesh(mesh));
            }

            if response.drag_started() {
                if let Some(pos) = press_position(ui, &response) {
                    action = Some(CanvasAction::Press {
                        target: DragTarget::Photo(region.slot),
                        mode: DragMode::Move,
                        pos,
                    });
                }
            } else if response.clicked() {
                action = Some(CanvasAction::SelectSlot(region.slot));
            }

            if hovered {
                let radius = 22.0 * s;
                let first = rect.min + Vec2::splat(24.0 * s + radius);
                let replace = round_button(ui, painter, id.with("replace"), first, radius, "⬆", DARK_BUTTON);
                if replace.clicked() {
                    action = Some(CanvasAction::Upload(region.slot));
                }
                let second = first + egui::vec2(radius * 2.0 + 12.0 * s, 0.0);
                let clear = round_button(ui, painter, id.with("clear"), second, radius, "🗑", LIGHT_BUTTON);
                if clear.clicked() {
                    action = Some(CanvasAction::ClearImage(region.slot));
                }
                let corner = rect.max - Vec2::splat(24.0 * s);
                let zoom_handle = round_button(ui, painter, id.with("zoom-handle"), corner, 14.0 * s, "⤡", DARK_BUTTON);
                if zoom_handle.drag_started() {
                    if let Some(pos) = press_position(ui, &zoom_handle) {
                        action = Some(CanvasAction::Press {
                            target: DragTarget::Photo(region.slot),
                            mode: DragMode::Resize,
                            pos,
                        });
                    }
                }
            }
        }
    }

    if region.slot == view.selected_slot {
        painter.add(egui::Shape::closed_line(outline, Stroke::new(4.0 * s, Color32::BLACK)));
    }

    action
}

fn show_sticker(
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    area: Rect,
    sticker: &Sticker,
    ink: Color32,
    icons: &dyn IconResolver,
    s: f32,
) -> Option<CanvasAction> {
    let id = ui.id().with(("sticker", sticker.id));
    let scale = sticker.scale as f32;
    let center = area.min
        + egui::vec2(
            sticker.x as f32 / 100.0 * area.width(),
            sticker.y as f32 / 100.0 * area.height(),
        );
    let body = Rect::from_center_size(center, Vec2::splat(STICKER_SIZE * s * scale));
    let glyph = icons.glyph(&sticker.icon).unwrap_or("?");
    painter.text(center, Align2::CENTER_CENTER, glyph, FontId::proportional(body.height() * 0.8), ink);

    let mut action = None;
    let response = ui.interact(body, id, Sense::click_and_drag());
    if response.drag_started() {
        if let Some(pos) = press_position(ui, &response) {
            action = Some(CanvasAction::Press {
                target: DragTarget::Sticker(sticker.id),
                mode: DragMode::Move,
                pos,
            });
        }
    }

    if ui.rect_contains_pointer(body.expand(24.0 * s * scale)) {
        let remove = round_button(
            ui,
            painter,
            id.with("remove"),
            body.min - Vec2::splat(4.0 * s * scale),
            20.0 * s * scale,
            "✖",
            DARK_BUTTON,
        );
        if remove.clicked() {
            action = Some(CanvasAction::RemoveSticker(sticker.id));
        }

        let handle = round_button(
            ui,
            painter,
            id.with("resize"),
            body.max,
            16.0 * s * scale,
            "",
            DARK_BUTTON,
        );
        painter.circle_stroke(body.max, 16.0 * s * scale, Stroke::new(4.0 * s * scale, Color32::WHITE));
        if handle.drag_started() {
            if let Some(pos) = press_position(ui, &handle) {
                action = Some(CanvasAction::Press {
                    target: DragTarget::Sticker(sticker.id),
                    mode: DragMode::Resize,
                    pos,
                });
            }
        }
    }

    action
}

fn show_calendar(
    ui: &mut egui::Ui,
    area: Rect,
    view: &CanvasView<'_>,
    ink: Color32,
    icons: &dyn IconResolver,
    s: f32,
) -> Option<u32> {
    let painter = ui.painter_at(area);
    let name = MONTH_NAMES.get(view.month_index).copied().unwrap_or_default();

    // Oversized month name behind the grid
    painter.text(
        egui::pos2(area.min.x - area.width() * 0.05, area.center().y),
        Align2::LEFT_CENTER,
        name.to_uppercase(),
        FontId::new(400.0 * s, view.font.clone()),
        ink.gamma_multiply(0.05),
    );

    let strip_width = 192.0 * s;
    let grid_rect = Rect::from_min_max(area.min, egui::pos2(area.max.x - strip_width, area.max.y)).shrink(40.0 * s);
    let strip = Rect::from_min_max(egui::pos2(area.max.x - strip_width, area.min.y), area.max);

    // Vertical month label: "JAN /26"
    painter.line_segment([strip.left_top(), strip.left_bottom()], Stroke::new(8.0 * s, ink));
    let short = name.chars().take(3).collect::<String>().to_uppercase();
    let label = format!("{} /{:02}", short, view.year.rem_euclid(100));
    let galley = painter.layout_no_wrap(label, FontId::new(96.0 * s, view.font.clone()), ink);
    let origin = strip.center() + egui::vec2(galley.size().y / 2.0, -galley.size().x / 2.0);
    painter.add(egui::Shape::Text(
        egui::epaint::TextShape::new(origin, galley, ink).with_angle(std::f32::consts::FRAC_PI_2),
    ));

    let style = GridStyle {
        font: view.font.clone(),
        ink,
        scale: s,
    };
    calendar_grid::show(ui, grid_rect, view.grid, &view.month.markers, &style, icons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::month::{LayoutType, MaskShape};

    fn area() -> Rect {
        Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(416.0, 216.0))
    }

    #[test]
    fn single_region_fills_padded_area() {
        let layout_grid = LayoutType::Single.grid();
        let rect = region_rect(area(), &layout_grid, layout_grid.regions[0].placement, 1.0);
        assert_eq!(rect, Rect::from_min_max(egui::pos2(8.0, 8.0), egui::pos2(408.0, 208.0)));
    }

    #[test]
    fn grid_2_regions_are_equal_and_gapped() {
        let layout_grid = LayoutType::Grid2.grid();
        let left = region_rect(area(), &layout_grid, layout_grid.regions[0].placement, 1.0);
        let right = region_rect(area(), &layout_grid, layout_grid.regions[1].placement, 1.0);
        assert_eq!(left.width(), right.width());
        assert_eq!(right.min.x - left.max.x, SLOT_GAP);
    }

    #[test]
    fn overlay_is_pinned_bottom_right() {
        let layout_grid = LayoutType::Masonry3.grid();
        let rect = region_rect(area(), &layout_grid, layout_grid.regions[2].placement, 1.0);
        assert!((rect.max - area().max).length() < 1e-3);
        assert!((rect.width() - 416.0 / 3.0).abs() < 1e-3);
        assert_eq!(rect.height(), 108.0);
    }

    #[test]
    fn photo_rect_covers_region_at_rest() {
        let region = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 100.0));
        let tall = photo_rect(region, 0.5, 100.0, 0.0, 0.0);
        assert_eq!(tall.width(), 200.0);
        assert_eq!(tall.height(), 400.0);
        assert_eq!(tall.center(), region.center());
    }

    #[test]
    fn photo_rect_applies_offset_then_zoom() {
        let region = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 100.0));
        let moved = photo_rect(region, 2.0, 200.0, 10.0, -10.0);
        assert_eq!(moved.size(), egui::vec2(400.0, 200.0));
        assert_eq!(moved.center(), egui::pos2(100.0 + 40.0, 50.0 - 20.0));
    }

    #[test]
    fn rounded_outline_stays_inside_rect() {
        let rect = Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(100.0, 60.0));
        for p in mask_outline(MaskShape::Squircle.clip(), rect, 1.0) {
            assert!(rect.expand(1e-3).contains(p));
        }
        assert_eq!(mask_outline(MaskShape::None.clip(), rect, 1.0).len(), 4);
    }

    #[test]
    fn torn_outline_maps_percent_points() {
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 100.0));
        let outline = mask_outline(MaskShape::Torn4.clip(), rect, 1.0);
        assert_eq!(outline[0], egui::pos2(24.0, 0.0));
        assert_eq!(outline[2], egui::pos2(200.0, 40.0));
    }

    #[test]
    fn fan_mesh_needs_a_polygon() {
        assert!(fan_mesh(&[[0.0, 0.0], [1.0, 0.0]], Color32::WHITE, None).is_none());
        let mesh = fan_mesh(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], Color32::WHITE, None).unwrap();
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.indices.len(), 12);
    }
}
