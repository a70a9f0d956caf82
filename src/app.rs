// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the editor shell that implements the egui::App
//! trait. It owns the design store and session, routes UI actions into
//! store mutations, feeds pointer input to the drag controller and applies
//! finished uploads.

use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::interaction::drag::{handle_pointer, PointerEvent};
use crate::interaction::session::Session;
use crate::io::media::{spawn_upload, PendingUpload, UploadTarget, IMAGE_EXTENSIONS};
use crate::io::print::{LogPrintHook, PrintHook};
use crate::models::document::Document;
use crate::models::history::History;
use crate::models::month::{MonthUpdate, SlotUpdate};
use crate::models::store::DesignStore;
use crate::ui::canvas::{self, CanvasAction, CanvasView};
use crate::ui::icons::GlyphTable;
use crate::ui::marker_dialog::{self, MarkerAction, MarkerEditor};
use crate::ui::properties::{self, PanelResponse, PanelView, PropertiesAction, SliderSweep};
use crate::ui::textures::TextureCache;
use crate::ui::toolbar::{self, ToolbarAction, ToolbarView};
use crate::ui::timeline;
use crate::util::calendar::grid_days;
use crate::util::geometry::{CanvasSize, Point};

/// Main application state.
pub struct CollageApp {
    config: EditorConfig,

    /// Document plus undo history
    store: DesignStore,

    /// Transient selection and drag state
    session: Session,

    icons: GlyphTable,

    print_hook: Box<dyn PrintHook>,

    /// Image reads still running, each bound to its month and slot
    uploads: Vec<PendingUpload>,

    textures: TextureCache,

    /// Open day marker editor, if any
    marker_editor: Option<MarkerEditor>,

    /// Photo area from the last frame, used to normalize sticker drags
    photo_area: egui::Rect,
}

impl CollageApp {
    /// Create an editor with a fresh twelve-month document.
    pub fn new(config: EditorConfig) -> Self {
        let template = config.default_month.template();
        let store = DesignStore::new(Document::new(&template), History::new(config.history_limit));
        log::info!(
            "Editor ready for {} (history limit {})",
            config.year,
            config.history_limit
        );

        Self {
            config,
            store,
            session: Session::default(),
            icons: GlyphTable,
            print_hook: Box::new(LogPrintHook::default()),
            uploads: Vec::new(),
            textures: TextureCache::default(),
            marker_editor: None,
            photo_area: egui::Rect::NOTHING,
        }
    }

    /// Ask for a photo file and start reading it into `slot` of the
    /// current month.
    fn request_upload(&mut self, slot: usize) {
        self.session.select_slot(slot);
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        let target = UploadTarget {
            month: self.session.month,
            slot,
        };
        self.uploads
            .push(spawn_upload(path, target, self.config.preview_max_dimension));
    }

    /// Apply finished uploads to the slots they were requested for.
    fn poll_uploads(&mut self, ctx: &egui::Context) {
        let mut finished = Vec::new();
        self.uploads.retain(|upload| match upload.poll() {
            Some(result) => {
                finished.push((upload.target, result));
                false
            }
            None => true,
        });

        for (target, result) in finished {
            match result {
                Ok(image) => {
                    let name = image.name().to_string();
                    report(self.store.set_slot_image(target.month, target.slot, image));
                    self.session.set_status(format!("Loaded {}", name));
                }
                Err(e) => {
                    log::error!("Upload for month {} slot {} failed: {}", target.month, target.slot, e);
                    self.session.set_status(format!("Could not load image: {}", e));
                }
            }
        }

        // Keep polling while reads are running
        if !self.uploads.is_empty() {
            ctx.request_repaint();
        }
    }

    fn undo(&mut self) {
        if self.session.is_dragging() {
            log::debug!("Ignoring undo during drag");
            return;
        }
        if !self.store.undo() {
            log::debug!("Nothing to undo");
        }
    }

    fn print(&mut self) {
        self.print_hook.trigger();
    }

    fn pointer(&mut self, event: PointerEvent) {
        report(handle_pointer(&mut self.session, &mut self.store, event));
    }

    /// Forward pointer moves and the release of an active drag.
    fn track_drag(&mut self, ctx: &egui::Context) {
        if !self.session.is_dragging() {
            // Close a slider sweep whose release the panel never reported
            if self.store.gesture_open() && !ctx.input(|i| i.pointer.any_down()) {
                self.store.end_gesture();
            }
            return;
        }

        let (released, moved, pos) = ctx.input(|i| {
            (
                i.pointer.any_released() || !i.pointer.any_down(),
                i.pointer.is_moving(),
                i.pointer.latest_pos(),
            )
        });

        if let (true, Some(pos)) = (moved, pos) {
            let canvas = CanvasSize::new(self.photo_area.width() as f64, self.photo_area.height() as f64);
            self.pointer(PointerEvent::Move {
                pos: Point::new(pos.x as f64, pos.y as f64),
                canvas,
            });
        }
        if released {
            self.pointer(PointerEvent::Release);
        }
    }

    fn apply_canvas_action(&mut self, action: CanvasAction) {
        let month = self.session.month;
        match action {
            CanvasAction::Press { target, mode, pos } => {
                self.pointer(PointerEvent::Press { target, mode, pos });
            }
            CanvasAction::SelectSlot(slot) => self.session.select_slot(slot),
            CanvasAction::Upload(slot) => self.request_upload(slot),
            CanvasAction::ClearImage(slot) => {
                report(self.store.clear_slot_image(month, slot));
            }
            CanvasAction::RemoveSticker(id) => {
                report(self.store.remove_sticker(month, id));
            }
            CanvasAction::EditDay(day) => {
                let existing = self
                    .store
                    .month(month)
                    .ok()
                    .and_then(|m| m.markers.get(&day));
                self.marker_editor = Some(MarkerEditor::open(day, existing));
            }
            CanvasAction::None => {}
        }
    }

    fn apply_properties_action(&mut self, action: PropertiesAction) {
        let month = self.session.month;
        match action {
            PropertiesAction::SelectMonth(index) => {
                self.session.select_month(index);
                self.marker_editor = None;
            }
            PropertiesAction::SetLayout(layout) => {
                report(self.store.update_month(month, MonthUpdate::layout(layout)));
                if self.session.selected_slot >= layout.slot_count() {
                    self.session.select_slot(0);
                }
            }
            PropertiesAction::SetBackground(color) => {
                report(self.store.update_month(month, MonthUpdate::bg_color(color)));
            }
            PropertiesAction::SetMonthMask(mask) => {
                report(self.store.update_month(month, MonthUpdate::mask(mask)));
            }
            PropertiesAction::SelectSlot(slot) => self.session.select_slot(slot),
            PropertiesAction::SetSlotMask(slot, mask) => {
                report(self.store.update_slot(month, slot, SlotUpdate::mask_override(mask)));
            }
            PropertiesAction::SetFilters(slot, filters) => {
                report(self.store.adjust_slot(month, slot, SlotUpdate::filters(filters)));
            }
            PropertiesAction::Upload(slot) => self.request_upload(slot),
            PropertiesAction::ClearImage(slot) => {
                report(self.store.clear_slot_image(month, slot));
            }
            PropertiesAction::SelectFont(index) => {
                if index < self.config.fonts.len() {
                    self.session.font = index;
                }
            }
            PropertiesAction::AddSticker(icon) => {
                if let Err(e) = self.store.add_sticker(month, &icon) {
                    log::error!("{}", e);
                }
            }
            PropertiesAction::Print => self.print(),
            PropertiesAction::None => {}
        }
    }

    fn font_family(&self) -> egui::FontFamily {
        match self.config.fonts.get(self.session.font) {
            Some(font) if font.is_monospace() => egui::FontFamily::Monospace,
            _ => egui::FontFamily::Proportional,
        }
    }
}

/// Take Ctrl+Z (Cmd+Z) out of the input queue before any widget runs, so
/// it undoes the document even while a text field has focus.
fn take_undo_shortcut(ctx: &egui::Context) -> bool {
    ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z))
}

/// Log a failed mutation; the UI carries on unchanged.
fn report(result: EditorResult<()>) {
    if let Err(e) = result {
        log::error!("{}", e);
    }
}

impl eframe::App for CollageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_uploads(ctx);

        if take_undo_shortcut(ctx) {
            self.undo();
        }

        self.track_drag(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Upload Photo...").clicked() {
                        ui.close_menu();
                        self.request_upload(self.session.selected_slot);
                    }
                    if ui.button("Print").clicked() {
                        ui.close_menu();
                        self.print();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let can_undo = self.store.history().can_undo() && !self.session.is_dragging();
                    if ui.add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                        self.undo();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                let view = ToolbarView {
                    history_len: self.store.history().len(),
                    history_limit: self.store.history().max_size(),
                    dragging: self.session.is_dragging(),
                    uploads_in_flight: self.uploads.len(),
                    status: self.session.status.as_deref(),
                };
                toolbar::show(ui, &view)
            })
            .inner;
        match toolbar_action {
            ToolbarAction::Undo => self.undo(),
            ToolbarAction::Print => self.print(),
            ToolbarAction::None => {}
        }

        // Month strip
        let month_choice = egui::TopBottomPanel::bottom("months")
            .show(ctx, |ui| timeline::show(ui, self.session.month, self.config.year))
            .inner;
        if let Some(index) = month_choice {
            self.apply_properties_action(PropertiesAction::SelectMonth(index));
        }

        // Properties panel (right side)
        let month_index = self.session.month;
        let panel = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| match self.store.month(month_index) {
                Ok(month) => {
                    let view = PanelView {
                        month_index,
                        month,
                        selected_slot: self.session.selected_slot,
                        font: self.session.font,
                        config: &self.config,
                    };
                    properties::show(ui, &view, &self.icons)
                }
                Err(e) => {
                    log::error!("{}", e);
                    PanelResponse {
                        action: PropertiesAction::None,
                        sweep: None,
                    }
                }
            })
            .inner;
        if panel.sweep == Some(SliderSweep::Started) && !self.session.is_dragging() {
            self.store.begin_gesture();
        }
        self.apply_properties_action(panel.action);
        if panel.sweep == Some(SliderSweep::Stopped) && !self.session.is_dragging() {
            self.store.end_gesture();
        }

        // Main canvas (center)
        let month_index = self.session.month;
        let font = self.font_family();
        let grid = grid_days(month_index, self.config.year).unwrap_or_else(|e| {
            log::error!("{}", e);
            Vec::new()
        });
        let canvas_response = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let month = match self.store.month(month_index) {
                    Ok(month) => month,
                    Err(e) => {
                        log::error!("{}", e);
                        return None;
                    }
                };
                let view = CanvasView {
                    month_index,
                    month,
                    grid: &grid,
                    year: self.config.year,
                    selected_slot: self.session.selected_slot,
                    animate: self.session.animations_enabled(),
                    font,
                };
                Some(canvas::show(ui, &view, &mut self.textures, &self.icons))
            })
            .inner;
        if let Some(response) = canvas_response {
            self.photo_area = response.photo_area;
            self.apply_canvas_action(response.action);
        }

        // Day marker editor
        if let Some(editor) = self.marker_editor.as_mut() {
            let day = editor.day;
            match marker_dialog::show(ctx, editor, &self.config.marker_icons, &self.icons) {
                MarkerAction::Save(marker) => {
                    report(self.store.set_marker(self.session.month, day, marker));
                    self.marker_editor = None;
                }
                MarkerAction::Discard => self.marker_editor = None,
                MarkerAction::None => {}
            }
        }

        self.textures.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_z(modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key: egui::Key::Z,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn undo_shortcut_is_consumed_from_the_queue() {
        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.events.push(key_z(egui::Modifiers::COMMAND));

        let mut taken = (false, false);
        let mut remaining = usize::MAX;
        let _ = ctx.run(raw, |ctx| {
            taken = (take_undo_shortcut(ctx), take_undo_shortcut(ctx));
            remaining = ctx.input(|i| i.events.len());
        });

        assert_eq!(taken, (true, false));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn plain_z_is_left_for_widgets() {
        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.events.push(key_z(egui::Modifiers::NONE));

        let mut taken = true;
        let _ = ctx.run(raw, |ctx| {
            taken = take_undo_shortcut(ctx);
        });
        assert!(!taken);
    }
}
