// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Month properties panel.
//!
//! This module provides the side panel for editing the current month's
//! layout, background, masks, and the selected slot's photo and
//! adjustments. It never mutates the document: every edit is reported as a
//! [`PropertiesAction`] for the app to apply through the store.

use super::icons::IconResolver;
use super::parse_hex_color;
use crate::config::EditorConfig;
use crate::models::filters::{FilterField, ImageFilters};
use crate::models::month::{LayoutType, MaskShape, MonthSettings};
use crate::util::calendar::MONTH_NAMES;
use egui::{Color32, Stroke};

/// Result of properties panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    SelectMonth(usize),
    SetLayout(LayoutType),
    SetBackground(String),
    SetMonthMask(MaskShape),
    SelectSlot(usize),
    /// `None` falls back to the month's default mask
    SetSlotMask(usize, Option<MaskShape>),
    SetFilters(usize, ImageFilters),
    Upload(usize),
    ClearImage(usize),
    SelectFont(usize),
    AddSticker(String),
    Print,
}

/// Start or end of a slider drag, so a whole sweep can be one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderSweep {
    Started,
    Stopped,
}

pub struct PanelResponse {
    pub action: PropertiesAction,
    pub sweep: Option<SliderSweep>,
}

/// What the panel displays.
pub struct PanelView<'a> {
    pub month_index: usize,
    pub month: &'a MonthSettings,
    pub selected_slot: usize,
    pub font: usize,
    pub config: &'a EditorConfig,
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, view: &PanelView<'_>, icons: &dyn IconResolver) -> PanelResponse {
    let mut action = PropertiesAction::None;
    let mut sweep = None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Month");
        let current = MONTH_NAMES.get(view.month_index).copied().unwrap_or_default();
        egui::ComboBox::from_id_source("month_select")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for (i, name) in MONTH_NAMES.iter().enumerate() {
                    if ui.selectable_label(i == view.month_index, *name).clicked() {
                        action = PropertiesAction::SelectMonth(i);
                    }
                }
            });

        ui.separator();
        ui.label("Layout");
        ui.horizontal_wrapped(|ui| {
            for layout in LayoutType::ALL {
                if ui.selectable_label(view.month.layout == layout, layout.label()).clicked() {
                    action = PropertiesAction::SetLayout(layout);
                }
            }
        });

        ui.label("Background");
        ui.horizontal_wrapped(|ui| {
            for hex in &view.config.palette {
                let fill = parse_hex_color(hex).unwrap_or(Color32::WHITE);
                let selected = view.month.bg_color.eq_ignore_ascii_case(hex);
                let stroke = if selected {
                    Stroke::new(3.0, ui.visuals().selection.bg_fill)
                } else {
                    Stroke::new(1.0, Color32::GRAY)
                };
                let swatch = egui::Button::new("")
                    .fill(fill)
                    .stroke(stroke)
                    .min_size(egui::vec2(24.0, 24.0));
                if ui.add(swatch).on_hover_text(hex.as_str()).clicked() {
                    action = PropertiesAction::SetBackground(hex.clone());
                }
            }
        });

        ui.label("Month mask");
        ui.horizontal_wrapped(|ui| {
            for mask in MaskShape::MONTH_DEFAULTS {
                if ui.selectable_label(view.month.mask == mask, mask.label()).clicked() {
                    action = PropertiesAction::SetMonthMask(mask);
                }
            }
        });

        ui.separator();
        if let Some(slot_action) = show_slot(ui, view, &mut sweep) {
            action = slot_action;
        }

        ui.separator();
        ui.heading("Typography");
        let font_name = view
            .config
            .fonts
            .get(view.font)
            .map(|f| f.name.as_str())
            .unwrap_or_default();
        egui::ComboBox::from_id_source("font_select")
            .selected_text(font_name)
            .show_ui(ui, |ui| {
                for (i, font) in view.config.fonts.iter().enumerate() {
                    if ui.selectable_label(i == view.font, &font.name).clicked() {
                        action = PropertiesAction::SelectFont(i);
                    }
                }
            });

        ui.separator();
        ui.heading("Stickers");
        ui.horizontal_wrapped(|ui| {
            for icon in &view.config.sticker_icons {
                let glyph = icons.glyph(icon).unwrap_or("?");
                let button = egui::Button::new(egui::RichText::new(glyph).size(22.0));
                if ui.add(button).on_hover_text(icon.as_str()).clicked() {
                    action = PropertiesAction::AddSticker(icon.clone());
                }
            }
        });
        ui.label(
            egui::RichText::new(format!("{} on this month", view.month.stickers.len()))
                .small()
                .weak(),
        );

        ui.separator();
        if ui.button("🖨 Print").clicked() {
            action = PropertiesAction::Print;
        }
    });

    PanelResponse { action, sweep }
}

/// Controls for the selected slot: picker chips, image, mask, adjustments.
fn show_slot(
    ui: &mut egui::Ui,
    view: &PanelView<'_>,
    sweep: &mut Option<SliderSweep>,
) -> Option<PropertiesAction> {
    let mut action = None;
    let visible = view.month.layout.slot_count();

    ui.heading("Photo");
    ui.horizontal(|ui| {
        for i in 0..visible {
            if ui
                .selectable_label(view.selected_slot == i, format!("Slot {}", i + 1))
                .clicked()
            {
                action = Some(PropertiesAction::SelectSlot(i));
            }
        }
    });

    let slot_index = view.selected_slot;
    let Some(slot) = view.month.slots.get(slot_index) else {
        return action;
    };
    if slot_index >= visible {
        ui.label(egui::RichText::new("This slot is hidden by the current layout").italics().weak());
    }

    ui.horizontal(|ui| {
        match &slot.image {
            Some(image) => {
                let (w, h) = image.size();
                ui.label(format!("{} ({}x{})", image.name(), w, h));
            }
            None => {
                ui.label(egui::RichText::new("No image").weak());
            }
        }
    });
    ui.horizontal(|ui| {
        let upload_label = if slot.image.is_some() { "Replace..." } else { "Upload..." };
        if ui.button(upload_label).clicked() {
            action = Some(PropertiesAction::Upload(slot_index));
        }
        if ui
            .add_enabled(slot.image.is_some(), egui::Button::new("Clear"))
            .clicked()
        {
            action = Some(PropertiesAction::ClearImage(slot_index));
        }
    });
    ui.label(format!(
        "Zoom {:.0}%  Offset {:.1}, {:.1}",
        slot.zoom, slot.offset_x, slot.offset_y
    ));

    ui.label("Slot mask");
    ui.horizontal_wrapped(|ui| {
        let label = format!("default ({})", view.month.mask.label());
        if ui.selectable_label(slot.mask_override.is_none(), label).clicked() {
            action = Some(PropertiesAction::SetSlotMask(slot_index, None));
        }
        for mask in MaskShape::OVERRIDES {
            if ui
                .selectable_label(slot.mask_override == Some(mask), mask.label())
                .clicked()
            {
                action = Some(PropertiesAction::SetSlotMask(slot_index, Some(mask)));
            }
        }
    });

    ui.label("Adjustments");
    for field in FilterField::ALL {
        let (min, max) = field.range();
        let mut value = slot.filters.get(field);
        let response = ui.add(egui::Slider::new(&mut value, min..=max).text(field.label()));
        if response.drag_started() {
            *sweep = Some(SliderSweep::Started);
        }
        if response.changed() {
            action = Some(PropertiesAction::SetFilters(
                slot_index,
                slot.filters.with(field, value),
            ));
        }
        if response.drag_stopped() {
            *sweep = Some(SliderSweep::Stopped);
        }
    }
    let is_default = slot.filters == ImageFilters::default();
    if ui.add_enabled(!is_default, egui::Button::new("Reset adjustments")).clicked() {
        action = Some(PropertiesAction::SetFilters(slot_index, ImageFilters::default()));
    }

    action
}
