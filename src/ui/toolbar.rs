// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with history and print controls.
//!
//! This module provides the strip above the canvas: undo with the current
//! history depth, print, and the last status message.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Undo,
    Print,
}

/// What the toolbar reflects from the editor state.
pub struct ToolbarView<'a> {
    pub history_len: usize,
    pub history_limit: usize,
    pub dragging: bool,
    pub uploads_in_flight: usize,
    pub status: Option<&'a str>,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, view: &ToolbarView<'_>) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let can_undo = view.history_len > 0 && !view.dragging;
        if ui
            .add_enabled(can_undo, egui::Button::new("↶ Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            action = ToolbarAction::Undo;
        }
        ui.label(
            egui::RichText::new(format!("{}/{}", view.history_len, view.history_limit))
                .small()
                .weak(),
        );

        ui.separator();

        if ui.button("🖨 Print").clicked() {
            action = ToolbarAction::Print;
        }

        ui.separator();

        if view.uploads_in_flight > 0 {
            ui.spinner();
            ui.label(format!("Loading {} image(s)...", view.uploads_in_flight));
        } else if let Some(status) = view.status {
            ui.label(egui::RichText::new(status).italics().weak());
        } else {
            ui.label(
                egui::RichText::new("Drag photos to reposition, use the corner handle to zoom")
                    .italics()
                    .weak(),
            );
        }
    });

    action
}
