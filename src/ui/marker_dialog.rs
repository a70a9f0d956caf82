// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Day marker editor window.
//!
//! Opened by clicking a day in the calendar grid. The user types a short
//! label or picks an icon; saving empty text removes the marker.

use super::icons::IconResolver;
use crate::models::month::Marker;

/// Result of marker editor interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerAction {
    None,
    /// Store the marker for the editor's day; `None` removes it
    Save(Option<Marker>),
    Discard,
}

/// Open editor state for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEditor {
    pub day: u32,
    pub text: String,
}

impl MarkerEditor {
    /// Start editing `day`, prefilled from an existing text marker.
    pub fn open(day: u32, existing: Option<&Marker>) -> Self {
        let text = match existing {
            Some(Marker::Text(value)) => value.clone(),
            Some(Marker::Icon(_)) | None => String::new(),
        };
        Self { day, text }
    }

    /// Marker for the current text, stored as typed; empty text means no
    /// marker.
    pub fn text_marker(&self) -> Option<Marker> {
        if self.text.is_empty() {
            None
        } else {
            Some(Marker::Text(self.text.clone()))
        }
    }
}

/// Display the editor window.
pub fn show(
    ctx: &egui::Context,
    editor: &mut MarkerEditor,
    marker_icons: &[String],
    icons: &dyn IconResolver,
) -> MarkerAction {
    let title = format!("Day {}", editor.day);
    let response = egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let mut action = MarkerAction::None;

            ui.label("Label");
            let text_response = ui.text_edit_singleline(&mut editor.text);
            if text_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = MarkerAction::Save(editor.text_marker());
            }

            ui.label("Or an icon");
            ui.horizontal(|ui| {
                for icon in marker_icons {
                    let glyph = icons.glyph(icon).unwrap_or("?");
                    let button = egui::Button::new(egui::RichText::new(glyph).size(22.0));
                    if ui.add(button).on_hover_text(icon.as_str()).clicked() {
                        action = MarkerAction::Save(Some(Marker::Icon(icon.clone())));
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    action = MarkerAction::Save(editor.text_marker());
                }
                if ui.button("Remove").clicked() {
                    action = MarkerAction::Save(None);
                }
                if ui.button("Cancel").clicked() {
                    action = MarkerAction::Discard;
                }
            });

            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                action = MarkerAction::Discard;
            }
            action
        });

    response
        .and_then(|r| r.inner)
        .unwrap_or(MarkerAction::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_prefills_text_markers_only() {
        let text = Marker::Text("Party".to_string());
        assert_eq!(MarkerEditor::open(3, Some(&text)).text, "Party");

        let icon = Marker::Icon("cake".to_string());
        assert_eq!(MarkerEditor::open(3, Some(&icon)).text, "");
        assert_eq!(MarkerEditor::open(3, None).text, "");
    }

    #[test]
    fn empty_text_removes_marker() {
        let editor = MarkerEditor {
            day: 12,
            text: String::new(),
        };
        assert_eq!(editor.text_marker(), None);
    }

    #[test]
    fn text_is_saved_verbatim() {
        let editor = MarkerEditor {
            day: 12,
            text: "  Trip ".to_string(),
        };
        assert_eq!(editor.text_marker(), Some(Marker::Text("  Trip ".to_string())));

        let spaces = MarkerEditor {
            day: 12,
            text: "   ".to_string(),
        };
        assert_eq!(spaces.text_marker(), Some(Marker::Text("   ".to_string())));
    }
}
