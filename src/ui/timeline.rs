// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Month strip for navigating the twelve pages.

use crate::util::calendar::MONTH_NAMES;

/// Display one button per month. Returns the month clicked, if any.
pub fn show(ui: &mut egui::Ui, current: usize, year: i32) -> Option<usize> {
    let mut selected = None;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(year.to_string()).strong());
        ui.separator();
        for (i, name) in MONTH_NAMES.iter().enumerate() {
            let short: String = name.chars().take(3).collect();
            if ui
                .selectable_label(i == current, short.to_uppercase())
                .on_hover_text(*name)
                .clicked()
            {
                selected = Some(i);
            }
        }

        ui.separator();
        if ui.add_enabled(current > 0, egui::Button::new("◀")).clicked() {
            selected = Some(current - 1);
        }
        if ui
            .add_enabled(current + 1 < MONTH_NAMES.len(), egui::Button::new("▶"))
            .clicked()
        {
            selected = Some(current + 1);
        }
    });

    selected
}
