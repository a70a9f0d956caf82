// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the collage editor.

pub mod calendar_grid;
pub mod canvas;
pub mod icons;
pub mod marker_dialog;
pub mod properties;
pub mod textures;
pub mod timeline;
pub mod toolbar;

use egui::Color32;

/// Parse `#RRGGBB` (or `RRGGBB`) into a color.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Ink color for text drawn on a month background.
pub fn ink_for_background(bg_color: &str) -> Color32 {
    let bg = bg_color.trim().to_ascii_uppercase();
    if bg == "#000000" || bg == "#111827" {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#E11D48"), Some(Color32::from_rgb(0xE1, 0x1D, 0x48)));
        assert_eq!(parse_hex_color("ffffff"), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_ink_for_background() {
        assert_eq!(ink_for_background("#000000"), Color32::WHITE);
        assert_eq!(ink_for_background("#111827"), Color32::WHITE);
        assert_eq!(ink_for_background("#FDE047"), Color32::BLACK);
    }
}
