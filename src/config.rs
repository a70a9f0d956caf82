// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. Files are YAML or JSON, chosen by extension.

use crate::error::{EditorError, EditorResult};
use crate::models::history::DEFAULT_HISTORY_LIMIT;
use crate::models::month::{LayoutType, MaskShape, MonthSettings};
use serde::{Deserialize, Serialize};

/// Environment variable naming a config file when no argument is given.
pub const CONFIG_ENV_VAR: &str = "COLLAGE_CONFIG";

/// A typography choice: display name plus font family list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontOption {
    pub name: String,
    pub family: String,
}

impl FontOption {
    fn new(name: &str, family: &str) -> Self {
        Self {
            name: name.to_string(),
            family: family.to_string(),
        }
    }

    /// Whether the family asks for a fixed-width face.
    pub fn is_monospace(&self) -> bool {
        let family = self.family.to_ascii_lowercase();
        family.contains("monospace") || family.contains("special elite")
    }
}

/// Starting state of every month in a new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthDefaults {
    pub layout: LayoutType,
    pub bg_color: String,
    pub mask: MaskShape,
}

impl Default for MonthDefaults {
    fn default() -> Self {
        Self {
            layout: LayoutType::Single,
            bg_color: "#FFFFFF".to_string(),
            mask: MaskShape::Torn1,
        }
    }
}

impl MonthDefaults {
    pub fn template(&self) -> MonthSettings {
        MonthSettings::with_defaults(self.layout, self.bg_color.clone(), self.mask)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Calendar year the grid is drawn for
    pub year: i32,
    /// Maximum number of undo snapshots
    pub history_limit: usize,
    /// Longest side, in pixels, of decoded photo previews
    pub preview_max_dimension: u32,
    pub palette: Vec<String>,
    pub fonts: Vec<FontOption>,
    pub sticker_icons: Vec<String>,
    pub marker_icons: Vec<String>,
    pub default_month: MonthDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            year: 2026,
            history_limit: DEFAULT_HISTORY_LIMIT,
            preview_max_dimension: 1600,
            palette: [
                "#FFFFFF", "#E11D48", "#F97316", "#06B6D4", "#FDE047", "#000000", "#4ADE80",
                "#8B5CF6",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            fonts: vec![
                FontOption::new("Swiss Grunge (Inter)", "'Inter', sans-serif"),
                FontOption::new("Brutalist (Oswald)", "'Oswald', sans-serif"),
                FontOption::new("Experimental (Bebas Neue)", "'Bebas Neue', cursive"),
                FontOption::new("Typewriter (Special Elite)", "'Special Elite', cursive"),
                FontOption::new("Aggressive (Permanent Marker)", "'Permanent Marker', cursive"),
                FontOption::new("Modern Editorial (Playfair Display)", "'Playfair Display', serif"),
                FontOption::new("High Fashion (Abril Fatface)", "'Abril Fatface', serif"),
                FontOption::new("Retro (Righteous)", "'Righteous', cursive"),
                FontOption::new("Classical (Cinzel)", "'Cinzel', serif"),
                FontOption::new("Script (Dancing Script)", "'Dancing Script', cursive"),
            ],
            sticker_icons: [
                "high-voltage", "collision", "paperclip", "sun", "sparkles", "cloud", "pushpin",
                "eye", "ghost", "bandage", "label", "fire",
            ]
            .iter()
            .map(|name| format!("fluent-emoji:{}", name))
            .collect(),
            marker_icons: vec!["cake".to_string(), "star".to_string()],
            default_month: MonthDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Check values the editor cannot run with.
    pub fn validate(&self) -> EditorResult<()> {
        if self.history_limit == 0 {
            return Err(EditorError::config("history_limit must be at least 1"));
        }
        if chrono::NaiveDate::from_ymd_opt(self.year, 12, 31).is_none()
            || chrono::NaiveDate::from_ymd_opt(self.year + 1, 1, 1).is_none()
        {
            return Err(EditorError::config(format!("year {} is out of range", self.year)));
        }
        if self.palette.is_empty() {
            return Err(EditorError::config("palette must contain at least one color"));
        }
        if self.fonts.is_empty() {
            return Err(EditorError::config("fonts must contain at least one option"));
        }
        if self.preview_max_dimension == 0 {
            return Err(EditorError::config("preview_max_dimension must be positive"));
        }
        Ok(())
    }
}
