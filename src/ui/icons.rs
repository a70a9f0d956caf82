// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Icon resolution for stickers and day markers.
//!
//! The document stores icon ids as opaque strings (`fluent-emoji:fire`,
//! `star`). Turning an id into something drawable is the resolver's job.

/// Maps an icon id to a drawable glyph.
pub trait IconResolver {
    fn glyph(&self, icon: &str) -> Option<&str>;
}

/// Built-in table of emoji glyphs, keyed by icon name without its set prefix.
#[derive(Debug, Default)]
pub struct GlyphTable;

const GLYPHS: [(&str, &str); 14] = [
    ("high-voltage", "⚡"),
    ("collision", "💥"),
    ("paperclip", "📎"),
    ("sun", "☀"),
    ("sparkles", "✨"),
    ("cloud", "☁"),
    ("pushpin", "📌"),
    ("eye", "👁"),
    ("ghost", "👻"),
    ("bandage", "🩹"),
    ("label", "🏷"),
    ("fire", "🔥"),
    ("cake", "🎂"),
    ("star", "★"),
];

impl IconResolver for GlyphTable {
    fn glyph(&self, icon: &str) -> Option<&str> {
        let name = icon.rsplit(':').next().unwrap_or(icon);
        GLYPHS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, glyph)| *glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_prefixed_and_bare_ids() {
        let table = GlyphTable;
        assert_eq!(table.glyph("fluent-emoji:fire"), Some("🔥"));
        assert_eq!(table.glyph("star"), Some("★"));
        assert_eq!(table.glyph("fluent-emoji:unicorn"), None);
    }

    #[test]
    fn default_config_icons_all_resolve() {
        let config = crate::config::EditorConfig::default();
        let table = GlyphTable;
        for icon in config.sticker_icons.iter().chain(config.marker_icons.iter()) {
            assert!(table.glyph(icon).is_some(), "{}", icon);
        }
    }
}
