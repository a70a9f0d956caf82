// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! GPU textures for adjusted photo previews.
//!
//! A texture is built per (image, filters) pair by running the adjustment
//! pipeline on the decoded pixels. Entries not drawn during a frame are
//! dropped at the end of it.

use crate::adjust::{apply_to_image, FilterExpression};
use crate::models::filters::ImageFilters;
use crate::models::month::ImageSource;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

type TextureKey = (Uuid, ImageFilters);

#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<TextureKey, egui::TextureHandle>,
    used: HashSet<TextureKey>,
}

impl TextureCache {
    /// Texture for `image` with `filters` applied, building it on first use.
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        image: &ImageSource,
        filters: &ImageFilters,
    ) -> egui::TextureHandle {
        let key = (image.id(), *filters);
        self.used.insert(key);

        self.textures
            .entry(key)
            .or_insert_with(|| {
                let expr = FilterExpression::from(filters);
                let adjusted = apply_to_image(&expr, image.pixels());
                let size = [adjusted.width() as usize, adjusted.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, adjusted.as_raw());
                log::debug!("Built texture for {} with {}", image.name(), expr);
                ctx.load_texture(
                    format!("photo-{}", image.id().simple()),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone()
    }

    /// Drop textures that were not requested since the last call.
    pub fn end_frame(&mut self) {
        let used = std::mem::take(&mut self.used);
        self.textures.retain(|key, _| used.contains(key));
    }
}
