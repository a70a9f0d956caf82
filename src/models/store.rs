// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Document store: the only place the calendar document is mutated.
//!
//! Every named operation validates its indices, snapshots the pre-mutation
//! document into [`History`], then applies a partial month update. While a
//! gesture (a drag or slider sweep) is open, only the first of its own writes
//! snapshots, so a whole drag undoes in one step. Any other mutation landing
//! mid-gesture keeps its own snapshot.

use super::document::Document;
use super::history::History;
use super::month::{
    ImageSource, Marker, MonthSettings, MonthUpdate, SlotUpdate, Sticker, StickerId, MAX_SLOTS,
};
use crate::error::{EditorError, EditorResult, IndexKind};

/// Highest day a marker may be attached to.
pub const MAX_MARKER_DAY: u32 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Closed,
    Open { snapshotted: bool },
}

/// Whether a write belongs to the open gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Write {
    Single,
    Gesture,
}

/// Owns the live document and its undo history.
#[derive(Debug, Clone)]
pub struct DesignStore {
    document: Document,
    history: History,
    gesture: Gesture,
}

impl Default for DesignStore {
    fn default() -> Self {
        Self::new(Document::default(), History::default())
    }
}

impl DesignStore {
    pub fn new(document: Document, history: History) -> Self {
        Self {
            document,
            history,
            gesture: Gesture::Closed,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn month(&self, month_index: usize) -> EditorResult<&MonthSettings> {
        self.document.month(month_index)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace the given fields of one month, snapshotting history first.
    pub fn update_month(&mut self, month_index: usize, update: MonthUpdate) -> EditorResult<()> {
        self.write_month(month_index, update, Write::Single)
    }

    /// Merge `update` into one slot; all other slots are carried over as-is.
    pub fn update_slot(
        &mut self,
        month_index: usize,
        slot_index: usize,
        update: SlotUpdate,
    ) -> EditorResult<()> {
        self.write_slot(month_index, slot_index, update, Write::Single)
    }

    /// Like [`update_slot`](Self::update_slot), but coalesced into the open
    /// gesture. Outside a gesture it snapshots as usual.
    pub fn adjust_slot(
        &mut self,
        month_index: usize,
        slot_index: usize,
        update: SlotUpdate,
    ) -> EditorResult<()> {
        self.write_slot(month_index, slot_index, update, Write::Gesture)
    }

    fn write_month(&mut self, month_index: usize, update: MonthUpdate, write: Write) -> EditorResult<()> {
        // Validate before touching history
        self.document.month(month_index)?;
        if let Some(slots) = &update.slots {
            if slots.len() != MAX_SLOTS {
                return Err(EditorError::invalid_index(IndexKind::Slot, slots.len(), MAX_SLOTS));
            }
        }
        self.record_snapshot(write);
        update.apply(self.document.month_mut(month_index)?);
        Ok(())
    }

    fn write_slot(
        &mut self,
        month_index: usize,
        slot_index: usize,
        update: SlotUpdate,
        write: Write,
    ) -> EditorResult<()> {
        let month = self.document.month(month_index)?;
        let current = month
            .slots
            .get(slot_index)
            .ok_or_else(|| EditorError::invalid_index(IndexKind::Slot, slot_index, month.slots.len()))?;

        let mut slots = month.slots.clone();
        slots[slot_index] = update.merge(current);
        self.write_month(month_index, MonthUpdate::slots(slots), write)
    }

    /// Attach an image to a slot, keeping its zoom, offsets and filters.
    pub fn set_slot_image(
        &mut self,
        month_index: usize,
        slot_index: usize,
        image: ImageSource,
    ) -> EditorResult<()> {
        log::info!(
            "Setting image '{}' on month {} slot {}",
            image.name(),
            month_index,
            slot_index
        );
        self.update_slot(month_index, slot_index, SlotUpdate::image(Some(image)))
    }

    /// Detach a slot's image, keeping its zoom, offsets and filters.
    pub fn clear_slot_image(&mut self, month_index: usize, slot_index: usize) -> EditorResult<()> {
        self.update_slot(month_index, slot_index, SlotUpdate::image(None))
    }

    /// Set (`Some`) or remove (`None`) the marker on `day`.
    pub fn set_marker(
        &mut self,
        month_index: usize,
        day: u32,
        marker: Option<Marker>,
    ) -> EditorResult<()> {
        if !(1..=MAX_MARKER_DAY).contains(&day) {
            return Err(EditorError::invalid_index(IndexKind::Day, day, MAX_MARKER_DAY));
        }
        let mut markers = self.document.month(month_index)?.markers.clone();
        match marker {
            Some(marker) => {
                markers.insert(day, marker);
            }
            None => {
                markers.remove(&day);
            }
        }
        self.update_month(month_index, MonthUpdate::markers(markers))
    }

    /// Append a sticker at the canvas centre and return its id.
    pub fn add_sticker(&mut self, month_index: usize, icon: &str) -> EditorResult<StickerId> {
        let sticker = Sticker::new(icon);
        let id = sticker.id;
        let mut stickers = self.document.month(month_index)?.stickers.clone();
        stickers.push(sticker);
        self.update_month(month_index, MonthUpdate::stickers(stickers))?;
        log::info!("Added sticker {} ({}) to month {}", id, icon, month_index);
        Ok(id)
    }

    /// Remove a sticker by id. Unknown ids are ignored.
    pub fn remove_sticker(&mut self, month_index: usize, id: StickerId) -> EditorResult<()> {
        let month = self.document.month(month_index)?;
        if month.sticker(id).is_none() {
            log::debug!("Sticker {} not found in month {}, nothing to remove", id, month_index);
            return Ok(());
        }
        let stickers = month.stickers.iter().filter(|s| s.id != id).cloned().collect();
        self.update_month(month_index, MonthUpdate::stickers(stickers))?;
        log::info!("Removed sticker {} from month {}", id, month_index);
        Ok(())
    }

    /// Replace one sticker's position and scale, coalesced into the open
    /// gesture.
    pub fn place_sticker(
        &mut self,
        month_index: usize,
        id: StickerId,
        x: f64,
        y: f64,
        scale: f64,
    ) -> EditorResult<()> {
        let month = self.document.month(month_index)?;
        if month.sticker(id).is_none() {
            return Ok(());
        }
        let stickers = month
            .stickers
            .iter()
            .map(|s| {
                if s.id == id {
                    Sticker {
                        x,
                        y,
                        scale: scale.max(super::month::MIN_STICKER_SCALE),
                        ..s.clone()
                    }
                } else {
                    s.clone()
                }
            })
            .collect();
        self.write_month(month_index, MonthUpdate::stickers(stickers), Write::Gesture)
    }

    /// Restore the most recent snapshot. Returns `false` if history is empty.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.document = previous;
                self.rearm_gesture();
                log::info!("Undo, {} snapshots left", self.history.len());
                true
            }
            None => false,
        }
    }

    /// Start coalescing mutations into a single history entry.
    pub fn begin_gesture(&mut self) {
        self.gesture = Gesture::Open { snapshotted: false };
    }

    /// Stop coalescing; later mutations snapshot individually again.
    pub fn end_gesture(&mut self) {
        self.gesture = Gesture::Closed;
    }

    pub fn gesture_open(&self) -> bool {
        matches!(self.gesture, Gesture::Open { .. })
    }

    fn record_snapshot(&mut self, write: Write) {
        match (write, self.gesture) {
            (Write::Gesture, Gesture::Open { snapshotted: true }) => {}
            (Write::Gesture, Gesture::Open { snapshotted: false }) => {
                self.history.snapshot(&self.document);
                self.gesture = Gesture::Open { snapshotted: true };
            }
            (Write::Single, Gesture::Open { .. }) => {
                self.history.snapshot(&self.document);
                // The gesture's next write must not fold into this entry
                self.rearm_gesture();
            }
            (_, Gesture::Closed) => self.history.snapshot(&self.document),
        }
    }

    fn rearm_gesture(&mut self) {
        if let Gesture::Open { .. } = self.gesture {
            self.gesture = Gesture::Open { snapshotted: false };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filters::{FilterField, ImageFilters};
    use crate::models::history::DEFAULT_HISTORY_LIMIT;
    use crate::models::month::{LayoutType, MaskShape, PhotoSlot};
    use std::sync::Arc;

    #[test]
    fn update_month_snapshots_pre_mutation_state() {
        let mut store = DesignStore::default();
        store.update_month(2, MonthUpdate::layout(LayoutType::Grid2)).unwrap();

        assert_eq!(store.month(2).unwrap().layout, LayoutType::Grid2);
        assert_eq!(store.history().len(), 1);

        assert!(store.undo());
        assert_eq!(store.month(2).unwrap().layout, LayoutType::Single);
        assert_eq!(store.history().len(), 0);
    }

    #[test]
    fn update_month_rejects_bad_index_without_snapshot() {
        let mut store = DesignStore::default();
        let err = store.update_month(12, MonthUpdate::bg_color("#000000")).unwrap_err();
        assert!(matches!(err, EditorError::InvalidIndex { kind: IndexKind::Month, .. }));
        assert!(store.history().is_empty());
    }

    #[test]
    fn undo_on_empty_history_changes_nothing() {
        let mut store = DesignStore::default();
        let before = store.document().clone();
        assert!(!store.undo());
        assert!(!store.undo());
        assert_eq!(store.document(), &before);
        assert!(store.history().is_empty());
    }

    #[test]
    fn history_length_is_min_of_mutations_and_limit() {
        let mut store = DesignStore::default();
        for n in 1..=75usize {
            let color = format!("#{:06X}", n);
            store.update_month(n % 12, MonthUpdate::bg_color(color)).unwrap();
            assert_eq!(store.history().len(), n.min(DEFAULT_HISTORY_LIMIT));
        }
    }

    #[test]
    fn update_slot_preserves_other_slots() {
        let mut store = DesignStore::default();
        store
            .update_slot(0, 0, SlotUpdate::offset(3.0, -4.0))
            .unwrap();
        store
            .update_slot(0, 2, SlotUpdate::mask_override(Some(MaskShape::Torn2)))
            .unwrap();
        let before = store.month(0).unwrap().slots.clone();

        let filters = ImageFilters { grayscale: 80, ..ImageFilters::default() };
        store.update_slot(0, 1, SlotUpdate::filters(filters)).unwrap();

        let after = &store.month(0).unwrap().slots;
        assert_eq!(after[1].filters.grayscale, 80);
        for i in [0, 2, 3] {
            assert_eq!(after[i], before[i]);
        }
    }

    #[test]
    fn update_slot_rejects_out_of_range_slot() {
        let mut store = DesignStore::default();
        let err = store.update_slot(0, 4, SlotUpdate::zoom(120.0)).unwrap_err();
        assert!(matches!(err, EditorError::InvalidIndex { kind: IndexKind::Slot, index: 4, .. }));
        assert!(store.history().is_empty());
    }

    #[test]
    fn clear_slot_image_keeps_adjustments() {
        let mut store = DesignStore::default();
        let image = ImageSource::new("photo.png", image::RgbaImage::new(4, 3));
        store.set_slot_image(5, 1, image).unwrap();
        store.update_slot(5, 1, SlotUpdate::zoom(180.0)).unwrap();
        store.update_slot(5, 1, SlotUpdate::offset(7.0, 8.0)).unwrap();

        store.clear_slot_image(5, 1).unwrap();

        let slot = &store.month(5).unwrap().slots[1];
        assert!(slot.image.is_none());
        assert_eq!(slot.zoom, 180.0);
        assert_eq!((slot.offset_x, slot.offset_y), (7.0, 8.0));
    }

    #[test]
    fn set_marker_inserts_overwrites_and_removes() {
        let mut store = DesignStore::default();
        store.set_marker(1, 14, Some(Marker::Text("Gig".into()))).unwrap();
        store.set_marker(1, 14, Some(Marker::Icon("star".into()))).unwrap();
        assert_eq!(store.month(1).unwrap().markers.get(&14), Some(&Marker::Icon("star".into())));

        store.set_marker(1, 14, None).unwrap();
        assert!(store.month(1).unwrap().markers.is_empty());
    }

    #[test]
    fn set_marker_rejects_day_out_of_range() {
        let mut store = DesignStore::default();
        assert!(store.set_marker(0, 0, None).is_err());
        assert!(store.set_marker(0, 32, Some(Marker::Text("x".into()))).is_err());
        assert!(store.history().is_empty());
    }

    #[test]
    fn add_then_remove_sticker_restores_sequence() {
        let mut store = DesignStore::default();
        store.add_sticker(3, "fluent-emoji:sun").unwrap();
        let before = store.month(3).unwrap().stickers.clone();

        let id = store.add_sticker(3, "fluent-emoji:ghost").unwrap();
        assert_eq!(store.month(3).unwrap().stickers.len(), 2);
        let added = store.month(3).unwrap().sticker(id).unwrap();
        assert_eq!((added.x, added.y, added.scale), (50.0, 50.0, 1.0));

        store.remove_sticker(3, id).unwrap();
        assert_eq!(store.month(3).unwrap().stickers, before);
    }

    #[test]
    fn remove_unknown_sticker_is_a_no_op() {
        let mut store = DesignStore::default();
        store.add_sticker(0, "fluent-emoji:eye").unwrap();
        let history_len = store.history().len();
        let before = store.document().clone();

        store.remove_sticker(0, StickerId::generate()).unwrap();

        assert_eq!(store.document(), &before);
        assert_eq!(store.history().len(), history_len);
    }

    #[test]
    fn snapshots_share_image_pixels_with_live_document() {
        let mut store = DesignStore::default();
        let image = ImageSource::new("shared.png", image::RgbaImage::new(8, 8));
        store.set_slot_image(0, 0, image).unwrap();
        store.update_month(0, MonthUpdate::bg_color("#E11D48")).unwrap();

        let live = store.month(0).unwrap().slots[0].image.clone().unwrap();
        store.undo();
        let restored = store.month(0).unwrap().slots[0].image.clone().unwrap();
        assert!(Arc::ptr_eq(live.pixels(), restored.pixels()));
    }

    #[test]
    fn snapshots_do_not_alias_live_document() {
        let mut store = DesignStore::default();
        store.update_slot(0, 0, SlotUpdate::offset(1.0, 1.0)).unwrap();
        store.update_slot(0, 0, SlotUpdate::offset(2.0, 2.0)).unwrap();
        store.undo();
        assert_eq!(store.month(0).unwrap().slots[0].offset_x, 1.0);
    }

    #[test]
    fn gesture_records_a_single_snapshot() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        for step in 1..=10 {
            store.adjust_slot(0, 0, SlotUpdate::offset(step as f64, 0.0)).unwrap();
        }
        store.end_gesture();

        assert_eq!(store.history().len(), 1);
        store.undo();
        assert_eq!(store.month(0).unwrap().slots[0].offset_x, 0.0);
    }

    #[test]
    fn slider_sweep_is_one_undo_step() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        for value in [110, 125, 140, 160] {
            let filters = ImageFilters::default().with(FilterField::Brightness, value);
            store.adjust_slot(0, 2, SlotUpdate::filters(filters)).unwrap();
        }
        store.end_gesture();

        assert_eq!(store.history().len(), 1);
        assert_eq!(store.month(0).unwrap().slots[2].filters.brightness, 160);
        store.undo();
        assert_eq!(store.month(0).unwrap().slots[2].filters, ImageFilters::default());
    }

    #[test]
    fn slider_clicks_without_a_sweep_snapshot_each_time() {
        let mut store = DesignStore::default();
        for value in [90, 80] {
            let filters = ImageFilters::default().with(FilterField::Contrast, value);
            store.adjust_slot(0, 0, SlotUpdate::filters(filters)).unwrap();
        }
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn plain_updates_inside_a_gesture_still_snapshot() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        store.update_slot(0, 0, SlotUpdate::offset(1.0, 0.0)).unwrap();
        store.update_slot(0, 0, SlotUpdate::offset(2.0, 0.0)).unwrap();
        store.end_gesture();
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn upload_landing_mid_drag_keeps_its_own_undo_step() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        store.adjust_slot(0, 0, SlotUpdate::offset(5.0, 0.0)).unwrap();
        let image = ImageSource::new("late.png", image::RgbaImage::new(2, 2));
        store.set_slot_image(0, 1, image).unwrap();
        store.end_gesture();

        assert_eq!(store.history().len(), 2);

        // First undo reverts only the upload
        assert!(store.undo());
        let month = store.month(0).unwrap();
        assert!(month.slots[1].image.is_none());
        assert_eq!(month.slots[0].offset_x, 5.0);

        // Second undo reverts the drag
        assert!(store.undo());
        assert_eq!(store.month(0).unwrap().slots[0].offset_x, 0.0);
    }

    #[test]
    fn drag_resumed_after_an_upload_snapshots_again() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        store.adjust_slot(0, 0, SlotUpdate::offset(5.0, 0.0)).unwrap();
        let image = ImageSource::new("late.png", image::RgbaImage::new(2, 2));
        store.set_slot_image(0, 1, image).unwrap();
        store.adjust_slot(0, 0, SlotUpdate::offset(10.0, 0.0)).unwrap();
        store.adjust_slot(0, 0, SlotUpdate::offset(12.0, 0.0)).unwrap();
        store.end_gesture();

        assert_eq!(store.history().len(), 3);
        store.undo();
        let month = store.month(0).unwrap();
        assert!(month.slots[1].image.is_some());
        assert_eq!(month.slots[0].offset_x, 5.0);
    }

    #[test]
    fn undo_mid_gesture_lets_the_gesture_snapshot_again() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        store.adjust_slot(0, 0, SlotUpdate::offset(5.0, 0.0)).unwrap();
        assert!(store.undo());
        store.adjust_slot(0, 0, SlotUpdate::offset(8.0, 0.0)).unwrap();
        store.end_gesture();

        assert_eq!(store.history().len(), 1);
        store.undo();
        assert_eq!(store.month(0).unwrap().slots[0].offset_x, 0.0);
    }

    #[test]
    fn update_month_rejects_wrong_slot_count() {
        let mut store = DesignStore::default();
        let err = store
            .update_month(0, MonthUpdate::slots(vec![PhotoSlot::default(); 7]))
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::InvalidIndex { kind: IndexKind::Slot, index: 7, bound: 4 }
        ));
        assert!(store.update_month(1, MonthUpdate::slots(Vec::new())).is_err());

        assert!(store.history().is_empty());
        assert_eq!(store.month(0).unwrap().slots.len(), MAX_SLOTS);
        assert_eq!(store.month(1).unwrap().slots.len(), MAX_SLOTS);
    }

    #[test]
    fn gesture_without_mutation_records_nothing() {
        let mut store = DesignStore::default();
        store.begin_gesture();
        assert!(store.gesture_open());
        store.end_gesture();
        assert!(store.history().is_empty());
    }

    #[test]
    fn place_sticker_clamps_scale() {
        let mut store = DesignStore::default();
        let id = store.add_sticker(0, "fluent-emoji:fire").unwrap();
        store.place_sticker(0, id, 10.0, 120.0, -3.0).unwrap();
        let s = store.month(0).unwrap().sticker(id).unwrap();
        assert_eq!((s.x, s.y), (10.0, 120.0));
        assert!((s.scale - 0.1).abs() < 1e-9);
    }
}
