// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-session UI state.
//!
//! Everything here is transient and outside undo history: which month is on
//! screen, which slot the side panel edits, the chosen font, and whether a
//! drag is in progress.

use super::drag::DragState;
use crate::models::document::MONTHS;
use crate::models::month::MAX_SLOTS;

#[derive(Debug, Default)]
pub struct Session {
    /// Month shown on the canvas, 0..12
    pub month: usize,
    /// Slot edited by the side panel, 0..4
    pub selected_slot: usize,
    /// Index into the configured font list
    pub font: usize,
    pub drag: DragState,
    /// Last user-facing notice (e.g. a failed upload)
    pub status: Option<String>,
}

impl Session {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Transitions are suppressed while a drag is active.
    pub fn animations_enabled(&self) -> bool {
        !self.is_dragging()
    }

    /// Switch months. Out-of-range indices are ignored.
    pub fn select_month(&mut self, month: usize) {
        if month < MONTHS {
            self.month = month;
        } else {
            log::error!("Ignoring month selection {}", month);
        }
    }

    /// Select a slot for the side panel. Out-of-range indices are ignored.
    pub fn select_slot(&mut self, slot: usize) {
        if slot < MAX_SLOTS {
            self.selected_slot = slot;
        } else {
            log::error!("Ignoring slot selection {}", slot);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
