// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The twelve-month calendar document.

use super::month::{MonthSettings, PhotoSlot};
use crate::error::{EditorError, EditorResult, IndexKind};

/// Number of months in a document. The document is never resized.
pub const MONTHS: usize = 12;

/// One design per calendar month, indexed 0 (January) to 11 (December).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    months: [MonthSettings; MONTHS],
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&MonthSettings::default())
    }
}

impl Document {
    /// Create a document where every month starts from `template`.
    pub fn new(template: &MonthSettings) -> Self {
        Self {
            months: std::array::from_fn(|_| template.clone()),
        }
    }

    pub fn months(&self) -> &[MonthSettings; MONTHS] {
        &self.months
    }

    pub fn month(&self, month_index: usize) -> EditorResult<&MonthSettings> {
        self.months
            .get(month_index)
            .ok_or_else(|| EditorError::invalid_index(IndexKind::Month, month_index, MONTHS))
    }

    pub(crate) fn month_mut(&mut self, month_index: usize) -> EditorResult<&mut MonthSettings> {
        self.months
            .get_mut(month_index)
            .ok_or_else(|| EditorError::invalid_index(IndexKind::Month, month_index, MONTHS))
    }

    pub fn slot(&self, month_index: usize, slot_index: usize) -> EditorResult<&PhotoSlot> {
        let month = self.month(month_index)?;
        month
            .slots
            .get(slot_index)
            .ok_or_else(|| EditorError::invalid_index(IndexKind::Slot, slot_index, month.slots.len()))
    }
}
