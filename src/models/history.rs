// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bounded undo history.
//!
//! Snapshots are whole-document structural clones, most recent first. Image
//! pixels are `Arc`-shared, so a snapshot costs the model tree, not the
//! photos. There is no redo: undo pops and discards.

use super::document::Document;
use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// History system for undo.
#[derive(Debug, Clone)]
pub struct History {
    /// Past states, most recent at the front
    snapshots: VecDeque<Document>,
    /// Maximum history size
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Save the current state before making a change.
    pub fn snapshot(&mut self, document: &Document) {
        self.snapshots.push_front(document.clone());
        // Evict the oldest entries
        self.snapshots.truncate(self.max_size);
    }

    /// Pop the most recent snapshot, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Document> {
        self.snapshots.pop_front()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::month::{LayoutType, MonthUpdate};

    fn doc_with_layout(layout: LayoutType) -> Document {
        let mut doc = Document::default();
        MonthUpdate::layout(layout).apply(doc.month_mut(0).unwrap());
        doc
    }

    #[test]
    fn undo_returns_most_recent_first() {
        let mut history = History::default();
        history.snapshot(&doc_with_layout(LayoutType::Grid2));
        history.snapshot(&doc_with_layout(LayoutType::Grid3));

        assert_eq!(history.undo().unwrap().month(0).unwrap().layout, LayoutType::Grid3);
        assert_eq!(history.undo().unwrap().month(0).unwrap().layout, LayoutType::Grid2);
        assert!(history.undo().is_none());
    }

    #[test]
    fn never_exceeds_limit() {
        let mut history = History::default();
        let doc = Document::default();
        for n in 1..=120 {
            history.snapshot(&doc);
            assert_eq!(history.len(), n.min(DEFAULT_HISTORY_LIMIT));
        }
    }

    #[test]
    fn overflow_evicts_the_oldest() {
        let mut history = History::new(2);
        history.snapshot(&doc_with_layout(LayoutType::Grid2));
        history.snapshot(&doc_with_layout(LayoutType::Grid3));
        history.snapshot(&doc_with_layout(LayoutType::Grid4));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo().unwrap().month(0).unwrap().layout, LayoutType::Grid4);
        assert_eq!(history.undo().unwrap().month(0).unwrap().layout, LayoutType::Grid3);
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        assert_eq!(History::new(0).max_size(), 1);
    }
}
