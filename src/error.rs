// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor error types.
//!
//! Index violations are contract errors: the model always reports them, and
//! the UI layer logs them and carries on. Missing targets (undo with nothing
//! to undo, removing an unknown sticker) are not errors at all.

use std::fmt;

pub type EditorResult<T> = Result<T, EditorError>;

/// Which index an [`EditorError::InvalidIndex`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Month,
    Slot,
    Day,
    Year,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexKind::Month => "month",
            IndexKind::Slot => "slot",
            IndexKind::Day => "day",
            IndexKind::Year => "year",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("invalid {kind} index {index} (bound {bound})")]
    InvalidIndex {
        kind: IndexKind,
        index: i64,
        bound: i64,
    },

    #[error("image read error: {0}")]
    ImageRead(String),

    #[error("config error: {0}")]
    Config(String),
}

impl EditorError {
    pub fn invalid_index(kind: IndexKind, index: impl TryInto<i64>, bound: impl TryInto<i64>) -> Self {
        Self::InvalidIndex {
            kind,
            index: index.try_into().unwrap_or(i64::MAX),
            bound: bound.try_into().unwrap_or(i64::MAX),
        }
    }

    pub fn image_read(msg: impl Into<String>) -> Self {
        Self::ImageRead(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_index() {
        let err = EditorError::invalid_index(IndexKind::Month, 12usize, 12usize);
        assert_eq!(err.to_string(), "invalid month index 12 (bound 12)");

        let err = EditorError::invalid_index(IndexKind::Slot, 7usize, 4usize);
        assert!(err.to_string().contains("slot"));
    }

    #[test]
    fn display_prefixes_are_stable() {
        assert!(EditorError::image_read("x").to_string().starts_with("image read error:"));
        assert!(EditorError::config("x").to_string().starts_with("config error:"));
    }
}
