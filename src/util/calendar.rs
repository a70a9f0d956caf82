// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Calendar date arithmetic.
//!
//! Produces the Monday-first display grid for a month: leading blanks up to
//! the weekday of the 1st, the day numbers, then trailing blanks to fill the
//! last week row.

use crate::error::{EditorError, EditorResult, IndexKind};
use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub const WEEK_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn first_of_month(month_index: usize, year: i32) -> EditorResult<NaiveDate> {
    if month_index >= 12 {
        return Err(EditorError::invalid_index(IndexKind::Month, month_index, 12));
    }
    NaiveDate::from_ymd_opt(year, month_index as u32 + 1, 1)
        .ok_or_else(|| EditorError::invalid_index(IndexKind::Year, year, NaiveDate::MAX.year()))
}

/// Number of days in the month, leap years included.
pub fn days_in_month(month_index: usize, year: i32) -> EditorResult<u32> {
    let first = first_of_month(month_index, year)?;
    let next_first = if month_index == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_index as u32 + 2, 1)
    }
    .ok_or_else(|| EditorError::invalid_index(IndexKind::Year, year, NaiveDate::MAX.year()))?;

    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// Weekday of the 1st, 0 = Monday .. 6 = Sunday.
pub fn start_weekday(month_index: usize, year: i32) -> EditorResult<u32> {
    Ok(first_of_month(month_index, year)?.weekday().num_days_from_monday())
}

/// Display grid for the month; `None` cells are blanks.
///
/// The length is always a multiple of seven.
pub fn grid_days(month_index: usize, year: i32) -> EditorResult<Vec<Option<u32>>> {
    let leading = start_weekday(month_index, year)?;
    let days = days_in_month(month_index, year)?;

    let mut grid: Vec<Option<u32>> = Vec::with_capacity(42);
    grid.extend((0..leading).map(|_| None));
    grid.extend((1..=days).map(Some));
    while grid.len() % 7 != 0 {
        grid.push(None);
    }
    Ok(grid)
}
