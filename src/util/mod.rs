// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Date and geometry helpers.

pub mod calendar;
pub mod geometry;
