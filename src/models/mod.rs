// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Calendar document model, undo history and the mutation store.

pub mod document;
pub mod filters;
pub mod history;
pub mod month;
pub mod store;
