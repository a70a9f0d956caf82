// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for photo files, configuration and printing.

pub mod media;
pub mod print;
pub mod serialization;
