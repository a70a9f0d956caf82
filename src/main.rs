// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Collage Studio
//!
//! A cross-platform desktop editor for composing 12-month printable
//! calendar collages from photos, stickers and day markers.

mod adjust;
mod app;
mod config;
mod error;
mod interaction;
mod io;
mod layout;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::CollageApp;
use config::{EditorConfig, CONFIG_ENV_VAR};
use std::path::{Path, PathBuf};

/// Config file named on the command line, else by the environment.
fn config_path(arg: Option<&String>) -> Option<PathBuf> {
    arg.map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

fn load_config(path: Option<PathBuf>) -> EditorConfig {
    match path {
        Some(path) => io::serialization::load_config(&path).unwrap_or_else(|e| {
            log::error!("{:#}; using defaults", e);
            EditorConfig::default()
        }),
        None => EditorConfig::default(),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Write the default configuration as a starting point and exit
    if let [flag, path] = args.as_slice() {
        if flag == "--dump-config" {
            io::serialization::export_yaml(&EditorConfig::default(), Path::new(path))?;
            log::info!("Wrote default config to {}", path);
            return Ok(());
        }
    }

    let config = load_config(config_path(args.first()));

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 640.0])
            .with_title("Collage Studio"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Collage Studio",
        options,
        Box::new(|_cc| Ok(Box::new(CollageApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
