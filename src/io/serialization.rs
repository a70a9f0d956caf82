// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration file loading.
//!
//! This module handles reading editor configuration in YAML and JSON
//! formats, selected by file extension.

use crate::config::EditorConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Import configuration from YAML format.
pub fn import_yaml(path: &Path) -> Result<EditorConfig> {
    let yaml = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&yaml)?;
    Ok(config)
}

/// Import configuration from JSON format.
pub fn import_json(path: &Path) -> Result<EditorConfig> {
    let json = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&json)?;
    Ok(config)
}

/// Export configuration to YAML format.
pub fn export_yaml(config: &EditorConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Load and validate a configuration file, dispatching on its extension.
pub fn load_config(path: &Path) -> Result<EditorConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    let config = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported config extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to read config {}", path.display()))?;

    config.validate()?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
