use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::{GeneratorConfig, Layout};

pub fn load_layout(path: &Path) -> Result<Layout> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to deserialize layout JSON: {}", path.display()))
}

/// Reads a TOML generator config, falling back to the defaults without a path.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GeneratorConfig::from_toml_str(&data)
        .with_context(|| format!("Invalid generator config: {}", path.display()))
}
