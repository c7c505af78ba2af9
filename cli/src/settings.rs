use std::fs;
use std::path::Path;

use anyhow::Context;
use gemswap_core::GameConfig;

/// Reads game rules from a TOML file, fields left out keep their defaults.
pub(crate) fn load(path: &Path) -> anyhow::Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

pub(crate) fn parse(text: &str) -> anyhow::Result<GameConfig> {
    let config: GameConfig = toml::from_str(text)?;
    Ok(config.sanitized())
}
