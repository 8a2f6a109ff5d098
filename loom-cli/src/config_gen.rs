use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use loom_core::config::CoreConfig;

#[derive(Serialize)]
struct FullConfig {
    core: CoreConfig,
}

/// Write a config file with every default spelled out, unless one exists.
pub fn ensure_config_exists(path: &str) -> anyhow::Result<()> {
    if Path::new(path).exists() {
        return Ok(());
    }

    eprintln!("Creating default configuration at '{}'...", path);

    let default_config = FullConfig {
        core: CoreConfig::default(),
    };
    let toml_str = toml::to_string_pretty(&default_config).context("serializing default config")?;
    fs::write(path, toml_str).with_context(|| format!("writing {}", path))?;
    Ok(())
}
