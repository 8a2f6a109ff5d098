use std::fs;
use std::path::Path;
use std::sync::RwLock;

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use toml::Table;

static GLOBAL_CONFIG: OnceCell<RwLock<Table>> = OnceCell::new();

/// Load the process-wide config from `path`.
///
/// A missing file means "all defaults". A file that does not parse is logged
/// and treated as empty. Only a second call is an error.
pub fn init<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();

    let content = if path.exists() {
        log::info!("Loading config from {:?}", path);
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?
    } else {
        log::warn!("Config file not found at {:?}, using defaults.", path);
        String::new()
    };

    install(parse_table(&content))
}

/// Same as [`init`], from TOML text already in memory.
pub fn init_from_str(content: &str) -> anyhow::Result<()> {
    install(parse_table(content))
}

pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

fn install(table: Table) -> anyhow::Result<()> {
    GLOBAL_CONFIG
        .set(RwLock::new(table))
        .map_err(|_| anyhow::anyhow!("Config already initialized"))
}

pub fn parse_table(content: &str) -> Table {
    toml::from_str(content).unwrap_or_else(|e| {
        log::error!("Config syntax error: {}, using empty config.", e);
        Table::new()
    })
}

/// Deserialize `[key]` out of `table`, falling back to `T::default()`.
pub fn section<T: DeserializeOwned + Default>(table: &Table, key: &str) -> T {
    match table.get(key) {
        Some(value) => value.clone().try_into().unwrap_or_else(|e| {
            log::warn!("Config section '[{}]' mismatch: {}. Using default.", key, e);
            T::default()
        }),
        None => T::default(),
    }
}

/// Read `[key]` from the process-wide config.
pub fn get<T: DeserializeOwned + Default>(key: &str) -> T {
    let Some(store) = GLOBAL_CONFIG.get() else {
        log::warn!("Config read for '[{}]' before init, using default.", key);
        return T::default();
    };
    match store.read() {
        Ok(table) => section(&table, key),
        Err(poisoned) => section(&poisoned.into_inner(), key),
    }
}
