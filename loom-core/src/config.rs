use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub system: SystemConfig,
    pub layout: LayoutConfig,
    pub player: PlayerConfig,
}

impl CoreConfig {
    /// The `[core]` section of the process-wide config.
    pub fn from_global() -> Self {
        loom_shared::config::get("core")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub script_path: String,
    pub log_path:    String,
    pub log_level:   String,
}

/// Spacing of the layered scene-graph drawing, in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub layer_height:       f32,
    pub horizontal_spacing: f32,
    /// Horizontal axis every layer is centred on.
    pub start_x:            f32,
    pub start_y:            f32,
    pub min_x:              f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Title of the scene a playthrough starts in; the first scene when unset.
    pub start_scene: Option<String>,
    pub tick_ms:     u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            script_path: "story/".into(),
            log_path:    "logs/".into(),
            log_level:   "info".into(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_height: 220.0,
            horizontal_spacing: 350.0,
            start_x: 200.0,
            start_y: 100.0,
            min_x: 50.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_scene: None,
            tick_ms: 16,
        }
    }
}
